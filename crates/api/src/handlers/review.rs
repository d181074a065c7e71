//! Handlers for the `/reviews` resource and its moderation actions.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use transfer_core::error::CoreError;
use transfer_core::publishing::{parse_review_filter, ReviewFilter, ReviewFlags};
use transfer_core::types::DbId;
use transfer_db::models::review::{CreateReview, ReviewResponse, ReviewStats, UpdateReview};
use transfer_db::repositories::ReviewRepo;

use crate::error::{AppError, AppResult};
use crate::extract::ValidatedJson;
use crate::middleware::auth::{AdminSession, OptionalAdmin};
use crate::query::{IdQuery, ListParams};
use crate::response::{DataResponse, DeleteAck, Paginated};
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "review",
        id,
    })
}

/// Moderation filter for a list query. Anonymous readers only ever see
/// published reviews.
fn review_filter(params: &ListParams, is_admin: bool) -> AppResult<Option<ReviewFilter>> {
    if !is_admin {
        return Ok(Some(ReviewFilter::Published));
    }
    if let Some(status) = params.status_filter() {
        return Ok(Some(parse_review_filter(status)?));
    }
    Ok(if params.show_hidden(true) {
        None
    } else {
        Some(ReviewFilter::Published)
    })
}

/// GET /api/v1/reviews
pub async fn list_reviews(
    State(state): State<AppState>,
    admin: OptionalAdmin,
    Query(params): Query<ListParams>,
) -> AppResult<Json<Paginated<ReviewResponse>>> {
    let filter = review_filter(&params, admin.is_admin())?;
    let page = params.page_request();

    let reviews = ReviewRepo::list(&state.pool, filter, page.limit, page.offset()).await?;
    let total = ReviewRepo::count(&state.pool, filter).await?;

    Ok(Json(Paginated {
        data: reviews.into_iter().map(ReviewResponse::from).collect(),
        meta: page.meta(total),
    }))
}

/// GET /api/v1/reviews/stats
///
/// Count and average rating of published reviews.
pub async fn review_stats(State(state): State<AppState>) -> AppResult<Json<DataResponse<ReviewStats>>> {
    let stats = ReviewRepo::stats(&state.pool).await?;
    Ok(Json(DataResponse { data: stats }))
}

/// GET /api/v1/reviews/{id}
pub async fn get_review(
    _admin: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<ReviewResponse>>> {
    let review = ReviewRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: review.into() }))
}

/// POST /api/v1/reviews
///
/// Public submissions always start pending, whatever flags they carry. An
/// admin may create a review already approved (and published).
pub async fn create_review(
    State(state): State<AppState>,
    admin: OptionalAdmin,
    ValidatedJson(input): ValidatedJson<CreateReview>,
) -> AppResult<(StatusCode, Json<DataResponse<ReviewResponse>>)> {
    let flags = match &admin.0 {
        Some(_) => ReviewFlags::PENDING.apply(input.is_approved, input.is_published)?,
        None => ReviewFlags::PENDING,
    };

    let review = ReviewRepo::create(&state.pool, &input, flags).await?;

    tracing::info!(
        review_id = review.id,
        rating = review.rating,
        by_admin = admin.is_admin(),
        "Review created",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: review.into() })))
}

/// PUT /api/v1/reviews/{id}
///
/// Flags left out keep their stored value. A result that would publish an
/// unapproved review is rejected.
pub async fn update_review(
    admin: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    ValidatedJson(input): ValidatedJson<UpdateReview>,
) -> AppResult<Json<DataResponse<ReviewResponse>>> {
    let current = ReviewRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    let flags = current
        .flags()
        .apply(input.is_approved, input.is_published)?;

    let review = ReviewRepo::update(&state.pool, id, &input, flags)
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(admin = %admin.username, review_id = id, "Review updated");

    Ok(Json(DataResponse { data: review.into() }))
}

/// PATCH /api/v1/reviews/approve?id=
pub async fn approve_review(
    admin: AdminSession,
    State(state): State<AppState>,
    Query(IdQuery { id }): Query<IdQuery>,
) -> AppResult<Json<DataResponse<ReviewResponse>>> {
    moderate(admin, state, id, ReviewFlags::APPROVED).await
}

/// PATCH /api/v1/reviews/reject?id=
pub async fn reject_review(
    admin: AdminSession,
    State(state): State<AppState>,
    Query(IdQuery { id }): Query<IdQuery>,
) -> AppResult<Json<DataResponse<ReviewResponse>>> {
    moderate(admin, state, id, ReviewFlags::REJECTED).await
}

/// PATCH /api/v1/reviews/{id}/approve
pub async fn approve_review_by_path(
    admin: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<ReviewResponse>>> {
    moderate(admin, state, id, ReviewFlags::APPROVED).await
}

/// PATCH /api/v1/reviews/{id}/reject
pub async fn reject_review_by_path(
    admin: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<ReviewResponse>>> {
    moderate(admin, state, id, ReviewFlags::REJECTED).await
}

async fn moderate(
    admin: AdminSession,
    state: AppState,
    id: DbId,
    flags: ReviewFlags,
) -> AppResult<Json<DataResponse<ReviewResponse>>> {
    let review = ReviewRepo::moderate(&state.pool, id, flags)
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(
        admin = %admin.username,
        review_id = id,
        is_approved = flags.is_approved,
        is_published = flags.is_published,
        "Review moderated",
    );

    Ok(Json(DataResponse { data: review.into() }))
}

/// DELETE /api/v1/reviews/{id}
pub async fn delete_review(
    admin: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<DeleteAck>>> {
    if !ReviewRepo::delete(&state.pool, id).await? {
        return Err(not_found(id));
    }
    tracing::info!(admin = %admin.username, review_id = id, "Review deleted");
    Ok(Json(DeleteAck::new(id)))
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn params(show_all: bool, status: Option<&str>) -> ListParams {
        ListParams {
            show_all,
            status: status.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn public_filter_is_always_published() {
        let filter = review_filter(&params(true, Some("pending")), false).unwrap();
        assert_matches!(filter, Some(ReviewFilter::Published));
    }

    #[test]
    fn admin_filters() {
        assert_matches!(review_filter(&params(true, None), true).unwrap(), None);
        assert_matches!(
            review_filter(&params(false, Some("rejected")), true).unwrap(),
            Some(ReviewFilter::Rejected)
        );
        assert_matches!(
            review_filter(&params(false, None), true).unwrap(),
            Some(ReviewFilter::Published)
        );
        assert!(review_filter(&params(false, Some("spam")), true).is_err());
    }
}
