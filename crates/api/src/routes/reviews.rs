use axum::routing::{get, patch};
use axum::Router;

use crate::handlers::review;
use crate::state::AppState;

/// Review routes mounted at `/reviews`.
///
/// ```text
/// GET    /                  -> list_reviews
/// POST   /                  -> create_review (public or admin)
/// GET    /stats             -> review_stats
/// PATCH  /approve?id=       -> approve_review
/// PATCH  /reject?id=        -> reject_review
/// GET    /{id}              -> get_review
/// PUT    /{id}              -> update_review
/// DELETE /{id}              -> delete_review
/// PATCH  /{id}/approve      -> approve_review_by_path
/// PATCH  /{id}/reject       -> reject_review_by_path
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(review::list_reviews).post(review::create_review))
        .route("/stats", get(review::review_stats))
        .route("/approve", patch(review::approve_review))
        .route("/reject", patch(review::reject_review))
        .route(
            "/{id}",
            get(review::get_review)
                .put(review::update_review)
                .delete(review::delete_review),
        )
        .route("/{id}/approve", patch(review::approve_review_by_path))
        .route("/{id}/reject", patch(review::reject_review_by_path))
}
