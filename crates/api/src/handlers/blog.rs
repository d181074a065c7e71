//! Handlers for the `/blog` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use transfer_core::error::CoreError;
use transfer_core::feed::plain_excerpt;
use transfer_core::types::DbId;
use transfer_db::models::blog_post::{BlogPost, CreateBlogPost, UpdateBlogPost};
use transfer_db::repositories::BlogPostRepo;

use crate::error::{AppError, AppResult};
use crate::extract::ValidatedJson;
use crate::middleware::auth::{AdminSession, OptionalAdmin};
use crate::query::ListParams;
use crate::response::{DataResponse, DeleteAck, Paginated};
use crate::slugs::{ensure_available, resolve_for_create, SlugScope};
use crate::state::AppState;

/// Length of an excerpt derived from the post body.
const DERIVED_EXCERPT_CHARS: usize = 200;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "blog post",
        id,
    })
}

/// GET /api/v1/blog
///
/// Newest first. Anonymous readers see published posts only.
pub async fn list_posts(
    State(state): State<AppState>,
    admin: OptionalAdmin,
    Query(params): Query<ListParams>,
) -> AppResult<Json<Paginated<BlogPost>>> {
    let filter = params.publish_filter(admin.is_admin())?;
    let page = params.page_request();

    let posts = BlogPostRepo::list(&state.pool, filter, page.limit, page.offset()).await?;
    let total = BlogPostRepo::count(&state.pool, filter).await?;

    Ok(Json(Paginated {
        data: posts,
        meta: page.meta(total),
    }))
}

/// GET /api/v1/blog/{id}
pub async fn get_post(
    _admin: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<BlogPost>>> {
    let post = BlogPostRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: post }))
}

/// GET /api/v1/blog/slug/{slug}
///
/// Drafts are only visible to an admin (preview).
pub async fn get_post_by_slug(
    State(state): State<AppState>,
    admin: OptionalAdmin,
    Path(slug): Path<String>,
) -> AppResult<Json<DataResponse<BlogPost>>> {
    let post = BlogPostRepo::find_by_slug(&state.pool, &slug, !admin.is_admin())
        .await?
        .ok_or_else(|| AppError::NotFound(format!("blog post '{slug}' not found")))?;
    Ok(Json(DataResponse { data: post }))
}

/// POST /api/v1/blog
pub async fn create_post(
    admin: AdminSession,
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<CreateBlogPost>,
) -> AppResult<(StatusCode, Json<DataResponse<BlogPost>>)> {
    let slug = resolve_for_create(
        &state.pool,
        SlugScope::BlogPost,
        input.slug.as_deref(),
        &input.title,
    )
    .await?;
    let excerpt = input
        .excerpt
        .clone()
        .unwrap_or_else(|| plain_excerpt(&input.content, DERIVED_EXCERPT_CHARS));

    let post = BlogPostRepo::create(&state.pool, &input, &slug, &excerpt).await?;

    tracing::info!(
        admin = %admin.username,
        post_id = post.id,
        slug = %post.slug,
        is_published = post.is_published,
        "Blog post created",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: post })))
}

/// PUT /api/v1/blog/{id}
pub async fn update_post(
    admin: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    ValidatedJson(input): ValidatedJson<UpdateBlogPost>,
) -> AppResult<Json<DataResponse<BlogPost>>> {
    if let Some(slug) = input.slug.as_deref() {
        ensure_available(&state.pool, SlugScope::BlogPost, id, slug).await?;
    }

    let post = BlogPostRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(admin = %admin.username, post_id = id, "Blog post updated");

    Ok(Json(DataResponse { data: post }))
}

/// PATCH /api/v1/blog/{id}/publish
pub async fn publish_post(
    admin: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<BlogPost>>> {
    set_published(admin, state, id, true).await
}

/// PATCH /api/v1/blog/{id}/unpublish
pub async fn unpublish_post(
    admin: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<BlogPost>>> {
    set_published(admin, state, id, false).await
}

async fn set_published(
    admin: AdminSession,
    state: AppState,
    id: DbId,
    publish: bool,
) -> AppResult<Json<DataResponse<BlogPost>>> {
    let post = BlogPostRepo::set_published(&state.pool, id, publish)
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(
        admin = %admin.username,
        post_id = id,
        is_published = publish,
        "Blog post visibility changed",
    );

    Ok(Json(DataResponse { data: post }))
}

/// DELETE /api/v1/blog/{id}
pub async fn delete_post(
    admin: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<DeleteAck>>> {
    if !BlogPostRepo::delete(&state.pool, id).await? {
        return Err(not_found(id));
    }
    tracing::info!(admin = %admin.username, post_id = id, "Blog post deleted");
    Ok(Json(DeleteAck::new(id)))
}
