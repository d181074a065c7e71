//! Handlers for the `/galleries` resource and the photos it owns.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use transfer_core::batch::{partition, BatchOutcome};
use transfer_core::error::CoreError;
use transfer_core::types::DbId;
use transfer_core::upload::is_valid_media_url;
use transfer_db::models::gallery::{
    BatchCreatePhotos, CreateGallery, CreateGalleryPhoto, GalleryPhoto, GallerySummary,
    GalleryWithPhotos, PhotoGallery, ReorderPhotos, UpdateGallery, UpdateGalleryPhoto,
};
use transfer_db::repositories::{GalleryPhotoRepo, GalleryRepo};
use transfer_db::DbPool;

use crate::error::{AppError, AppResult};
use crate::extract::ValidatedJson;
use crate::middleware::auth::{AdminSession, OptionalAdmin};
use crate::query::ListParams;
use crate::response::{DataResponse, DeleteAck, Paginated};
use crate::slugs::{ensure_available, resolve_for_create, SlugScope};
use crate::state::AppState;

fn gallery_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "gallery",
        id,
    })
}

fn photo_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "gallery photo",
        id,
    })
}

/// Load a gallery, hiding drafts from anonymous readers.
async fn visible_gallery(pool: &DbPool, id: DbId, is_admin: bool) -> AppResult<PhotoGallery> {
    GalleryRepo::find_by_id(pool, id)
        .await?
        .filter(|g| is_admin || g.is_published)
        .ok_or_else(|| gallery_not_found(id))
}

async fn ensure_gallery(pool: &DbPool, id: DbId) -> AppResult<PhotoGallery> {
    visible_gallery(pool, id, true).await
}

// ---------------------------------------------------------------------------
// Galleries
// ---------------------------------------------------------------------------

/// GET /api/v1/galleries
///
/// Ordered by `order`, then newest first. Each entry carries its photo count
/// and the url of its first photo.
pub async fn list_galleries(
    State(state): State<AppState>,
    admin: OptionalAdmin,
    Query(params): Query<ListParams>,
) -> AppResult<Json<Paginated<GallerySummary>>> {
    let filter = params.publish_filter(admin.is_admin())?;
    let page = params.page_request();

    let galleries = GalleryRepo::list(&state.pool, filter, page.limit, page.offset()).await?;
    let total = GalleryRepo::count(&state.pool, filter).await?;

    Ok(Json(Paginated {
        data: galleries,
        meta: page.meta(total),
    }))
}

/// GET /api/v1/galleries/{id}
pub async fn get_gallery(
    State(state): State<AppState>,
    admin: OptionalAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<GalleryWithPhotos>>> {
    let gallery = visible_gallery(&state.pool, id, admin.is_admin()).await?;
    let photos = GalleryPhotoRepo::list_for_gallery(&state.pool, id).await?;
    Ok(Json(DataResponse {
        data: GalleryWithPhotos { gallery, photos },
    }))
}

/// GET /api/v1/galleries/slug/{slug}
pub async fn get_gallery_by_slug(
    State(state): State<AppState>,
    admin: OptionalAdmin,
    Path(slug): Path<String>,
) -> AppResult<Json<DataResponse<GalleryWithPhotos>>> {
    let gallery = GalleryRepo::find_by_slug(&state.pool, &slug, !admin.is_admin())
        .await?
        .ok_or_else(|| AppError::NotFound(format!("gallery '{slug}' not found")))?;
    let photos = GalleryPhotoRepo::list_for_gallery(&state.pool, gallery.id).await?;
    Ok(Json(DataResponse {
        data: GalleryWithPhotos { gallery, photos },
    }))
}

/// POST /api/v1/galleries
pub async fn create_gallery(
    admin: AdminSession,
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<CreateGallery>,
) -> AppResult<(StatusCode, Json<DataResponse<PhotoGallery>>)> {
    let slug = resolve_for_create(
        &state.pool,
        SlugScope::Gallery,
        input.slug.as_deref(),
        &input.title,
    )
    .await?;

    let gallery = GalleryRepo::create(&state.pool, &input, &slug).await?;

    tracing::info!(
        admin = %admin.username,
        gallery_id = gallery.id,
        slug = %gallery.slug,
        "Gallery created",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: gallery })))
}

/// PUT /api/v1/galleries/{id}
pub async fn update_gallery(
    admin: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    ValidatedJson(input): ValidatedJson<UpdateGallery>,
) -> AppResult<Json<DataResponse<PhotoGallery>>> {
    if let Some(slug) = input.slug.as_deref() {
        ensure_available(&state.pool, SlugScope::Gallery, id, slug).await?;
    }

    let gallery = GalleryRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| gallery_not_found(id))?;

    tracing::info!(admin = %admin.username, gallery_id = id, "Gallery updated");

    Ok(Json(DataResponse { data: gallery }))
}

/// PATCH /api/v1/galleries/{id}/publish
pub async fn publish_gallery(
    admin: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<PhotoGallery>>> {
    set_published(admin, state, id, true).await
}

/// PATCH /api/v1/galleries/{id}/unpublish
pub async fn unpublish_gallery(
    admin: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<PhotoGallery>>> {
    set_published(admin, state, id, false).await
}

async fn set_published(
    admin: AdminSession,
    state: AppState,
    id: DbId,
    publish: bool,
) -> AppResult<Json<DataResponse<PhotoGallery>>> {
    let gallery = GalleryRepo::set_published(&state.pool, id, publish)
        .await?
        .ok_or_else(|| gallery_not_found(id))?;

    tracing::info!(
        admin = %admin.username,
        gallery_id = id,
        is_published = publish,
        "Gallery visibility changed",
    );

    Ok(Json(DataResponse { data: gallery }))
}

/// DELETE /api/v1/galleries/{id}
///
/// Photos go with the gallery (`ON DELETE CASCADE`).
pub async fn delete_gallery(
    admin: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<DeleteAck>>> {
    if !GalleryRepo::delete(&state.pool, id).await? {
        return Err(gallery_not_found(id));
    }
    tracing::info!(admin = %admin.username, gallery_id = id, "Gallery deleted");
    Ok(Json(DeleteAck::new(id)))
}

// ---------------------------------------------------------------------------
// Photos
// ---------------------------------------------------------------------------

/// GET /api/v1/galleries/{id}/photos
pub async fn list_photos(
    State(state): State<AppState>,
    admin: OptionalAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<GalleryPhoto>>>> {
    visible_gallery(&state.pool, id, admin.is_admin()).await?;
    let photos = GalleryPhotoRepo::list_for_gallery(&state.pool, id).await?;
    Ok(Json(DataResponse { data: photos }))
}

/// POST /api/v1/galleries/{id}/photos
///
/// Without an explicit `order` the photo is appended at the end.
pub async fn add_photo(
    admin: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    ValidatedJson(input): ValidatedJson<CreateGalleryPhoto>,
) -> AppResult<(StatusCode, Json<DataResponse<GalleryPhoto>>)> {
    ensure_gallery(&state.pool, id).await?;
    let photo = GalleryPhotoRepo::create(&state.pool, id, &input).await?;

    tracing::info!(
        admin = %admin.username,
        gallery_id = id,
        photo_id = photo.id,
        "Gallery photo added",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: photo })))
}

/// POST /api/v1/galleries/{id}/photos/batch
///
/// Each url succeeds or fails on its own. Valid urls are appended in input
/// order; invalid ones are reported with their input index. Answers 201 when
/// at least one photo was created and 400 when none was.
pub async fn batch_add_photos(
    admin: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    ValidatedJson(input): ValidatedJson<BatchCreatePhotos>,
) -> AppResult<(StatusCode, Json<DataResponse<BatchOutcome<GalleryPhoto>>>)> {
    ensure_gallery(&state.pool, id).await?;

    let (accepted, failed) = partition(&input.urls, |url| {
        let url = url.trim();
        if is_valid_media_url(url) {
            Ok(url.to_string())
        } else {
            Err("must be a valid URL")
        }
    });

    let urls: Vec<String> = accepted.into_iter().map(|(_, url)| url).collect();
    let created = if urls.is_empty() {
        Vec::new()
    } else {
        GalleryPhotoRepo::create_batch(&state.pool, id, &urls).await?
    };

    let outcome = BatchOutcome { created, failed };
    let status = if outcome.is_complete_failure() {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::CREATED
    };

    tracing::info!(
        admin = %admin.username,
        gallery_id = id,
        created = outcome.created.len(),
        failed = outcome.failed.len(),
        "Gallery photo batch processed",
    );

    Ok((status, Json(DataResponse { data: outcome })))
}

/// PUT /api/v1/galleries/{id}/photos/reorder
///
/// `photoIds` must list every photo of the gallery exactly once; the new
/// order is written in a single transaction.
pub async fn reorder_photos(
    admin: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    ValidatedJson(input): ValidatedJson<ReorderPhotos>,
) -> AppResult<Json<DataResponse<Vec<GalleryPhoto>>>> {
    ensure_gallery(&state.pool, id).await?;

    let photos = GalleryPhotoRepo::reorder(&state.pool, id, &input.photo_ids)
        .await?
        .ok_or_else(|| {
            CoreError::field("photo_ids", "must list every photo of the gallery exactly once")
        })?;

    tracing::info!(
        admin = %admin.username,
        gallery_id = id,
        count = photos.len(),
        "Gallery photos reordered",
    );

    Ok(Json(DataResponse { data: photos }))
}

/// PUT /api/v1/galleries/photos/{photo_id}
pub async fn update_photo(
    admin: AdminSession,
    State(state): State<AppState>,
    Path(photo_id): Path<DbId>,
    ValidatedJson(input): ValidatedJson<UpdateGalleryPhoto>,
) -> AppResult<Json<DataResponse<GalleryPhoto>>> {
    let photo = GalleryPhotoRepo::update(&state.pool, photo_id, &input)
        .await?
        .ok_or_else(|| photo_not_found(photo_id))?;

    tracing::info!(admin = %admin.username, photo_id, "Gallery photo updated");

    Ok(Json(DataResponse { data: photo }))
}

/// DELETE /api/v1/galleries/photos/{photo_id}
///
/// The remaining photos are renumbered so `order` stays dense.
pub async fn delete_photo(
    admin: AdminSession,
    State(state): State<AppState>,
    Path(photo_id): Path<DbId>,
) -> AppResult<Json<DataResponse<DeleteAck>>> {
    let deleted = GalleryPhotoRepo::delete_and_renumber(&state.pool, photo_id)
        .await?
        .ok_or_else(|| photo_not_found(photo_id))?;

    tracing::info!(
        admin = %admin.username,
        photo_id,
        gallery_id = deleted.gallery_id,
        "Gallery photo deleted",
    );

    Ok(Json(DeleteAck::new(photo_id)))
}
