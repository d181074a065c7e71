use axum::routing::{get, patch, post, put};
use axum::Router;

use crate::handlers::gallery;
use crate::state::AppState;

/// Gallery and photo routes mounted at `/galleries`.
///
/// ```text
/// GET    /                        -> list_galleries
/// POST   /                        -> create_gallery
/// GET    /slug/{slug}             -> get_gallery_by_slug
/// GET    /{id}                    -> get_gallery
/// PUT    /{id}                    -> update_gallery
/// DELETE /{id}                    -> delete_gallery
/// PATCH  /{id}/publish            -> publish_gallery
/// PATCH  /{id}/unpublish          -> unpublish_gallery
/// GET    /{id}/photos             -> list_photos
/// POST   /{id}/photos             -> add_photo
/// POST   /{id}/photos/batch       -> batch_add_photos
/// PUT    /{id}/photos/reorder     -> reorder_photos
/// PUT    /photos/{photo_id}       -> update_photo
/// DELETE /photos/{photo_id}       -> delete_photo
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(gallery::list_galleries).post(gallery::create_gallery))
        .route("/slug/{slug}", get(gallery::get_gallery_by_slug))
        .route(
            "/{id}",
            get(gallery::get_gallery)
                .put(gallery::update_gallery)
                .delete(gallery::delete_gallery),
        )
        .route("/{id}/publish", patch(gallery::publish_gallery))
        .route("/{id}/unpublish", patch(gallery::unpublish_gallery))
        .route(
            "/{id}/photos",
            get(gallery::list_photos).post(gallery::add_photo),
        )
        .route("/{id}/photos/batch", post(gallery::batch_add_photos))
        .route("/{id}/photos/reorder", put(gallery::reorder_photos))
        .route(
            "/photos/{photo_id}",
            put(gallery::update_photo).delete(gallery::delete_photo),
        )
}
