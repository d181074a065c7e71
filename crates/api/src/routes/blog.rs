use axum::routing::{get, patch};
use axum::Router;

use crate::handlers::blog;
use crate::state::AppState;

/// Blog routes mounted at `/blog`.
///
/// ```text
/// GET    /                  -> list_posts
/// POST   /                  -> create_post
/// GET    /slug/{slug}       -> get_post_by_slug
/// GET    /{id}              -> get_post
/// PUT    /{id}              -> update_post
/// DELETE /{id}              -> delete_post
/// PATCH  /{id}/publish      -> publish_post
/// PATCH  /{id}/unpublish    -> unpublish_post
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(blog::list_posts).post(blog::create_post))
        .route("/slug/{slug}", get(blog::get_post_by_slug))
        .route(
            "/{id}",
            get(blog::get_post)
                .put(blog::update_post)
                .delete(blog::delete_post),
        )
        .route("/{id}/publish", patch(blog::publish_post))
        .route("/{id}/unpublish", patch(blog::unpublish_post))
}
