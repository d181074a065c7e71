use axum::routing::post;
use axum::Router;

use crate::handlers::upload;
use crate::state::AppState;

/// Upload route mounted at `/upload`.
///
/// ```text
/// POST /   -> upload_image (multipart)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", post(upload::upload_image))
}
