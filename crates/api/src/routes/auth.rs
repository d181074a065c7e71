use axum::routing::{get, post};
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// Admin session routes mounted at `/auth`.
///
/// ```text
/// POST /login     -> login (public)
/// GET  /session   -> session
/// POST /logout    -> logout
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", post(auth::login))
        .route("/session", get(auth::session))
        .route("/logout", post(auth::logout))
}
