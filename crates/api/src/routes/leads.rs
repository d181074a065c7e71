//! Route definitions for inbound leads.
//!
//! Two routers are provided:
//! - `applications_router()` for contact requests mounted at `/applications`
//! - `transfers_router()` for transfer bookings mounted at `/transfers`

use axum::routing::{get, patch};
use axum::Router;

use crate::handlers::lead;
use crate::state::AppState;

/// Contact request routes mounted at `/applications`.
///
/// ```text
/// POST   /              -> create_application (public)
/// GET    /              -> list_applications
/// GET    /{id}          -> get_application
/// DELETE /{id}          -> delete_application
/// PATCH  /{id}/status   -> update_application_status
/// ```
pub fn applications_router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(lead::list_applications).post(lead::create_application),
        )
        .route(
            "/{id}",
            get(lead::get_application).delete(lead::delete_application),
        )
        .route("/{id}/status", patch(lead::update_application_status))
}

/// Transfer booking routes mounted at `/transfers`.
///
/// ```text
/// POST   /              -> create_transfer (public)
/// GET    /              -> list_transfers
/// GET    /{id}          -> get_transfer
/// DELETE /{id}          -> delete_transfer
/// PATCH  /{id}/status   -> update_transfer_status
/// ```
pub fn transfers_router() -> Router<AppState> {
    Router::new()
        .route("/", get(lead::list_transfers).post(lead::create_transfer))
        .route(
            "/{id}",
            get(lead::get_transfer).delete(lead::delete_transfer),
        )
        .route("/{id}/status", patch(lead::update_transfer_status))
}
