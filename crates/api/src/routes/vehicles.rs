use axum::routing::get;
use axum::Router;

use crate::handlers::vehicle;
use crate::state::AppState;

/// Fleet routes mounted at `/vehicles`.
///
/// ```text
/// GET    /        -> list_vehicles
/// POST   /        -> create_vehicle
/// GET    /{id}    -> get_vehicle
/// PUT    /{id}    -> update_vehicle
/// DELETE /{id}    -> delete_vehicle
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(vehicle::list_vehicles).post(vehicle::create_vehicle))
        .route(
            "/{id}",
            get(vehicle::get_vehicle)
                .put(vehicle::update_vehicle)
                .delete(vehicle::delete_vehicle),
        )
}
