use axum::routing::get;
use axum::Router;

use crate::handlers::route;
use crate::state::AppState;

/// Priced city-pair routes mounted at `/routes`.
///
/// ```text
/// GET    /        -> list_routes
/// POST   /        -> create_route
/// GET    /{id}    -> get_route
/// PUT    /{id}    -> update_route
/// DELETE /{id}    -> delete_route
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(route::list_routes).post(route::create_route))
        .route(
            "/{id}",
            get(route::get_route)
                .put(route::update_route)
                .delete(route::delete_route),
        )
}
