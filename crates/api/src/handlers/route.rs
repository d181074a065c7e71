//! Handlers for the `/routes` resource (transfer routes between cities).

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use transfer_core::error::CoreError;
use transfer_core::pagination::PageRequest;
use transfer_core::types::DbId;
use transfer_db::models::route::{CreateRoute, Route, UpdateRoute};
use transfer_db::repositories::RouteRepo;

use crate::error::{AppError, AppResult};
use crate::extract::ValidatedJson;
use crate::middleware::auth::{AdminSession, OptionalAdmin};
use crate::query::{text_filter, RouteListParams};
use crate::response::{DataResponse, DeleteAck, Paginated};
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "route", id })
}

/// GET /api/v1/routes
///
/// Most popular first. `origin` / `destination` match city names without
/// regard to case. Inactive routes need an admin token and `showAll=true`.
pub async fn list_routes(
    State(state): State<AppState>,
    admin: OptionalAdmin,
    Query(params): Query<RouteListParams>,
) -> AppResult<Json<Paginated<Route>>> {
    let active_only = !(admin.is_admin() && params.show_all);
    let origin = text_filter(&params.origin);
    let destination = text_filter(&params.destination);
    let page = PageRequest::new(params.page, params.limit);

    let routes = RouteRepo::list(
        &state.pool,
        active_only,
        origin,
        destination,
        page.limit,
        page.offset(),
    )
    .await?;
    let total = RouteRepo::count(&state.pool, active_only, origin, destination).await?;

    Ok(Json(Paginated {
        data: routes,
        meta: page.meta(total),
    }))
}

/// GET /api/v1/routes/{id}
pub async fn get_route(
    State(state): State<AppState>,
    admin: OptionalAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Route>>> {
    let route = RouteRepo::find_by_id(&state.pool, id)
        .await?
        .filter(|r| r.is_active || admin.is_admin())
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: route }))
}

/// POST /api/v1/routes
pub async fn create_route(
    admin: AdminSession,
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<CreateRoute>,
) -> AppResult<(StatusCode, Json<DataResponse<Route>>)> {
    let route = RouteRepo::create(&state.pool, &input).await?;

    tracing::info!(
        admin = %admin.username,
        route_id = route.id,
        origin = %route.origin_city,
        destination = %route.destination_city,
        "Route created",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: route })))
}

/// PUT /api/v1/routes/{id}
pub async fn update_route(
    admin: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    ValidatedJson(input): ValidatedJson<UpdateRoute>,
) -> AppResult<Json<DataResponse<Route>>> {
    let route = RouteRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(admin = %admin.username, route_id = id, "Route updated");

    Ok(Json(DataResponse { data: route }))
}

/// DELETE /api/v1/routes/{id}
pub async fn delete_route(
    admin: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<DeleteAck>>> {
    if !RouteRepo::delete(&state.pool, id).await? {
        return Err(not_found(id));
    }
    tracing::info!(admin = %admin.username, route_id = id, "Route deleted");
    Ok(Json(DeleteAck::new(id)))
}
