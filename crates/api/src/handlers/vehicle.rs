//! Handlers for the `/vehicles` resource (the fleet).

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use transfer_core::error::CoreError;
use transfer_core::pagination::PageRequest;
use transfer_core::types::DbId;
use transfer_db::models::vehicle::{CreateVehicle, UpdateVehicle, Vehicle};
use transfer_db::repositories::VehicleRepo;

use crate::error::{AppError, AppResult};
use crate::extract::ValidatedJson;
use crate::middleware::auth::{AdminSession, OptionalAdmin};
use crate::query::{text_filter, VehicleListParams};
use crate::response::{DataResponse, DeleteAck, Paginated};
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "vehicle",
        id,
    })
}

/// GET /api/v1/vehicles
pub async fn list_vehicles(
    State(state): State<AppState>,
    admin: OptionalAdmin,
    Query(params): Query<VehicleListParams>,
) -> AppResult<Json<Paginated<Vehicle>>> {
    let active_only = !(admin.is_admin() && params.show_all);
    let class = text_filter(&params.class);
    let page = PageRequest::new(params.page, params.limit);

    let vehicles =
        VehicleRepo::list(&state.pool, active_only, class, page.limit, page.offset()).await?;
    let total = VehicleRepo::count(&state.pool, active_only, class).await?;

    Ok(Json(Paginated {
        data: vehicles,
        meta: page.meta(total),
    }))
}

/// GET /api/v1/vehicles/{id}
pub async fn get_vehicle(
    State(state): State<AppState>,
    admin: OptionalAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vehicle>>> {
    let vehicle = VehicleRepo::find_by_id(&state.pool, id)
        .await?
        .filter(|v| v.is_active || admin.is_admin())
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: vehicle }))
}

/// POST /api/v1/vehicles
pub async fn create_vehicle(
    admin: AdminSession,
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<CreateVehicle>,
) -> AppResult<(StatusCode, Json<DataResponse<Vehicle>>)> {
    let vehicle = VehicleRepo::create(&state.pool, &input).await?;

    tracing::info!(
        admin = %admin.username,
        vehicle_id = vehicle.id,
        class = %vehicle.class,
        "Vehicle created",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: vehicle })))
}

/// PUT /api/v1/vehicles/{id}
pub async fn update_vehicle(
    admin: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    ValidatedJson(input): ValidatedJson<UpdateVehicle>,
) -> AppResult<Json<DataResponse<Vehicle>>> {
    let vehicle = VehicleRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(admin = %admin.username, vehicle_id = id, "Vehicle updated");

    Ok(Json(DataResponse { data: vehicle }))
}

/// DELETE /api/v1/vehicles/{id}
///
/// Transfer requests that referenced the vehicle keep their row with the
/// reference cleared.
pub async fn delete_vehicle(
    admin: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<DeleteAck>>> {
    if !VehicleRepo::delete(&state.pool, id).await? {
        return Err(not_found(id));
    }
    tracing::info!(admin = %admin.username, vehicle_id = id, "Vehicle deleted");
    Ok(Json(DeleteAck::new(id)))
}
