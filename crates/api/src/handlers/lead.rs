//! Handlers for incoming leads: callback applications and transfer bookings.
//!
//! Submissions are public. Everything else is for the admin panel.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use transfer_core::error::CoreError;
use transfer_core::leads::{normalize_status, validate_trip_dates};
use transfer_core::pagination::PageRequest;
use transfer_core::types::DbId;
use transfer_db::models::lead::{
    ApplicationRequest, CreateApplicationRequest, CreateTransferRequest, TransferRequest,
    UpdateLeadStatus,
};
use transfer_db::repositories::{ApplicationRequestRepo, TransferRequestRepo, VehicleRepo};

use crate::error::{AppError, AppResult};
use crate::extract::ValidatedJson;
use crate::middleware::auth::AdminSession;
use crate::query::{text_filter, LeadListParams};
use crate::response::{DataResponse, DeleteAck, Paginated};
use crate::state::AppState;

fn application_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "application request",
        id,
    })
}

fn transfer_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "transfer request",
        id,
    })
}

// ---------------------------------------------------------------------------
// Application requests
// ---------------------------------------------------------------------------

/// POST /api/v1/applications
pub async fn create_application(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<CreateApplicationRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<ApplicationRequest>>)> {
    let lead = ApplicationRequestRepo::create(&state.pool, &input).await?;

    tracing::info!(
        application_id = lead.id,
        contact_method = %lead.contact_method,
        "Application request received",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: lead })))
}

/// GET /api/v1/applications
pub async fn list_applications(
    _admin: AdminSession,
    State(state): State<AppState>,
    Query(params): Query<LeadListParams>,
) -> AppResult<Json<Paginated<ApplicationRequest>>> {
    let status = text_filter(&params.status).map(str::to_lowercase);
    let status = status.as_deref();
    let page = PageRequest::new(params.page, params.limit);

    let leads = ApplicationRequestRepo::list(&state.pool, status, page.limit, page.offset()).await?;
    let total = ApplicationRequestRepo::count(&state.pool, status).await?;

    Ok(Json(Paginated {
        data: leads,
        meta: page.meta(total),
    }))
}

/// GET /api/v1/applications/{id}
pub async fn get_application(
    _admin: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<ApplicationRequest>>> {
    let lead = ApplicationRequestRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| application_not_found(id))?;
    Ok(Json(DataResponse { data: lead }))
}

/// PATCH /api/v1/applications/{id}/status
pub async fn update_application_status(
    admin: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    ValidatedJson(input): ValidatedJson<UpdateLeadStatus>,
) -> AppResult<Json<DataResponse<ApplicationRequest>>> {
    let status = normalize_status(&input.status)?;
    let lead = ApplicationRequestRepo::update_status(&state.pool, id, &status)
        .await?
        .ok_or_else(|| application_not_found(id))?;

    tracing::info!(
        admin = %admin.username,
        application_id = id,
        status = %lead.status,
        "Application status changed",
    );

    Ok(Json(DataResponse { data: lead }))
}

/// DELETE /api/v1/applications/{id}
pub async fn delete_application(
    admin: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<DeleteAck>>> {
    if !ApplicationRequestRepo::delete(&state.pool, id).await? {
        return Err(application_not_found(id));
    }
    tracing::info!(admin = %admin.username, application_id = id, "Application request deleted");
    Ok(Json(DeleteAck::new(id)))
}

// ---------------------------------------------------------------------------
// Transfer requests
// ---------------------------------------------------------------------------

/// POST /api/v1/transfers
///
/// The return date may not precede the trip date, and a referenced vehicle
/// must exist.
pub async fn create_transfer(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<CreateTransferRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<TransferRequest>>)> {
    let Some(date) = input.date else {
        return Err(CoreError::field("date", "is required").into());
    };
    validate_trip_dates(date, input.return_date)?;

    if let Some(vehicle_id) = input.vehicle_id {
        if !VehicleRepo::exists(&state.pool, vehicle_id).await? {
            return Err(CoreError::field("vehicle_id", "vehicle does not exist").into());
        }
    }

    let lead = TransferRequestRepo::create(&state.pool, &input).await?;

    tracing::info!(
        transfer_id = lead.id,
        date = %lead.date,
        vehicle_id = ?lead.vehicle_id,
        "Transfer request received",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: lead })))
}

/// GET /api/v1/transfers
pub async fn list_transfers(
    _admin: AdminSession,
    State(state): State<AppState>,
    Query(params): Query<LeadListParams>,
) -> AppResult<Json<Paginated<TransferRequest>>> {
    let status = text_filter(&params.status).map(str::to_lowercase);
    let status = status.as_deref();
    let page = PageRequest::new(params.page, params.limit);

    let leads = TransferRequestRepo::list(&state.pool, status, page.limit, page.offset()).await?;
    let total = TransferRequestRepo::count(&state.pool, status).await?;

    Ok(Json(Paginated {
        data: leads,
        meta: page.meta(total),
    }))
}

/// GET /api/v1/transfers/{id}
pub async fn get_transfer(
    _admin: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<TransferRequest>>> {
    let lead = TransferRequestRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| transfer_not_found(id))?;
    Ok(Json(DataResponse { data: lead }))
}

/// PATCH /api/v1/transfers/{id}/status
pub async fn update_transfer_status(
    admin: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    ValidatedJson(input): ValidatedJson<UpdateLeadStatus>,
) -> AppResult<Json<DataResponse<TransferRequest>>> {
    let status = normalize_status(&input.status)?;
    let lead = TransferRequestRepo::update_status(&state.pool, id, &status)
        .await?
        .ok_or_else(|| transfer_not_found(id))?;

    tracing::info!(
        admin = %admin.username,
        transfer_id = id,
        status = %lead.status,
        "Transfer status changed",
    );

    Ok(Json(DataResponse { data: lead }))
}

/// DELETE /api/v1/transfers/{id}
pub async fn delete_transfer(
    admin: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<DeleteAck>>> {
    if !TransferRequestRepo::delete(&state.pool, id).await? {
        return Err(transfer_not_found(id));
    }
    tracing::info!(admin = %admin.username, transfer_id = id, "Transfer request deleted");
    Ok(Json(DeleteAck::new(id)))
}
