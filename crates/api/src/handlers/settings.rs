//! Handlers for the `/settings` singletons.
//!
//! Each settings table holds exactly one row. Reads create it with defaults
//! on first access; writes are partial updates.

use axum::extract::State;
use axum::Json;
use transfer_db::models::settings::{
    BenefitStats, HomeSettings, SiteSettings, TransferConfig, UpdateBenefitStats,
    UpdateHomeSettings, UpdateSiteSettings, UpdateTransferConfig,
};
use transfer_db::repositories::{
    BenefitStatsRepo, HomeSettingsRepo, SiteSettingsRepo, TransferConfigRepo,
};

use crate::error::AppResult;
use crate::extract::ValidatedJson;
use crate::middleware::auth::AdminSession;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/settings/site
pub async fn get_site_settings(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<SiteSettings>>> {
    let data = SiteSettingsRepo::get_or_create_default(&state.pool).await?;
    Ok(Json(DataResponse { data }))
}

/// PUT /api/v1/settings/site
pub async fn update_site_settings(
    admin: AdminSession,
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<UpdateSiteSettings>,
) -> AppResult<Json<DataResponse<SiteSettings>>> {
    let data = SiteSettingsRepo::update(&state.pool, &input).await?;
    tracing::info!(admin = %admin.username, "Site settings updated");
    Ok(Json(DataResponse { data }))
}

/// GET /api/v1/settings/home
pub async fn get_home_settings(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<HomeSettings>>> {
    let data = HomeSettingsRepo::get_or_create_default(&state.pool).await?;
    Ok(Json(DataResponse { data }))
}

/// PUT /api/v1/settings/home
pub async fn update_home_settings(
    admin: AdminSession,
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<UpdateHomeSettings>,
) -> AppResult<Json<DataResponse<HomeSettings>>> {
    let data = HomeSettingsRepo::update(&state.pool, &input).await?;
    tracing::info!(admin = %admin.username, "Home page settings updated");
    Ok(Json(DataResponse { data }))
}

/// GET /api/v1/settings/transfer
pub async fn get_transfer_config(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<TransferConfig>>> {
    let data = TransferConfigRepo::get_or_create_default(&state.pool).await?;
    Ok(Json(DataResponse { data }))
}

/// PUT /api/v1/settings/transfer
pub async fn update_transfer_config(
    admin: AdminSession,
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<UpdateTransferConfig>,
) -> AppResult<Json<DataResponse<TransferConfig>>> {
    let data = TransferConfigRepo::update(&state.pool, &input).await?;
    tracing::info!(admin = %admin.username, currency = %data.currency, "Transfer config updated");
    Ok(Json(DataResponse { data }))
}

/// GET /api/v1/settings/benefits
pub async fn get_benefit_stats(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<BenefitStats>>> {
    let data = BenefitStatsRepo::get_or_create_default(&state.pool).await?;
    Ok(Json(DataResponse { data }))
}

/// PUT /api/v1/settings/benefits
pub async fn update_benefit_stats(
    admin: AdminSession,
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<UpdateBenefitStats>,
) -> AppResult<Json<DataResponse<BenefitStats>>> {
    let data = BenefitStatsRepo::update(&state.pool, &input).await?;
    tracing::info!(admin = %admin.username, "Benefit stats updated");
    Ok(Json(DataResponse { data }))
}
