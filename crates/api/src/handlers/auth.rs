//! Handlers for the `/auth` resource (login, session, logout).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use transfer_core::error::CoreError;

use crate::auth::jwt::generate_token;
use crate::auth::password::{constant_time_eq, verify_password};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AdminSession;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Successful login response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    /// Token lifetime in seconds.
    pub expires_in: i64,
    pub username: String,
}

/// Current session, as seen by `GET /auth/session`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionInfo {
    pub username: String,
    pub expires_at: i64,
}

fn invalid_credentials() -> AppError {
    AppError::Core(CoreError::Unauthorized(
        "Invalid username or password".into(),
    ))
}

/// POST /api/v1/auth/login
///
/// Exchange the configured admin credentials for a session token.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let username_ok = constant_time_eq(input.username.trim(), &state.config.admin.username);

    // Verify even on a wrong username so both failures cost the same.
    let password_ok = verify_password(&input.password, &state.admin_password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;

    if !(username_ok && password_ok) {
        tracing::warn!(username = %input.username, "Failed admin login");
        return Err(invalid_credentials());
    }

    let token = generate_token(&state.config.admin.username, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    tracing::info!(username = %state.config.admin.username, "Admin logged in");

    Ok(Json(LoginResponse {
        token,
        expires_in: state.config.jwt.expiry_secs(),
        username: state.config.admin.username.clone(),
    }))
}

/// GET /api/v1/auth/session
pub async fn session(admin: AdminSession) -> Json<DataResponse<SessionInfo>> {
    Json(DataResponse {
        data: SessionInfo {
            username: admin.username,
            expires_at: admin.expires_at,
        },
    })
}

/// POST /api/v1/auth/logout
///
/// Tokens are stateless, so this only records the event; the client drops
/// its copy.
pub async fn logout(admin: AdminSession) -> StatusCode {
    tracing::info!(username = %admin.username, token_id = %admin.token_id, "Admin logged out");
    StatusCode::NO_CONTENT
}
