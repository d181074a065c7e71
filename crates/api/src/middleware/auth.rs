//! JWT-based admin session extractors for Axum handlers.

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::header::{AUTHORIZATION, COOKIE};
use axum::http::request::Parts;
use axum::http::HeaderMap;
use transfer_core::error::CoreError;

use crate::auth::jwt::{validate_token, ADMIN_ROLE};
use crate::error::AppError;
use crate::state::AppState;

/// Cookie the admin panel stores the session token in.
pub const SESSION_COOKIE: &str = "admin_token";

/// Authenticated admin session.
///
/// The token is read from `Authorization: Bearer <token>` or, failing that,
/// from the [`SESSION_COOKIE`] cookie. Use it as an extractor parameter in
/// every mutating handler:
///
/// ```ignore
/// async fn my_handler(admin: AdminSession) -> AppResult<Json<()>> {
///     tracing::info!(admin = %admin.username, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AdminSession {
    pub username: String,
    /// Token id, for audit logs.
    pub token_id: String,
    /// Expiry (UTC Unix timestamp).
    pub expires_at: i64,
}

impl FromRequestParts<AppState> for AdminSession {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = session_token(&parts.headers)?;

        let claims = validate_token(&token, &state.config.jwt).map_err(|_| {
            AppError::Core(CoreError::Unauthorized("Invalid or expired token".into()))
        })?;

        if claims.role != ADMIN_ROLE {
            return Err(AppError::Core(CoreError::Unauthorized(
                "Invalid or expired token".into(),
            )));
        }

        Ok(AdminSession {
            username: claims.sub,
            token_id: claims.jti,
            expires_at: claims.exp,
        })
    }
}

/// Admin session if a valid token was sent, `None` otherwise.
///
/// Public read endpoints use this to widen their visibility filter for the
/// admin panel. A missing, malformed or expired token is treated as an
/// anonymous reader rather than an error.
#[derive(Debug, Clone)]
pub struct OptionalAdmin(pub Option<AdminSession>);

impl OptionalAdmin {
    pub fn is_admin(&self) -> bool {
        self.0.is_some()
    }
}

impl FromRequestParts<AppState> for OptionalAdmin {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(OptionalAdmin(
            AdminSession::from_request_parts(parts, state).await.ok(),
        ))
    }
}

/// Pull the raw token out of the request headers.
fn session_token(headers: &HeaderMap) -> Result<String, AppError> {
    if let Some(auth_header) = headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok()) {
        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid Authorization format. Expected: Bearer <token>".into(),
            ))
        })?;
        return Ok(token.trim().to_string());
    }

    cookie_value(headers, SESSION_COOKIE).ok_or_else(|| {
        AppError::Core(CoreError::Unauthorized(
            "Missing Authorization header".into(),
        ))
    })
}

/// Value of the cookie `name`, across all `Cookie` headers.
fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    #[test]
    fn bearer_header_wins() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer abc"));
        headers.insert(COOKIE, HeaderValue::from_static("admin_token=def"));
        assert_eq!(session_token(&headers).unwrap(), "abc");
    }

    #[test]
    fn cookie_fallback() {
        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            HeaderValue::from_static("theme=dark; admin_token=def; lang=ru"),
        );
        assert_eq!(session_token(&headers).unwrap(), "def");
    }

    #[test]
    fn missing_or_malformed() {
        assert!(session_token(&HeaderMap::new()).is_err());

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Basic Zm9vOmJhcg=="));
        assert!(session_token(&headers).is_err());

        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_static("admin_token="));
        assert!(session_token(&headers).is_err());
    }
}
