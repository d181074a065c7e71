use std::sync::Arc;
use std::time::Duration;

use crate::auth::password::hash_password;
use crate::config::ServerConfig;

/// Timeout for calls to the remote image host.
const HTTP_CLIENT_TIMEOUT: Duration = Duration::from_secs(30);

/// Errors raised while assembling [`AppState`].
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("failed to hash the admin password: {0}")]
    PasswordHash(argon2::password_hash::Error),

    #[error("failed to build the HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
/// Nothing in here is mutated after startup; settings are re-read from the
/// database on every request.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: transfer_db::DbPool,
    pub config: Arc<ServerConfig>,
    /// Outbound client for the remote image host.
    pub http: reqwest::Client,
    /// Argon2 hash of the configured admin password.
    pub admin_password_hash: Arc<str>,
}

impl AppState {
    pub fn new(pool: transfer_db::DbPool, config: ServerConfig) -> Result<Self, StateError> {
        let admin_password_hash =
            hash_password(&config.admin.password).map_err(StateError::PasswordHash)?;
        let http = reqwest::Client::builder()
            .timeout(HTTP_CLIENT_TIMEOUT)
            .build()?;

        Ok(Self {
            pool,
            config: Arc::new(config),
            http,
            admin_password_hash: admin_password_hash.into(),
        })
    }
}
