use std::path::PathBuf;

use transfer_core::upload::DEFAULT_MAX_UPLOAD_BYTES;

use crate::auth::jwt::JwtConfig;

/// Credentials used by the development fallback. Never accepted outside
/// [`AppEnv::Development`].
const DEV_ADMIN_USERNAME: &str = "admin";
const DEV_ADMIN_PASSWORD: &str = "admin";
const DEV_JWT_SECRET: &str = "development-only-secret-do-not-deploy";
const DEV_BASE_URL: &str = "http://localhost:3000";

const DEFAULT_JWT_EXPIRY_HOURS: i64 = 24;

/// Errors raised while loading [`ServerConfig`]. The binary refuses to start
/// on any of them.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{key} has an invalid value '{value}': {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Deployment mode, from `APP_ENV`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    fn parse(value: &str) -> Result<Self, ConfigError> {
        match value.to_ascii_lowercase().as_str() {
            "development" | "dev" | "local" => Ok(AppEnv::Development),
            "production" | "prod" => Ok(AppEnv::Production),
            _ => Err(ConfigError::Invalid {
                key: "APP_ENV",
                value: value.to_string(),
                reason: "expected development or production".into(),
            }),
        }
    }

    pub fn is_development(self) -> bool {
        matches!(self, AppEnv::Development)
    }
}

/// The single admin credential pair.
#[derive(Clone)]
pub struct AdminCredentials {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for AdminCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminCredentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Remote image host used when an upload asks for it.
#[derive(Debug, Clone)]
pub struct ImageHostConfig {
    pub upload_url: String,
    pub api_key: String,
}

#[derive(Debug, Clone)]
pub struct UploadConfig {
    /// Directory local uploads are written to and served from.
    pub dir: PathBuf,
    pub max_bytes: usize,
    /// `None` disables remote uploads; every file is stored locally.
    pub image_host: Option<ImageHostConfig>,
}

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    pub environment: AppEnv,
    /// Public site URL without a trailing slash. Feed links are built on it.
    pub base_url: String,
    pub admin: AdminCredentials,
    pub jwt: JwtConfig,
    pub upload: UploadConfig,
    /// IndexNow verification key served at `/indexnow.txt`.
    pub indexnow_key: Option<String>,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                 | Default                                  |
    /// |-------------------------|------------------------------------------|
    /// | `HOST`                  | `0.0.0.0`                                |
    /// | `PORT`                  | `3000`                                   |
    /// | `CORS_ORIGINS`          | `http://localhost:3000`                  |
    /// | `REQUEST_TIMEOUT_SECS`  | `30`                                     |
    /// | `APP_ENV`               | `production`                             |
    /// | `BASE_URL`              | required (dev: `http://localhost:3000`)  |
    /// | `ADMIN_USERNAME`        | required (dev: `admin`)                  |
    /// | `ADMIN_PASSWORD`        | required (dev: `admin`)                  |
    /// | `JWT_SECRET`            | required (dev: fixed development secret) |
    /// | `JWT_EXPIRY_HOURS`      | `24`                                     |
    /// | `UPLOAD_DIR`            | `uploads`                                |
    /// | `UPLOAD_MAX_BYTES`      | `10485760`                               |
    /// | `IMAGE_HOST_UPLOAD_URL` | unset                                    |
    /// | `IMAGE_HOST_API_KEY`    | unset                                    |
    /// | `INDEXNOW_KEY`          | unset                                    |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup. Every value
    /// passes through [`sanitize_env_value`] first.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).and_then(|v| sanitize_env_value(&v));

        let environment = match get("APP_ENV") {
            Some(value) => AppEnv::parse(&value)?,
            None => AppEnv::Production,
        };

        // Required in production, development fallback otherwise.
        let required = |key: &'static str, dev_default: &str| -> Result<String, ConfigError> {
            match get(key) {
                Some(value) => Ok(value),
                None if environment.is_development() => {
                    tracing::warn!(key, "Not set, using the development fallback");
                    Ok(dev_default.to_string())
                }
                None => Err(ConfigError::Missing(key)),
            }
        };

        let host = get("HOST").unwrap_or_else(|| "0.0.0.0".into());
        let port = parse_or("PORT", get("PORT"), 3000u16)?;

        let cors_origins: Vec<String> = get("CORS_ORIGINS")
            .unwrap_or_else(|| "http://localhost:3000".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs = parse_or("REQUEST_TIMEOUT_SECS", get("REQUEST_TIMEOUT_SECS"), 30u64)?;

        let base_url = required("BASE_URL", DEV_BASE_URL)?
            .trim_end_matches('/')
            .to_string();

        let admin = AdminCredentials {
            username: required("ADMIN_USERNAME", DEV_ADMIN_USERNAME)?,
            password: required("ADMIN_PASSWORD", DEV_ADMIN_PASSWORD)?,
        };

        let jwt = JwtConfig {
            secret: required("JWT_SECRET", DEV_JWT_SECRET)?,
            expiry_hours: parse_or(
                "JWT_EXPIRY_HOURS",
                get("JWT_EXPIRY_HOURS"),
                DEFAULT_JWT_EXPIRY_HOURS,
            )?,
        };
        if jwt.expiry_hours <= 0 {
            return Err(ConfigError::Invalid {
                key: "JWT_EXPIRY_HOURS",
                value: jwt.expiry_hours.to_string(),
                reason: "must be positive".into(),
            });
        }

        let image_host = match (get("IMAGE_HOST_UPLOAD_URL"), get("IMAGE_HOST_API_KEY")) {
            (Some(upload_url), Some(api_key)) => Some(ImageHostConfig {
                upload_url,
                api_key,
            }),
            _ => None,
        };

        let upload = UploadConfig {
            dir: PathBuf::from(get("UPLOAD_DIR").unwrap_or_else(|| "uploads".into())),
            max_bytes: parse_or(
                "UPLOAD_MAX_BYTES",
                get("UPLOAD_MAX_BYTES"),
                DEFAULT_MAX_UPLOAD_BYTES,
            )?,
            image_host,
        };

        Ok(Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            environment,
            base_url,
            admin,
            jwt,
            upload,
            indexnow_key: get("INDEXNOW_KEY"),
        })
    }
}

/// Normalize a raw environment value: trim whitespace, strip one pair of
/// matching surrounding quotes, and treat an empty result as unset.
pub fn sanitize_env_value(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    let unquoted = ['"', '\'']
        .iter()
        .find_map(|q| {
            trimmed
                .strip_prefix(*q)
                .and_then(|rest| rest.strip_suffix(*q))
        })
        .unwrap_or(trimmed)
        .trim();
    (!unquoted.is_empty()).then(|| unquoted.to_string())
}

fn parse_or<T>(key: &'static str, value: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match value {
        None => Ok(default),
        Some(value) => value.parse().map_err(|e: T::Err| ConfigError::Invalid {
            key,
            reason: e.to_string(),
            value,
        }),
    }
}
