//! Gateway configuration parsed from environment variables.
//!
//! DESIGN
//! ======
//! `GatewayConfig` is built exactly once in `main` and handed to the services
//! that need it. Nothing reads the environment after startup, so the signing
//! secret and the probe timeout are immutable for the process lifetime.

use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_SECRET_KEY: &str = "dev-secret-key-change-in-production";
pub const DEFAULT_TOKEN_TTL_MINUTES: u64 = 60;
pub const DEFAULT_PROBE_TIMEOUT_SECS: u64 = 5;
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_USERS_FILE: &str = "users.json";
pub const DEFAULT_MODULES_FILE: &str = "modules.json";
pub const DEFAULT_SERVICE_NAME: &str = "module-gateway";
pub const DEFAULT_CORS_ORIGINS: &str = "http://localhost:3000,http://wrapper-frontend:3000";

// =============================================================================
// ERROR TYPE
// =============================================================================

/// Failures while loading configuration or the static registry files.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("duplicate username in credential list: {0}")]
    DuplicateUsername(String),
    #[error("duplicate module id in registry: {0}")]
    DuplicateModule(String),
    #[error("invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },
}

// =============================================================================
// CONFIG
// =============================================================================

/// Allowed CORS origins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorsOrigins {
    Any,
    List(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    pub secret_key: String,
    pub token_ttl: Duration,
    pub probe_timeout: Duration,
    pub host: String,
    pub port: u16,
    pub users_file: PathBuf,
    pub modules_file: PathBuf,
    pub service_name: String,
    pub cors_origins: CorsOrigins,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            secret_key: DEFAULT_SECRET_KEY.to_owned(),
            token_ttl: Duration::from_secs(DEFAULT_TOKEN_TTL_MINUTES * 60),
            probe_timeout: Duration::from_secs(DEFAULT_PROBE_TIMEOUT_SECS),
            host: DEFAULT_HOST.to_owned(),
            port: DEFAULT_PORT,
            users_file: PathBuf::from(DEFAULT_USERS_FILE),
            modules_file: PathBuf::from(DEFAULT_MODULES_FILE),
            service_name: DEFAULT_SERVICE_NAME.to_owned(),
            cors_origins: parse_origins(DEFAULT_CORS_ORIGINS),
        }
    }
}

impl GatewayConfig {
    /// Build typed gateway config from environment variables.
    ///
    /// All optional:
    /// - `SECRET_KEY`: token signing secret (insecure development default)
    /// - `ACCESS_TOKEN_EXPIRE_MINUTES`: default 60
    /// - `PROBE_TIMEOUT_SECS`: default 5
    /// - `HOST` / `PORT`: default `0.0.0.0:8080`
    /// - `USERS_FILE` / `MODULES_FILE`: default `users.json` / `modules.json`
    /// - `SERVICE_NAME`: reported by `GET /health`
    /// - `CORS_ALLOWED_ORIGINS`: comma-separated list, `*` for any
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if a numeric variable does not
    /// parse, a duration is zero, or a duration overflows when converted to
    /// seconds.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary key lookup. `from_env` delegates here.
    ///
    /// # Errors
    ///
    /// See [`GatewayConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let token_ttl = parse_duration(&lookup, "ACCESS_TOKEN_EXPIRE_MINUTES", defaults.token_ttl, 60)?;
        let probe_timeout = parse_duration(&lookup, "PROBE_TIMEOUT_SECS", defaults.probe_timeout, 1)?;
        let port = match lookup("PORT") {
            Some(raw) => match raw.trim().parse::<u16>() {
                Ok(port) => port,
                Err(_) => return Err(ConfigError::InvalidValue { key: "PORT", value: raw }),
            },
            None => defaults.port,
        };

        Ok(Self {
            secret_key: lookup("SECRET_KEY").unwrap_or(defaults.secret_key),
            token_ttl,
            probe_timeout,
            host: lookup("HOST").unwrap_or(defaults.host),
            port,
            users_file: lookup("USERS_FILE").map_or(defaults.users_file, PathBuf::from),
            modules_file: lookup("MODULES_FILE").map_or(defaults.modules_file, PathBuf::from),
            service_name: lookup("SERVICE_NAME").unwrap_or(defaults.service_name),
            cors_origins: lookup("CORS_ALLOWED_ORIGINS").map_or(defaults.cors_origins, |raw| parse_origins(&raw)),
        })
    }

    /// True while the signing secret is still the development default.
    #[must_use]
    pub fn uses_default_secret(&self) -> bool {
        self.secret_key == DEFAULT_SECRET_KEY
    }

    /// `host:port` string suitable for `TcpListener::bind`.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Parse a positive count of `unit_secs`-second units into a `Duration`.
/// Zero, non-numeric and overflowing values are rejected.
fn parse_duration<F>(lookup: &F, key: &'static str, default: Duration, unit_secs: u64) -> Result<Duration, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(key) else {
        return Ok(default);
    };
    match raw.trim().parse::<u64>().ok().filter(|&value| value > 0).and_then(|value| value.checked_mul(unit_secs)) {
        Some(secs) => Ok(Duration::from_secs(secs)),
        None => Err(ConfigError::InvalidValue { key, value: raw }),
    }
}

fn parse_origins(raw: &str) -> CorsOrigins {
    let origins: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_owned)
        .collect();

    if origins.iter().any(|origin| origin == "*") {
        CorsOrigins::Any
    } else {
        CorsOrigins::List(origins)
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
