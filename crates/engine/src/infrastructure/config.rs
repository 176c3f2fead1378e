//! Engine configuration from environment variables.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_DB_PATH: &str = "lootforge.db";
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5000;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },
}

/// Runtime settings for the engine binary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    pub db_path: PathBuf,
    pub server_host: String,
    pub server_port: u16,
    /// JSON file of prize types seeded into an empty catalog.
    pub prize_catalog: Option<PathBuf>,
    /// `*` or a comma separated list of origins.
    pub cors_allowed_origins: Option<String>,
    pub busy_timeout: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DEFAULT_DB_PATH),
            server_host: DEFAULT_HOST.to_string(),
            server_port: DEFAULT_PORT,
            prize_catalog: None,
            cors_allowed_origins: None,
            busy_timeout: Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS),
        }
    }
}

impl EngineConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup`, treating blank values as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let defaults = Self::default();

        let server_port = match get("SERVER_PORT").or_else(|| get("PORT")) {
            Some(raw) => raw.parse().map_err(|_| ConfigError::InvalidValue {
                key: "SERVER_PORT",
                value: raw,
            })?,
            None => defaults.server_port,
        };

        let busy_timeout = match get("SQLITE_BUSY_TIMEOUT_MS") {
            Some(raw) => Duration::from_millis(raw.parse().map_err(|_| {
                ConfigError::InvalidValue {
                    key: "SQLITE_BUSY_TIMEOUT_MS",
                    value: raw,
                }
            })?),
            None => defaults.busy_timeout,
        };

        Ok(Self {
            db_path: get("LOOTFORGE_DB").map_or(defaults.db_path, PathBuf::from),
            server_host: get("SERVER_HOST").unwrap_or(defaults.server_host),
            server_port,
            prize_catalog: get("PRIZE_CATALOG").map(PathBuf::from),
            cors_allowed_origins: get("CORS_ALLOWED_ORIGINS"),
            busy_timeout,
        })
    }

    /// Socket address the HTTP server binds to.
    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        let raw = format!("{}:{}", self.server_host, self.server_port);
        raw.parse().map_err(|_| ConfigError::InvalidValue {
            key: "SERVER_HOST",
            value: raw,
        })
    }
}
