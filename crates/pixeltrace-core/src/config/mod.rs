//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section. Every field has a default, so the service starts with no
//! configuration files at all.

pub mod app;
pub mod collector;
pub mod geolocation;
pub mod logging;

use std::path::Path;

use serde::{Deserialize, Serialize};

use self::app::ServerConfig;
use self::collector::CollectorConfig;
use self::geolocation::GeolocationConfig;
use self::logging::LoggingConfig;

use crate::error::AppError;

/// Environment variable holding the listening port.
pub const PORT_ENV: &str = "PORT";

/// Prefix for structured environment overrides (`PIXELTRACE__SERVER__HOST`).
pub const ENV_PREFIX: &str = "PIXELTRACE";

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Record collection settings.
    #[serde(default)]
    pub collector: CollectorConfig,
    /// IP geolocation lookup settings.
    #[serde(default)]
    pub geolocation: GeolocationConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from `./config`.
    ///
    /// Merges `config/default.toml` with an environment-specific overlay,
    /// environment variables prefixed with `PIXELTRACE`, and finally the
    /// `PORT` variable.
    pub fn load(env: &str) -> Result<Self, AppError> {
        Self::load_from(Path::new("config"), env, std::env::var(PORT_ENV).ok())
    }

    /// Load configuration from an explicit directory with an explicit port
    /// override.
    pub fn load_from(dir: &Path, env: &str, port: Option<String>) -> Result<Self, AppError> {
        let port = parse_port(port)?;

        let config = config::Config::builder()
            .add_source(config::File::from(dir.join("default")).required(false))
            .add_source(config::File::from(dir.join(env)).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("server.port", port.map(i64::from))?
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))
    }
}

fn parse_port(raw: Option<String>) -> Result<Option<u16>, AppError> {
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value
            .parse::<u16>()
            .map(Some)
            .map_err(|e| AppError::configuration(format!("Invalid {PORT_ENV} '{value}': {e}"))),
    }
}
