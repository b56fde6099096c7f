//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section, and every field has a default so an empty source loads.

pub mod admin;
pub mod api;
pub mod auth;
pub mod logging;
pub mod site;
pub mod status;

use serde::{Deserialize, Serialize};

pub use self::admin::AdminConfig;
pub use self::api::ApiConfig;
pub use self::auth::AuthConfig;
pub use self::logging::LoggingConfig;
pub use self::site::SiteConfig;
pub use self::status::StatusConfig;

use crate::error::AppError;

/// Environment variable prefix for overrides, e.g. `FOLIO__API__BASE_URL`.
pub const ENV_PREFIX: &str = "FOLIO";

/// Root application configuration.
///
/// This struct is the top-level deserialization target for the merged
/// TOML configuration files (default.toml + environment overlay).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Backend API client settings.
    #[serde(default)]
    pub api: ApiConfig,
    /// Authentication settings.
    #[serde(default)]
    pub auth: AuthConfig,
    /// Live status settings.
    #[serde(default)]
    pub status: StatusConfig,
    /// Admin list management settings.
    #[serde(default)]
    pub admin: AdminConfig,
    /// Public site settings.
    #[serde(default)]
    pub site: SiteConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from TOML files under `config/`.
    ///
    /// Merges the default configuration with an environment-specific overlay
    /// and environment variables prefixed with `FOLIO__`.
    pub fn load(env: &str) -> Result<Self, AppError> {
        Self::load_from("config", env)
    }

    /// Load configuration from TOML files under `dir`.
    pub fn load_from(dir: &str, env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name(&format!("{dir}/default")).required(false))
            .add_source(config::File::with_name(&format!("{dir}/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))
    }
}
