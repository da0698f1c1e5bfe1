//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section.

pub mod app;
pub mod auth;
pub mod database;
pub mod logging;
pub mod storage;

use serde::{Deserialize, Serialize};

pub use self::app::{CorsConfig, ServerConfig};
pub use self::auth::AuthConfig;
pub use self::database::DatabaseConfig;
pub use self::logging::LoggingConfig;
pub use self::storage::{StorageConfig, UserDirScheme};

use crate::error::AppError;

/// Environment variable prefix, e.g. `MYCLOUD__SERVER__PORT=9000`.
const ENV_PREFIX: &str = "MYCLOUD";

/// Root application configuration.
///
/// This struct is the top-level deserialization target for the merged
/// TOML configuration files (default.toml + explicit file + environment).
/// Every section has defaults so an empty configuration is valid.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Metadata store settings.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Bearer token settings.
    #[serde(default)]
    pub auth: AuthConfig,
    /// Blob storage settings.
    #[serde(default)]
    pub storage: StorageConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration.
    ///
    /// Merges `config/default.toml`, the optional file at `path`, and
    /// environment variables prefixed with `MYCLOUD` (`__` separated).
    pub fn load(path: Option<&str>) -> Result<Self, AppError> {
        let mut builder = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false));

        if let Some(path) = path {
            builder = builder.add_source(config::File::with_name(path).required(false));
        }

        let config = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        let parsed: Self = config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))?;

        parsed.validate()?;
        Ok(parsed)
    }

    /// Reject settings that would only fail later at runtime.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.storage.max_upload_mb == 0 {
            return Err(AppError::configuration(
                "storage.max_upload_mb must be greater than zero",
            ));
        }
        if self.storage.root_path.trim().is_empty() {
            return Err(AppError::configuration("storage.root_path must not be empty"));
        }
        if self.auth.jwt_secret.len() < 16 {
            return Err(AppError::configuration(
                "auth.jwt_secret must be at least 16 bytes",
            ));
        }
        match self.database.provider.as_str() {
            "memory" => {}
            "postgres" if !self.database.url.is_empty() => {}
            "postgres" => {
                return Err(AppError::configuration(
                    "database.url is required for the postgres provider",
                ));
            }
            other => {
                return Err(AppError::configuration(format!(
                    "Unknown database provider '{other}'"
                )));
            }
        }
        Ok(())
    }
}
