//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section, and every field has a serde default so that an empty source
//! still yields a usable configuration.

pub mod drive;
pub mod logging;
pub mod pagination;

use serde::{Deserialize, Serialize};

use self::drive::DriveConfig;
use self::logging::LoggingConfig;
use self::pagination::PaginationConfig;

use crate::error::AppError;

/// Root application configuration.
///
/// This struct is the top-level deserialization target for the merged
/// TOML configuration files (default.toml + environment overlay).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Identity of the drive the executor serves.
    #[serde(default)]
    pub drive: DriveConfig,
    /// List endpoint page sizing.
    #[serde(default)]
    pub pagination: PaginationConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from TOML files.
    ///
    /// Merges the default configuration with an environment-specific overlay
    /// and environment variables prefixed with `OFFICEX__`.
    pub fn load(env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("OFFICEX")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))
    }

    /// Parse configuration from an in-memory TOML document.
    pub fn from_toml(source: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::from_str(source, config::FileFormat::Toml))
            .build()?;
        Ok(config.try_deserialize()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_source_uses_defaults() {
        let config = AppConfig::from_toml("").unwrap();
        assert_eq!(config.pagination.default_page_size, 50);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.drive.trash_folder_name, ".trash");
    }

    #[test]
    fn test_overrides() {
        let config = AppConfig::from_toml(
            r#"
            [drive]
            drive_principal = "aaaaa-aa"
            host_url = "https://drive.example"

            [pagination]
            default_page_size = 10
            max_page_size = 20

            [logging]
            format = "pretty"
            "#,
        )
        .unwrap();
        assert_eq!(config.drive.drive_principal, "aaaaa-aa");
        assert_eq!(config.drive.host_url, "https://drive.example");
        assert_eq!(config.pagination.default_page_size, 10);
        assert_eq!(config.pagination.max_page_size, 20);
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_malformed_source_is_configuration_error() {
        let err = AppConfig::from_toml("[pagination]\ndefault_page_size = \"many\"").unwrap_err();
        assert_eq!(err.kind, crate::error::ErrorKind::Configuration);
    }
}
