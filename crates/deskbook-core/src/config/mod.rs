//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML via the `config`
//! crate, with `DESKBOOK__SECTION__KEY` environment variables layered on
//! top. Each sub-module represents a logical configuration section.

pub mod directory;
pub mod floor;
pub mod logging;
pub mod resolver;

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

pub use self::directory::DirectoryConfig;
pub use self::floor::{DeskMapping, FloorConfig};
pub use self::logging::LoggingConfig;
pub use self::resolver::{OpenEndedBookingPolicy, ResolverConfig};

use crate::error::AppError;

/// Accepted values of `logging.format`.
const LOG_FORMATS: [&str; 2] = ["pretty", "json"];

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Remote desk API settings.
    pub directory: DirectoryConfig,
    /// Availability resolver settings.
    #[serde(default)]
    pub resolver: ResolverConfig,
    /// Floor plan mapping and render settings.
    #[serde(default)]
    pub floor: FloorConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file, overlaid with `DESKBOOK__*`
    /// environment variables, and validate it.
    pub fn load(path: &str) -> Result<Self, AppError> {
        if !Path::new(path).exists() {
            return Err(AppError::configuration(format!(
                "Configuration file '{path}' does not exist"
            )));
        }

        let config = config::Config::builder()
            .add_source(config::File::from(Path::new(path)))
            .add_source(
                config::Environment::with_prefix("DESKBOOK")
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
        tracing::debug!(
            path,
            desks = parsed.floor.desks.len(),
            "Configuration loaded"
        );
        Ok(parsed)
    }

    /// Parse configuration from an in-memory TOML document and validate it.
    pub fn from_toml_str(toml: &str) -> Result<Self, AppError> {
        let parsed: Self = config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()?
            .try_deserialize()?;

        parsed.validate()?;
        Ok(parsed)
    }

    /// Check cross-field constraints that serde cannot express.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.directory.base_url.trim().is_empty() {
            return Err(AppError::configuration("directory.base_url must not be empty"));
        }
        if self.directory.poll_interval_seconds == 0 {
            return Err(AppError::configuration(
                "directory.poll_interval_seconds must be greater than zero",
            ));
        }
        if self.directory.request_timeout_seconds == 0 {
            return Err(AppError::configuration(
                "directory.request_timeout_seconds must be greater than zero",
            ));
        }
        if self.floor.render_interval_seconds == 0 {
            return Err(AppError::configuration(
                "floor.render_interval_seconds must be greater than zero",
            ));
        }

        if !LOG_FORMATS.contains(&self.logging.format.as_str()) {
            return Err(AppError::configuration(format!(
                "logging.format must be one of {}, got '{}'",
                LOG_FORMATS.join(", "),
                self.logging.format
            )));
        }

        let mut keys = HashSet::new();
        let mut locations = HashSet::new();
        for mapping in &self.floor.desks {
            if !keys.insert(&mapping.key) {
                return Err(AppError::configuration(format!(
                    "Desk key '{}' is mapped more than once",
                    mapping.key
                )));
            }
            if !locations.insert(&mapping.location_id) {
                return Err(AppError::configuration(format!(
                    "Location '{}' is mapped more than once",
                    mapping.location_id
                )));
            }
        }

        Ok(())
    }
}
