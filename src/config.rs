//! Configuration System
//!
//! Layered server configuration: file source (TOML), then environment
//! overrides under the `DEPOT_` prefix, then serde defaults.

use crate::error::ConfigError;
use crate::logging::LoggingConfig;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Directory the depot is bootstrapped from at startup
    #[serde(default = "default_depot_root")]
    pub depot_root: PathBuf,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_depot_root() -> PathBuf {
    PathBuf::from("depot")
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            depot_root: default_depot_root(),
            logging: LoggingConfig::default(),
        }
    }
}

impl ServerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.depot_root.as_os_str().is_empty() {
            return Err(ConfigError::Invalid(
                "depot_root cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Loads configuration from a file plus `DEPOT_*` environment overrides.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load from an explicit config file. The file must exist.
    pub fn load_from_file(path: &Path) -> Result<ServerConfig, ConfigError> {
        Self::build(Some(path), true)
    }

    /// Load from the default location (`depot.toml` in the working
    /// directory, optional) plus environment overrides.
    pub fn load() -> Result<ServerConfig, ConfigError> {
        Self::build(None, false)
    }

    fn build(path: Option<&Path>, required: bool) -> Result<ServerConfig, ConfigError> {
        let mut builder = Config::builder();
        builder = match path {
            Some(path) => builder.add_source(File::from(path).required(required)),
            None => builder.add_source(File::with_name("depot").required(false)),
        };
        // DEPOT_LOGGING__LEVEL=debug style overrides
        builder = builder.add_source(Environment::with_prefix("DEPOT").separator("__"));

        let config: ServerConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }
}
