//! Logging System
//!
//! Structured logging via the `tracing` crate. Output goes to stderr so the
//! binary's stdout stays reserved for responses.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error, off
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format: json, text (default: text)
    #[serde(default = "default_format")]
    pub format: String,

    /// Enable colored output (text format only)
    #[serde(default = "default_true")]
    pub color: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_format() -> String {
    "text".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_format(),
            color: default_true(),
        }
    }
}

/// Initialize the logging system
///
/// Priority order (highest to lowest):
/// 1. `DEPOT_LOG` environment variable (full filter directive syntax)
/// 2. Configuration file
/// 3. Defaults
pub fn init_logging(config: Option<&LoggingConfig>) -> Result<(), ConfigError> {
    let filter = build_env_filter(config);
    let base_subscriber = Registry::default().with(filter);

    let format = config.map(|c| c.format.as_str()).unwrap_or("text");
    let use_color = config.map(|c| c.color).unwrap_or(true);

    let result = if format == "json" {
        base_subscriber
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_writer(std::io::stderr),
            )
            .try_init()
    } else {
        base_subscriber
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_ansi(use_color)
                    .with_writer(std::io::stderr),
            )
            .try_init()
    };

    result.map_err(|e| ConfigError::Invalid(format!("Failed to initialize logging: {}", e)))
}

/// Build environment filter from config or the DEPOT_LOG variable
fn build_env_filter(config: Option<&LoggingConfig>) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_env("DEPOT_LOG") {
        return filter;
    }
    let level = config.map(|c| c.level.as_str()).unwrap_or("info");
    EnvFilter::new(level)
}
