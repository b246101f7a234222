//! Logging System
//!
//! Structured logging via the `tracing` crate with configurable level,
//! format, and color. The `TREEGEN_LOG` environment variable overrides the
//! configured level with a full filter directive.

use crate::error::GenError;
use serde::{Deserialize, Serialize};
use tracing_subscriber::fmt::time::ChronoUtc;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry};

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

/// Initialize the logging system.
///
/// Precedence for the filter: `TREEGEN_LOG` environment variable, then the
/// configured level, then the default.
pub fn init_logging(config: Option<&LoggingConfig>) -> Result<(), GenError> {
    let default_config = LoggingConfig::default();
    let config = config.unwrap_or(&default_config);

    let filter = EnvFilter::try_from_env("TREEGEN_LOG")
        .or_else(|_| EnvFilter::try_new(&config.level))
        .map_err(|e| GenError::Config(format!("invalid log level {:?}: {}", config.level, e)))?;

    let layer = if config.format == "json" {
        fmt::layer()
            .json()
            .with_timer(ChronoUtc::rfc_3339())
            .with_writer(std::io::stderr)
            .boxed()
    } else {
        fmt::layer()
            .with_timer(ChronoUtc::rfc_3339())
            .with_ansi(config.color)
            .with_writer(std::io::stderr)
            .boxed()
    };

    Registry::default()
        .with(filter)
        .with(layer)
        .try_init()
        .map_err(|e| GenError::Config(format!("failed to initialize logging: {}", e)))
}
