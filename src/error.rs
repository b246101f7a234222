//! Error types for the key-tree generation system.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while building or writing a generation tree
#[derive(Debug, Error)]
pub enum GenError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid generation key {key:?} in run '{run}': {reason}")]
    InvalidKey {
        run: String,
        key: String,
        reason: String,
    },

    #[error("Template '{template}' not found for run '{run}': {source}")]
    TemplateNotFound {
        run: String,
        template: String,
        #[source]
        source: tera::Error,
    },

    #[error("Render failed for run '{run}' at {path:?}: {source}")]
    Render {
        run: String,
        path: PathBuf,
        #[source]
        source: tera::Error,
    },

    #[error("Write failed for run '{run}' at {path:?}: {source}")]
    Write {
        run: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<config::ConfigError> for GenError {
    fn from(err: config::ConfigError) -> Self {
        GenError::Config(err.to_string())
    }
}
