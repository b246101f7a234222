//! Configuration System
//!
//! Layered configuration: a TOML file declares the source root, template
//! directory, generation runs, and logging, with `TREEGEN_` environment
//! variables overriding file values.

use crate::error::GenError;
use crate::logging::LoggingConfig;
use crate::run::RunDefinition;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreegenConfig {
    /// Source root directory; resolved output paths live under it.
    /// Defaults to the current directory.
    pub source_root: Option<PathBuf>,

    /// Template directory, relative to the source root unless absolute
    #[serde(default = "default_templates_dir")]
    pub templates_dir: PathBuf,

    /// Generation runs, merged into one tree in declaration order
    #[serde(default)]
    pub runs: Vec<RunDefinition>,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_templates_dir() -> PathBuf {
    PathBuf::from("templates")
}

impl Default for TreegenConfig {
    fn default() -> Self {
        Self {
            source_root: None,
            templates_dir: default_templates_dir(),
            runs: Vec::new(),
            logging: LoggingConfig::default(),
        }
    }
}

impl TreegenConfig {
    /// Effective source root after the optional CLI override
    pub fn resolve_source_root(&self, cli_override: Option<&Path>) -> PathBuf {
        cli_override
            .map(Path::to_path_buf)
            .or_else(|| self.source_root.clone())
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Template directory anchored at the source root when relative
    pub fn resolve_templates_dir(&self, source_root: &Path) -> PathBuf {
        if self.templates_dir.is_absolute() {
            self.templates_dir.clone()
        } else {
            source_root.join(&self.templates_dir)
        }
    }
}

/// Loads configuration from file and environment
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load from an explicit file path. The file must exist.
    pub fn load_from_file(path: &Path) -> Result<TreegenConfig, GenError> {
        Self::build(config::File::from(path).required(true))
    }

    /// Load `treegen.toml` from the current directory if present, falling
    /// back to defaults plus environment overrides.
    pub fn load() -> Result<TreegenConfig, GenError> {
        Self::build(config::File::with_name("treegen").required(false))
    }

    fn build(file: config::File<config::FileSourceFile, config::FileFormat>) -> Result<TreegenConfig, GenError> {
        let settings = config::Config::builder()
            .add_source(file)
            .add_source(config::Environment::with_prefix("TREEGEN").separator("__"))
            .build()?;
        Ok(settings.try_deserialize()?)
    }
}
