//! CLI domain: argument parsing and command routing only; generation
//! mechanics live in the library modules.

use crate::config::{ConfigLoader, TreegenConfig};
use crate::error::GenError;
use crate::generator::Generator;
use crate::template::TeraLoader;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "treegen", version, about = "Expand declared key trees into generated text files")]
pub struct Cli {
    /// Path to the configuration file (default: ./treegen.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Override the source root directory
    #[arg(long, global = true)]
    pub source_root: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run a full generation pass and write all files
    Gen,
    /// Validate configuration, templates, and the merged tree without
    /// writing anything
    Check,
}

/// Loaded configuration plus resolved paths for one CLI invocation
pub struct RunContext {
    config: TreegenConfig,
    source_root: PathBuf,
}

impl RunContext {
    pub fn new(cli: &Cli) -> Result<Self, GenError> {
        let config = match &cli.config {
            Some(path) => ConfigLoader::load_from_file(path)?,
            None => ConfigLoader::load()?,
        };
        let source_root = config.resolve_source_root(cli.source_root.as_deref());
        Ok(Self {
            config,
            source_root,
        })
    }

    pub fn config(&self) -> &TreegenConfig {
        &self.config
    }

    pub fn execute(&self, command: &Commands) -> Result<String, GenError> {
        let templates_dir = self.config.resolve_templates_dir(&self.source_root);
        let loader = TeraLoader::from_dir(&templates_dir)?;
        let generator = Generator::new(self.source_root.clone(), Box::new(loader));

        match command {
            Commands::Gen => {
                let summary = generator.generate(&self.config.runs)?;
                Ok(format!(
                    "Generated {} files ({} entries across {} nodes)",
                    summary.files_written, summary.entries, summary.nodes
                ))
            }
            Commands::Check => {
                let summary = generator.check(&self.config.runs)?;
                Ok(format!(
                    "Configuration valid: {} entries across {} nodes would be generated",
                    summary.entries, summary.nodes
                ))
            }
        }
    }
}
