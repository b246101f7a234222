//! Treegen CLI Binary
//!
//! Command-line interface for declarative key-tree file generation.

use clap::Parser;
use std::process;
use tracing::{error, info};
use treegen::cli::{Cli, RunContext};
use treegen::config::ConfigLoader;
use treegen::logging::{init_logging, LoggingConfig};

fn main() {
    let cli = Cli::parse();

    let logging_config = build_logging_config(&cli);
    if let Err(e) = init_logging(Some(&logging_config)) {
        eprintln!("Failed to initialize logging: {}", e);
        process::exit(1);
    }

    let context = match RunContext::new(&cli) {
        Ok(ctx) => ctx,
        Err(e) => {
            error!("Error loading configuration: {}", e);
            eprintln!("{}", e);
            process::exit(1);
        }
    };

    match context.execute(&cli.command) {
        Ok(output) => {
            info!("Command completed successfully");
            println!("{}", output);
        }
        Err(e) => {
            error!("Command failed: {}", e);
            eprintln!("{}", e);
            process::exit(1);
        }
    }
}

/// Build logging configuration from CLI args, environment, and config file.
/// CLI flags override the config file, which overrides defaults.
fn build_logging_config(cli: &Cli) -> LoggingConfig {
    let mut config = match &cli.config {
        Some(path) => ConfigLoader::load_from_file(path)
            .map(|c| c.logging)
            .unwrap_or_default(),
        None => ConfigLoader::load().map(|c| c.logging).unwrap_or_default(),
    };

    if cli.verbose {
        config.level = "debug".to_string();
    }
    if cli.quiet {
        config.level = "error".to_string();
    }
    config
}
