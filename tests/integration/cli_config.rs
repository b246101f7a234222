//! Config-file-driven generation through the CLI layer

use clap::Parser;
use std::fs;
use tempfile::TempDir;
use treegen::cli::{Cli, RunContext};

fn write_project(temp_dir: &TempDir) -> std::path::PathBuf {
    let root = temp_dir.path();
    fs::create_dir(root.join("templates")).unwrap();
    fs::write(
        root.join("templates/recipe.tera"),
        "Recipe for {{ gen_node.key }}",
    )
    .unwrap();

    let config_path = root.join("treegen.toml");
    fs::write(
        &config_path,
        r#"
        [[runs]]
        name = "recipe"
        template = "recipe.tera"
        suffix = "rst"

        [[runs.roots]]
        key = "meals"
        [[runs.roots.children]]
        key = "stew"
        [[runs.roots.children]]
        key = "meatball"
        "#,
    )
    .unwrap();
    config_path
}

fn cli_for(config: &std::path::Path, root: &std::path::Path, command: &str) -> Cli {
    Cli::try_parse_from([
        "treegen",
        "--config",
        config.to_str().unwrap(),
        "--source-root",
        root.to_str().unwrap(),
        command,
    ])
    .unwrap()
}

#[test]
fn test_gen_command_generates_from_config_file() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = write_project(&temp_dir);

    let cli = cli_for(&config_path, temp_dir.path(), "gen");
    let context = RunContext::new(&cli).unwrap();
    let output = context.execute(&cli.command).unwrap();

    assert!(output.contains("Generated 2 files"));
    let stew = fs::read_to_string(temp_dir.path().join("meals/stew_recipe.rst")).unwrap();
    assert_eq!(stew, "Recipe for stew");
    assert!(temp_dir.path().join("meals/meatball_recipe.rst").exists());
}

#[test]
fn test_check_command_writes_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = write_project(&temp_dir);

    let cli = cli_for(&config_path, temp_dir.path(), "check");
    let context = RunContext::new(&cli).unwrap();
    let output = context.execute(&cli.command).unwrap();

    assert!(output.contains("2 entries"));
    assert!(!temp_dir.path().join("meals").exists());
}

#[test]
fn test_missing_config_file_is_reported() {
    let temp_dir = TempDir::new().unwrap();
    let cli = cli_for(
        &temp_dir.path().join("absent.toml"),
        temp_dir.path(),
        "gen",
    );
    assert!(matches!(RunContext::new(&cli), Err(_)));
}
