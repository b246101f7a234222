//! Shared helpers for integration tests

use std::fs;
use std::path::Path;
use tempfile::TempDir;
use treegen::generator::Generator;
use treegen::run::{NamingPolicy, RunDefinition};
use treegen::template::TeraLoader;
use treegen::tree::key::KeyNode;

/// A temp source root with a `templates/` directory populated from pairs of
/// (file name, body).
pub fn source_root_with_templates(templates: &[(&str, &str)]) -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    let templates_dir = temp_dir.path().join("templates");
    fs::create_dir(&templates_dir).unwrap();
    for (name, body) in templates {
        fs::write(templates_dir.join(name), body).unwrap();
    }
    temp_dir
}

/// Generator loading templates from `<root>/templates`
pub fn generator_for(root: &Path) -> Generator {
    let loader = TeraLoader::from_dir(&root.join("templates")).unwrap();
    Generator::new(root.to_path_buf(), Box::new(loader))
}

pub fn run_def(name: &str, template: &str, roots: Vec<KeyNode>) -> RunDefinition {
    RunDefinition {
        roots,
        name: name.to_string(),
        template: template.to_string(),
        suffix: "rst".to_string(),
        naming: NamingPolicy::PrependLastKey,
        base_dir: None,
    }
}

/// Collect every generated file under `root` (templates dir excluded) as
/// (relative path, contents), sorted by path.
pub fn collect_outputs(root: &Path) -> Vec<(String, String)> {
    let mut outputs = Vec::new();
    for entry in walkdir::WalkDir::new(root) {
        let entry = entry.unwrap();
        if !entry.file_type().is_file() {
            continue;
        }
        let rel = entry.path().strip_prefix(root).unwrap();
        if rel.starts_with("templates") {
            continue;
        }
        outputs.push((
            rel.display().to_string(),
            fs::read_to_string(entry.path()).unwrap(),
        ));
    }
    outputs.sort();
    outputs
}
