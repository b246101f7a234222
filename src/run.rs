//! Run definitions: one declared generation pass over a key tree

use crate::error::GenError;
use crate::template::{Template, TemplateLoader};
use crate::tree::key::KeyNode;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Output naming policy for a run's generated files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum NamingPolicy {
    /// Every key becomes a directory; the file is named `{name}.{suffix}`.
    AllKeysAsDirs,
    /// With two or more keys, the last key is folded into the file name
    /// (`{last}_{name}.{suffix}`) and the rest become directories. A lone
    /// key keeps its directory.
    #[default]
    PrependLastKey,
    /// Fold the last key into the file name only when the run produces a
    /// single entry overall, so a one-file run does not create a directory
    /// for itself. Otherwise behaves like `AllKeysAsDirs`.
    PrependLastKeyIfSingleEntry,
}

/// Describes one generation pass: which key trees to expand, which template
/// to render at each leaf, and how output paths are derived.
///
/// Immutable after construction. Many run definitions may be merged into a
/// single generation tree; `name` keys the entries each run contributes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunDefinition {
    /// Declared key trees; every leaf produces one generated file
    pub roots: Vec<KeyNode>,
    /// Logical run name, used in file names and as the entry key
    pub name: String,
    /// Template identifier resolved through the template loader
    pub template: String,
    /// Output file suffix, without the leading dot
    pub suffix: String,
    /// Output naming policy
    #[serde(default)]
    pub naming: NamingPolicy,
    /// Optional directory segment prepended before key-derived directories
    #[serde(default)]
    pub base_dir: Option<String>,
}

impl RunDefinition {
    /// Validate the definition before any tree construction or file I/O.
    pub fn validate(&self) -> Result<(), GenError> {
        if self.name.is_empty() {
            return Err(GenError::Config("run has an empty name".to_string()));
        }
        if self.roots.is_empty() {
            return Err(GenError::Config(format!(
                "run '{}' declares no root keys",
                self.name
            )));
        }
        if self.suffix.is_empty() {
            return Err(GenError::Config(format!(
                "run '{}' has an empty suffix",
                self.name
            )));
        }
        let mut seen = std::collections::HashSet::new();
        for root in &self.roots {
            if !seen.insert(root.key.as_str()) {
                return Err(GenError::InvalidKey {
                    run: self.name.clone(),
                    key: root.key.clone(),
                    reason: "duplicate root key".to_string(),
                });
            }
            root.validate(&self.name)?;
        }
        Ok(())
    }

    /// Total leaf count across all declared trees
    pub fn leaf_count(&self) -> usize {
        self.roots.iter().map(KeyNode::leaf_count).sum()
    }

    /// Resolve this run's template, producing the prepared form consumed by
    /// the tree builder. Fails if the template id is unknown to the loader.
    pub fn prepare(&self, loader: &dyn TemplateLoader) -> Result<RunData, GenError> {
        let template = loader.load(&self.name, &self.template)?;
        Ok(RunData {
            def: self.clone(),
            template,
        })
    }
}

/// A run definition paired with its resolved template handle.
///
/// The handle is shared by reference across every entry the run attaches.
#[derive(Clone)]
pub struct RunData {
    pub def: RunDefinition,
    pub template: Arc<dyn Template>,
}

impl std::fmt::Debug for RunData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RunData")
            .field("def", &self.def)
            .finish_non_exhaustive()
    }
}
