//! Declarative key trees describing the namespace of one generation run

use crate::error::GenError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A node in a declared key tree.
///
/// Immutable input: a run declares one or more key trees, and every
/// root-to-leaf path becomes a generated file. Keys need not be unique
/// across subtrees, but sibling keys under one parent must be unique.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct KeyNode {
    pub key: String,
    #[serde(default)]
    pub children: Vec<KeyNode>,
}

impl KeyNode {
    /// Create a leaf key node
    pub fn leaf(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            children: Vec::new(),
        }
    }

    /// Create a key node with children
    pub fn branch(key: impl Into<String>, children: Vec<KeyNode>) -> Self {
        Self {
            key: key.into(),
            children,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Count leaf nodes in this subtree (each leaf yields one entry)
    pub fn leaf_count(&self) -> usize {
        if self.is_leaf() {
            1
        } else {
            self.children.iter().map(KeyNode::leaf_count).sum()
        }
    }

    /// Validate this subtree for use in the named run.
    ///
    /// Rejects keys that are empty, contain path separators, or name the
    /// current/parent directory, and rejects duplicate sibling keys.
    pub fn validate(&self, run_name: &str) -> Result<(), GenError> {
        validate_key(run_name, &self.key)?;
        let mut seen: HashSet<&str> = HashSet::new();
        for child in &self.children {
            if !seen.insert(child.key.as_str()) {
                return Err(GenError::InvalidKey {
                    run: run_name.to_string(),
                    key: child.key.clone(),
                    reason: format!("duplicate sibling key under {:?}", self.key),
                });
            }
            child.validate(run_name)?;
        }
        Ok(())
    }
}

fn validate_key(run_name: &str, key: &str) -> Result<(), GenError> {
    let reason = if key.is_empty() {
        Some("key is empty")
    } else if key.contains('/') || key.contains('\\') {
        Some("key contains a path separator")
    } else if key == "." || key == ".." {
        Some("key names the current or parent directory")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(GenError::InvalidKey {
            run: run_name.to_string(),
            key: key.to_string(),
            reason: reason.to_string(),
        }),
        None => Ok(()),
    }
}
