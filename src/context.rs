//! Render contexts exposed to templates
//!
//! Each entry is rendered with exactly three views: the current node, the
//! whole generation tree for cross-navigation, and the entry itself, plus
//! the pass's UTC generation timestamp.

use crate::tree::node::{GenEntry, NodeId, NodeRegistry};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::Path;

/// Serializable view of one generation entry
#[derive(Debug, Clone, Serialize)]
pub struct EntryView {
    /// Run name that contributed the entry
    pub run: String,
    /// Resolved output path, relative to the source root when possible
    pub path: String,
}

/// Serializable view of one generation tree node, children included
#[derive(Debug, Clone, Serialize)]
pub struct NodeView {
    pub key: String,
    /// Root-to-node key path, inclusive
    pub key_path: Vec<String>,
    /// Child keys in deterministic order
    pub child_keys: Vec<String>,
    pub children: Vec<NodeView>,
    pub entries: Vec<EntryView>,
}

/// Serializable view of the whole merged tree
#[derive(Debug, Clone, Serialize)]
pub struct RegistryView {
    pub roots: Vec<NodeView>,
}

/// The complete context handed to a template for one entry.
///
/// Field names are the variable names visible inside templates.
#[derive(Debug, Clone, Serialize)]
pub struct RenderContext {
    pub gen_node: NodeView,
    pub gen_roots: RegistryView,
    pub gen_run_entry: EntryView,
    pub generated_at: DateTime<Utc>,
}

impl RenderContext {
    pub fn for_entry(
        registry: &NodeRegistry,
        node_id: NodeId,
        entry: &GenEntry,
        source_root: &Path,
        generated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            gen_node: NodeView::from_node(registry, node_id, source_root),
            gen_roots: RegistryView::from_registry(registry, source_root),
            gen_run_entry: EntryView::from_entry(entry, source_root),
            generated_at,
        }
    }
}

impl EntryView {
    fn from_entry(entry: &GenEntry, source_root: &Path) -> Self {
        let path = entry
            .output_path
            .strip_prefix(source_root)
            .unwrap_or(&entry.output_path);
        Self {
            run: entry.run_name.clone(),
            path: path.display().to_string(),
        }
    }
}

impl NodeView {
    fn from_node(registry: &NodeRegistry, node_id: NodeId, source_root: &Path) -> Self {
        let node = registry.node(node_id);
        Self {
            key: node.key.clone(),
            key_path: registry.key_path(node_id),
            child_keys: node.children.keys().cloned().collect(),
            children: node
                .children
                .values()
                .map(|&child| NodeView::from_node(registry, child, source_root))
                .collect(),
            entries: node
                .entries
                .values()
                .map(|entry| EntryView::from_entry(entry, source_root))
                .collect(),
        }
    }
}

impl RegistryView {
    fn from_registry(registry: &NodeRegistry, source_root: &Path) -> Self {
        Self {
            roots: registry
                .roots()
                .map(|root| NodeView::from_node(registry, root, source_root))
                .collect(),
        }
    }
}
