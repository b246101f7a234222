//! Merged generation tree: nodes, entries, and the owning registry

use crate::template::Template;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

/// Index of a node within its registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

/// One generated file attached at a node, contributed by one run.
///
/// The output path is computed once at merge time and never recomputed.
#[derive(Clone)]
pub struct GenEntry {
    pub run_name: String,
    pub template: Arc<dyn Template>,
    pub output_path: PathBuf,
}

impl std::fmt::Debug for GenEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenEntry")
            .field("run_name", &self.run_name)
            .field("output_path", &self.output_path)
            .finish_non_exhaustive()
    }
}

/// A node of the merged generation tree.
///
/// The parent link is a plain id lookup, never an owning edge; the registry
/// owns every node and the children maps are the sole structural edges.
#[derive(Debug)]
pub struct GenNode {
    pub key: String,
    pub parent: Option<NodeId>,
    pub children: BTreeMap<String, NodeId>,
    pub entries: BTreeMap<String, GenEntry>,
}

impl GenNode {
    fn new(key: String, parent: Option<NodeId>) -> Self {
        Self {
            key,
            parent,
            children: BTreeMap::new(),
            entries: BTreeMap::new(),
        }
    }
}

/// The mutable forest that generation runs are merged into.
///
/// Supports lookup-or-create on roots and children so independent runs
/// share ancestor nodes instead of duplicating them. Nodes are never
/// removed during a build.
#[derive(Debug, Default)]
pub struct NodeRegistry {
    nodes: Vec<GenNode>,
    roots: BTreeMap<String, NodeId>,
}

impl NodeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn node(&self, id: NodeId) -> &GenNode {
        &self.nodes[id.0]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut GenNode {
        &mut self.nodes[id.0]
    }

    /// Root node ids in deterministic key order
    pub fn roots(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.roots.values().copied()
    }

    pub fn root(&self, key: &str) -> Option<NodeId> {
        self.roots.get(key).copied()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Total number of entries across all nodes
    pub fn entry_count(&self) -> usize {
        self.nodes.iter().map(|n| n.entries.len()).sum()
    }

    /// Look up the root for `key`, creating it if absent.
    pub fn lookup_or_create_root(&mut self, key: &str) -> NodeId {
        if let Some(id) = self.roots.get(key) {
            return *id;
        }
        let id = self.push(GenNode::new(key.to_string(), None));
        self.roots.insert(key.to_string(), id);
        id
    }

    /// Look up the child of `parent` for `key`, creating it if absent.
    ///
    /// Resolution never changes an existing node's identity, only the
    /// parent's children map when a new child is created.
    pub fn lookup_or_create_child(&mut self, parent: NodeId, key: &str) -> NodeId {
        if let Some(id) = self.nodes[parent.0].children.get(key) {
            return *id;
        }
        let id = self.push(GenNode::new(key.to_string(), Some(parent)));
        self.nodes[parent.0].children.insert(key.to_string(), id);
        id
    }

    /// Resolve a full key path from a root, creating missing nodes.
    pub fn lookup_or_create_path(&mut self, key_path: &[String]) -> Option<NodeId> {
        let (first, rest) = key_path.split_first()?;
        let mut current = self.lookup_or_create_root(first);
        for key in rest {
            current = self.lookup_or_create_child(current, key);
        }
        Some(current)
    }

    /// Root-to-node key path, inclusive of the node itself.
    ///
    /// Follows parent links upward with an explicit loop, then reverses,
    /// so deep trees cannot exhaust the stack.
    pub fn key_path(&self, id: NodeId) -> Vec<String> {
        let mut path = Vec::new();
        let mut current = Some(id);
        while let Some(node_id) = current {
            let node = &self.nodes[node_id.0];
            path.push(node.key.clone());
            current = node.parent;
        }
        path.reverse();
        path
    }

    fn push(&mut self, node: GenNode) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        id
    }
}
