//! Tree builder: merges generation runs into one node registry

use crate::error::GenError;
use crate::run::RunData;
use crate::tree::key::KeyNode;
use crate::tree::node::{GenEntry, NodeId, NodeRegistry};
use crate::tree::path;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, instrument, warn};

/// Merges an ordered sequence of prepared runs into one [`NodeRegistry`].
///
/// Runs are processed strictly in declaration order, depth-first within a
/// run, so entry collisions resolve deterministically (last write wins).
pub struct TreeBuilder {
    source_root: PathBuf,
}

impl TreeBuilder {
    /// Create a builder resolving output paths under the given source root
    pub fn new(source_root: PathBuf) -> Self {
        Self { source_root }
    }

    /// Build the merged generation tree from all runs.
    ///
    /// Every declared key path gets a node; every leaf key node attaches one
    /// entry, keyed by run name, with its output path computed here and
    /// cached on the entry. Malformed run definitions fail before any node
    /// is created.
    #[instrument(skip(self, runs), fields(source_root = %self.source_root.display()))]
    pub fn build(&self, runs: &[RunData]) -> Result<NodeRegistry, GenError> {
        let start = Instant::now();
        info!(run_count = runs.len(), "Starting tree merge");

        for run in runs {
            run.def.validate()?;
        }

        let mut registry = NodeRegistry::new();
        for run in runs {
            self.merge_run(&mut registry, run);
        }

        info!(
            node_count = registry.node_count(),
            entry_count = registry.entry_count(),
            duration_ms = start.elapsed().as_millis(),
            "Tree merge completed"
        );
        Ok(registry)
    }

    /// Merge one run's key trees into the registry.
    fn merge_run(&self, registry: &mut NodeRegistry, run: &RunData) {
        debug!(run = %run.def.name, roots = run.def.roots.len(), "Merging run");

        struct Frame<'a> {
            parent: Option<NodeId>,
            key_node: &'a KeyNode,
        }

        // Explicit stack; roots and children are pushed in reverse so
        // siblings resolve in input order.
        let mut stack: Vec<Frame> = run
            .def
            .roots
            .iter()
            .rev()
            .map(|key_node| Frame {
                parent: None,
                key_node,
            })
            .collect();

        while let Some(frame) = stack.pop() {
            let node_id = match frame.parent {
                Some(parent) => registry.lookup_or_create_child(parent, &frame.key_node.key),
                None => registry.lookup_or_create_root(&frame.key_node.key),
            };

            if frame.key_node.is_leaf() {
                self.attach_entry(registry, node_id, run);
            } else {
                for child in frame.key_node.children.iter().rev() {
                    stack.push(Frame {
                        parent: Some(node_id),
                        key_node: child,
                    });
                }
            }
        }
    }

    /// Attach the run's entry at a node resolved from a leaf key node.
    /// A later declaration at the same (node, run name) pair replaces the
    /// earlier one; the overwrite is deliberate and logged.
    fn attach_entry(&self, registry: &mut NodeRegistry, node_id: NodeId, run: &RunData) {
        let key_path = registry.key_path(node_id);
        let output_path = path::resolve_entry_path(&self.source_root, &key_path, &run.def);
        let entry = GenEntry {
            run_name: run.def.name.clone(),
            template: Arc::clone(&run.template),
            output_path,
        };
        if let Some(previous) = registry
            .node_mut(node_id)
            .entries
            .insert(run.def.name.clone(), entry)
        {
            warn!(
                run = %run.def.name,
                key_path = ?key_path,
                previous = %previous.output_path.display(),
                "Entry collision, keeping the later declaration"
            );
        }
    }
}
