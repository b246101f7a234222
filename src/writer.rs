//! Rendering and persisting generation entries

use crate::context::RenderContext;
use crate::error::GenError;
use crate::tree::node::{NodeId, NodeRegistry};
use crate::tree::walker;
use chrono::{DateTime, Utc};
use std::fs;
use std::path::PathBuf;
use tracing::{debug, error, instrument};

/// Renders every entry of a finished tree and writes the results to disk.
///
/// Writes replace existing files in place; there is no rollback of entries
/// written before a failure, and a single failing entry aborts the pass.
pub struct Writer {
    source_root: PathBuf,
    generated_at: DateTime<Utc>,
}

impl Writer {
    pub fn new(source_root: PathBuf, generated_at: DateTime<Utc>) -> Self {
        Self {
            source_root,
            generated_at,
        }
    }

    /// Walk the tree, rendering and writing each entry. Returns the number
    /// of files written.
    #[instrument(skip(self, registry), fields(source_root = %self.source_root.display()))]
    pub fn write_tree(&self, registry: &NodeRegistry) -> Result<usize, GenError> {
        let mut written = 0;
        walker::walk(registry, |registry, node_id| {
            written += self.write_node(registry, node_id)?;
            Ok(())
        })?;
        Ok(written)
    }

    fn write_node(&self, registry: &NodeRegistry, node_id: NodeId) -> Result<usize, GenError> {
        let node = registry.node(node_id);
        let mut written = 0;

        for entry in node.entries.values() {
            let ctx = RenderContext::for_entry(
                registry,
                node_id,
                entry,
                &self.source_root,
                self.generated_at,
            );
            let text = entry.template.render(&ctx).map_err(|e| {
                error!(
                    run = %entry.run_name,
                    path = %entry.output_path.display(),
                    "Render failed: {}", e
                );
                e
            })?;

            if let Some(parent) = entry.output_path.parent() {
                fs::create_dir_all(parent).map_err(|e| {
                    error!(
                        run = %entry.run_name,
                        path = %entry.output_path.display(),
                        "Failed to create output directory: {}", e
                    );
                    GenError::Write {
                        run: entry.run_name.clone(),
                        path: entry.output_path.clone(),
                        source: e,
                    }
                })?;
            }

            fs::write(&entry.output_path, &text).map_err(|e| {
                error!(
                    run = %entry.run_name,
                    path = %entry.output_path.display(),
                    "Failed to write generated file: {}", e
                );
                GenError::Write {
                    run: entry.run_name.clone(),
                    path: entry.output_path.clone(),
                    source: e,
                }
            })?;

            debug!(
                run = %entry.run_name,
                path = %entry.output_path.display(),
                bytes = text.len(),
                "Wrote generated file"
            );
            written += 1;
        }

        Ok(written)
    }
}
