//! Generation pass orchestration

use crate::error::GenError;
use crate::run::{RunData, RunDefinition};
use crate::template::TemplateLoader;
use crate::tree::builder::TreeBuilder;
use crate::writer::Writer;
use chrono::Utc;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

/// Outcome of one generation pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationSummary {
    /// Nodes in the merged tree, structural ancestors included
    pub nodes: usize,
    /// Generation entries attached at leaf nodes
    pub entries: usize,
    /// Files actually written (zero for a check pass)
    pub files_written: usize,
}

/// Drives one full generation pass: validate, resolve templates, merge,
/// walk, write. One invocation builds one tree, walks it once, and discards
/// it; nothing is shared across invocations.
pub struct Generator {
    source_root: PathBuf,
    loader: Box<dyn TemplateLoader>,
}

impl Generator {
    pub fn new(source_root: PathBuf, loader: Box<dyn TemplateLoader>) -> Self {
        Self {
            source_root,
            loader,
        }
    }

    /// Run the full pass and write every generated file.
    ///
    /// Configuration and template-resolution errors surface before any file
    /// I/O; render and write errors abort the pass mid-walk without rolling
    /// back files already written.
    #[instrument(skip(self, runs), fields(source_root = %self.source_root.display()))]
    pub fn generate(&self, runs: &[RunDefinition]) -> Result<GenerationSummary, GenError> {
        info!(run_count = runs.len(), "Starting generation pass");

        let (registry, source_root) = self.build_tree(runs)?;
        let writer = Writer::new(source_root, Utc::now());
        let files_written = writer.write_tree(&registry)?;

        let summary = GenerationSummary {
            nodes: registry.node_count(),
            entries: registry.entry_count(),
            files_written,
        };
        info!(
            nodes = summary.nodes,
            entries = summary.entries,
            files_written = summary.files_written,
            "Generation pass completed"
        );
        Ok(summary)
    }

    /// Validate runs, resolve templates, and build the tree without writing
    /// anything. Surfaces the same errors `generate` would, minus I/O.
    #[instrument(skip(self, runs), fields(source_root = %self.source_root.display()))]
    pub fn check(&self, runs: &[RunDefinition]) -> Result<GenerationSummary, GenError> {
        let (registry, _) = self.build_tree(runs)?;
        Ok(GenerationSummary {
            nodes: registry.node_count(),
            entries: registry.entry_count(),
            files_written: 0,
        })
    }

    fn build_tree(
        &self,
        runs: &[RunDefinition],
    ) -> Result<(crate::tree::node::NodeRegistry, PathBuf), GenError> {
        // Fail fast on malformed definitions before resolving anything
        for run in runs {
            run.validate()?;
        }

        let prepared: Vec<RunData> = runs
            .iter()
            .map(|run| run.prepare(self.loader.as_ref()))
            .collect::<Result<_, _>>()?;

        let source_root = canonicalize_source_root(&self.source_root)?;
        let registry = TreeBuilder::new(source_root.clone()).build(&prepared)?;
        Ok((registry, source_root))
    }
}

/// Canonicalize the source root so cached entry paths are stable regardless
/// of how the root was spelled on the command line.
fn canonicalize_source_root(root: &Path) -> Result<PathBuf, GenError> {
    dunce::canonicalize(root).map_err(|e| {
        GenError::InvalidPath(format!(
            "source root {:?} is not accessible: {}",
            root, e
        ))
    })
}
