//! Template loading and rendering via Tera
//!
//! The generation core only needs an opaque render-to-text capability; the
//! traits here are that seam. The Tera-backed implementation is the one the
//! CLI wires in, loading templates from a directory glob.

use crate::context::RenderContext;
use crate::error::GenError;
use std::path::Path;
use std::sync::Arc;
use tera::Tera;

/// A resolved template that can render one entry's context to text.
pub trait Template: Send + Sync {
    fn render(&self, ctx: &RenderContext) -> Result<String, GenError>;
}

/// Resolves template identifiers to shared template handles.
///
/// Resolution happens once per run, before any tree construction for that
/// run; an unknown identifier aborts the whole generation pass.
pub trait TemplateLoader {
    fn load(&self, run_name: &str, template_id: &str) -> Result<Arc<dyn Template>, GenError>;
}

/// Template loader backed by a Tera instance.
pub struct TeraLoader {
    tera: Arc<Tera>,
}

impl TeraLoader {
    /// Load all templates under `dir` (any extension, recursively).
    pub fn from_dir(dir: &Path) -> Result<Self, GenError> {
        let glob = format!("{}/**/*", dir.display());
        let tera = Tera::new(&glob)
            .map_err(|e| GenError::Config(format!("failed to load templates from {:?}: {}", dir, e)))?;
        Ok(Self::from_tera(tera))
    }

    /// Wrap an already-populated Tera instance.
    pub fn from_tera(tera: Tera) -> Self {
        Self {
            tera: Arc::new(tera),
        }
    }
}

impl TemplateLoader for TeraLoader {
    fn load(&self, run_name: &str, template_id: &str) -> Result<Arc<dyn Template>, GenError> {
        if let Err(e) = self.tera.get_template(template_id) {
            return Err(GenError::TemplateNotFound {
                run: run_name.to_string(),
                template: template_id.to_string(),
                source: e,
            });
        }
        Ok(Arc::new(TeraTemplate {
            tera: Arc::clone(&self.tera),
            name: template_id.to_string(),
        }))
    }
}

struct TeraTemplate {
    tera: Arc<Tera>,
    name: String,
}

impl Template for TeraTemplate {
    fn render(&self, ctx: &RenderContext) -> Result<String, GenError> {
        let tera_ctx = tera::Context::from_serialize(ctx).map_err(|e| GenError::Render {
            run: ctx.gen_run_entry.run.clone(),
            path: ctx.gen_run_entry.path.clone().into(),
            source: e,
        })?;
        self.tera
            .render(&self.name, &tera_ctx)
            .map_err(|e| GenError::Render {
                run: ctx.gen_run_entry.run.clone(),
                path: ctx.gen_run_entry.path.clone().into(),
                source: e,
            })
    }
}
