//! Template compilation against data bindings.

use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use crate::builder::Build;
use crate::error::{BuildError, Result};

/// Data bound into a template.
pub type TemplateData = Map<String, Value>;

/// Key injected into every template context with the target's file name.
pub const FILE_NAME_KEY: &str = "fileName";

/// A single template to render.
#[derive(Debug, Clone, Default)]
pub struct TemplateJob {
    /// Template source, relative to the source root or already rooted there
    pub source: PathBuf,
    /// Output path, relative to the dist root or already rooted there
    pub target: PathBuf,
    /// Bindings for this template
    pub data: TemplateData,
}

impl TemplateJob {
    pub fn new(source: impl Into<PathBuf>, target: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            data: TemplateData::new(),
        }
    }

    pub fn with_data(mut self, data: TemplateData) -> Self {
        self.data = data;
        self
    }
}

/// Output of a rendered template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedTemplate {
    /// Rendered text
    pub body: String,
    /// Where the text was written
    pub target: PathBuf,
}

impl Build {
    /// Render one template and write it under the dist root.
    pub async fn render_template(&self, job: &TemplateJob) -> Result<RenderedTemplate> {
        self.render_with(job, &TemplateData::new()).await
    }

    /// Render templates one after another, stopping at the first failure.
    ///
    /// Each job's data is layered over `shared`. Outputs written before a
    /// failure are left in place.
    pub async fn render_templates(
        &self,
        jobs: &[TemplateJob],
        shared: &TemplateData,
    ) -> Result<Vec<RenderedTemplate>> {
        let mut rendered = Vec::with_capacity(jobs.len());

        for job in jobs {
            rendered.push(self.render_with(job, shared).await?);
        }

        tracing::info!("Rendered {} templates", rendered.len());

        Ok(rendered)
    }

    async fn render_with(&self, job: &TemplateJob, shared: &TemplateData) -> Result<RenderedTemplate> {
        let source = self.resolve_source(&job.source);
        let target = self.resolve_dist(&job.target);
        let encoding = self.settings().encoding;

        let context = bind_context(shared, &job.data, &target);

        let bytes = tokio::fs::read(&source)
            .await
            .map_err(|e| BuildError::io(&source, e))?;
        let text = encoding.decode(bytes).map_err(|message| BuildError::Encoding {
            path: source.clone(),
            message,
        })?;

        let name = template_name(&source, &self.settings().source_root);
        let body = self
            .templates
            .render_named_str(&name, &text, &context)
            .map_err(|e: minijinja::Error| BuildError::Template {
                name: name.clone(),
                message: e.to_string(),
            })?;

        let encoded = encoding.encode(&body).map_err(|message| BuildError::Encoding {
            path: target.clone(),
            message,
        })?;

        if let Some(parent) = target.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| BuildError::io(parent, e))?;
        }

        tokio::fs::write(&target, encoded)
            .await
            .map_err(|e| BuildError::io(&target, e))?;

        tracing::debug!("Rendered {} -> {}", source.display(), target.display());

        Ok(RenderedTemplate { body, target })
    }
}

/// Merge shared and job data into a fresh context and add the file name.
fn bind_context(shared: &TemplateData, data: &TemplateData, target: &Path) -> TemplateData {
    let mut context = shared.clone();
    context.extend(data.iter().map(|(k, v)| (k.clone(), v.clone())));

    let file_name = target
        .file_name()
        .map(|f| f.to_string_lossy().into_owned())
        .unwrap_or_default();
    context.insert(FILE_NAME_KEY.to_string(), Value::String(file_name));

    context
}

/// Name used for error messages: the path relative to the source root.
fn template_name(source: &Path, root: &Path) -> String {
    let root = crate::paths::normalize(root);
    source
        .strip_prefix(&root)
        .unwrap_or(source)
        .to_string_lossy()
        .replace('\\', "/")
}
