//! The plaster.toml manifest.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use plaster_build::{
    Build, BuildSettings, ConcatEntry, CopyRequest, Lessc, MinifyRequest, OutputStyle,
    ScssOptions, TemplateData, TemplateJob,
};
use serde::Deserialize;

/// Manifest file structure (plaster.toml).
#[derive(Debug, Deserialize, Default)]
pub struct Manifest {
    #[serde(default)]
    pub settings: BuildSettings,
    #[serde(default)]
    pub less: LessConfig,
    /// Data shared by every template
    #[serde(default)]
    pub data: TemplateData,
    #[serde(default)]
    pub copy: Vec<CopyStep>,
    #[serde(default)]
    pub scss: Vec<ScssStep>,
    #[serde(default)]
    pub concat: Vec<ConcatStep>,
    #[serde(default)]
    pub minify_css: Vec<MinifyStep>,
    #[serde(default)]
    pub minify_js: Vec<MinifyStep>,
    #[serde(default)]
    pub templates: Vec<TemplateStep>,
}

#[derive(Debug, Deserialize)]
pub struct LessConfig {
    #[serde(default = "default_lessc")]
    pub program: PathBuf,
}

impl Default for LessConfig {
    fn default() -> Self {
        Self {
            program: default_lessc(),
        }
    }
}

fn default_lessc() -> PathBuf {
    PathBuf::from("lessc")
}

#[derive(Debug, Deserialize)]
pub struct CopyStep {
    pub sources: Vec<PathBuf>,
    pub dist: PathBuf,
}

#[derive(Debug, Deserialize)]
pub struct ScssStep {
    pub file: Option<PathBuf>,
    pub data: Option<String>,
    pub out: Option<PathBuf>,
    #[serde(default)]
    pub style: OutputStyle,
}

#[derive(Debug, Deserialize)]
pub struct ConcatStep {
    pub files: Vec<String>,
    pub out: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
pub struct MinifyStep {
    pub src: Option<PathBuf>,
    pub content: Option<String>,
    pub out: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
pub struct TemplateStep {
    pub source: PathBuf,
    pub target: PathBuf,
    #[serde(default)]
    pub data: TemplateData,
}

impl Manifest {
    /// Parse a manifest from TOML text.
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse manifest")
    }

    /// Load the manifest at `path`. Returns `None` if it does not exist.
    /// Returns an error if the file exists but is malformed.
    pub fn load(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let manifest =
            Self::parse(&content).with_context(|| format!("Invalid manifest {}", path.display()))?;
        tracing::info!("Loaded manifest from {}", path.display());

        Ok(Some(manifest))
    }

    /// Load the manifest if present, falling back to defaults.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        Ok(Self::load(path)?.unwrap_or_default())
    }

    /// Construct the builder described by `[settings]` and `[less]`.
    pub fn build(&self) -> Build {
        Build::new(self.settings.clone()).with_less_compiler(Lessc::with_program(&self.less.program))
    }
}

impl From<&CopyStep> for CopyRequest {
    fn from(step: &CopyStep) -> Self {
        CopyRequest::new(&step.sources, &step.dist)
    }
}

impl From<&ScssStep> for ScssOptions {
    fn from(step: &ScssStep) -> Self {
        ScssOptions {
            file: step.file.clone(),
            data: step.data.clone(),
            output_style: step.style,
            out_file: step.out.clone(),
            ..Default::default()
        }
    }
}

impl ConcatStep {
    pub fn entries(&self) -> Vec<ConcatEntry> {
        self.files.iter().map(|f| ConcatEntry::from(f.as_str())).collect()
    }
}

impl From<&MinifyStep> for MinifyRequest {
    fn from(step: &MinifyStep) -> Self {
        MinifyRequest {
            content: step.content.clone(),
            src_path: step.src.clone(),
            dist_path: step.out.clone(),
        }
    }
}

impl From<&TemplateStep> for TemplateJob {
    fn from(step: &TemplateStep) -> Self {
        TemplateJob::new(&step.source, &step.target).with_data(step.data.clone())
    }
}
