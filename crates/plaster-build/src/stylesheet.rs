//! Sass/SCSS compilation.

use std::path::PathBuf;
use std::str::FromStr;

use rsass::output::{Format, Style};
use serde::Deserialize;

use crate::builder::{write_text, Build};
use crate::error::{BuildError, Result};

/// CSS output style.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputStyle {
    #[default]
    Compressed,
    Expanded,
}

impl FromStr for OutputStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "compressed" => Ok(Self::Compressed),
            "expanded" => Ok(Self::Expanded),
            other => Err(format!("unknown output style: {}", other)),
        }
    }
}

impl From<OutputStyle> for Format {
    fn from(style: OutputStyle) -> Self {
        let style = match style {
            OutputStyle::Compressed => Style::Compressed,
            OutputStyle::Expanded => Style::Expanded,
        };

        Format {
            style,
            ..Default::default()
        }
    }
}

/// Options for [`Build::compile_scss`].
///
/// One of `file` or `data` provides the source; `data` wins when both are set.
#[derive(Debug, Clone, Default)]
pub struct ScssOptions {
    /// Path to an SCSS file; its imports resolve relative to it
    pub file: Option<PathBuf>,
    /// Inline SCSS source
    pub data: Option<String>,
    pub output_style: OutputStyle,
    /// Where to write the compiled CSS
    pub out_file: Option<PathBuf>,
    /// Request a source map (not supported by the compiler)
    pub source_map: bool,
    pub source_map_contents: bool,
}

impl ScssOptions {
    pub fn from_file(file: impl Into<PathBuf>) -> Self {
        Self {
            file: Some(file.into()),
            ..Default::default()
        }
    }

    pub fn from_data(data: impl Into<String>) -> Self {
        Self {
            data: Some(data.into()),
            ..Default::default()
        }
    }
}

/// Compiled stylesheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledCss {
    pub css: String,
    pub source_map: Option<String>,
}

enum Input {
    Data(String),
    File(PathBuf),
}

impl Build {
    /// Compile SCSS to CSS off the async runtime.
    pub async fn compile_scss(&self, options: &ScssOptions) -> Result<CompiledCss> {
        let input = match (&options.data, &options.file) {
            (Some(data), _) => Input::Data(data.clone()),
            (None, Some(file)) => {
                tokio::fs::metadata(file)
                    .await
                    .map_err(|e| BuildError::io(file, e))?;
                Input::File(file.clone())
            }
            (None, None) => {
                return Err(BuildError::InvalidRequest(
                    "scss compilation needs either `file` or `data`".to_string(),
                ))
            }
        };

        if options.source_map || options.source_map_contents {
            tracing::warn!("Source maps are not supported for SCSS, ignoring");
        }

        let format = Format::from(options.output_style);
        let compiled = tokio::task::spawn_blocking(move || match input {
            Input::Data(data) => rsass::compile_scss(data.as_bytes(), format),
            Input::File(file) => rsass::compile_scss_path(&file, format),
        })
        .await
        .map_err(|e| BuildError::StylesheetCompile(e.to_string()))?
        .map_err(|e| BuildError::StylesheetCompile(e.to_string()))?;

        let css = String::from_utf8(compiled)
            .map_err(|e| BuildError::StylesheetCompile(e.to_string()))?;

        if let Some(out_file) = &options.out_file {
            write_text(out_file, &css, self.settings().encoding)?;
            tracing::info!("Compiled stylesheet to {}", out_file.display());
        }

        Ok(CompiledCss {
            css,
            source_map: None,
        })
    }
}
