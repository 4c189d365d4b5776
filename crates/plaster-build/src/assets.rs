//! JavaScript and CSS minification.

use std::path::PathBuf;

use better_minify_js::{minify, Session, TopLevelMode};
use lightningcss::stylesheet::{MinifyOptions, ParserOptions, PrinterOptions, StyleSheet};

use crate::builder::{read_text, write_text, Build};
use crate::error::{BuildError, Result};
use crate::settings::TextEncoding;

/// Input and output of a minification.
///
/// `content` takes precedence over `src_path`. At least one of them must be set.
#[derive(Debug, Clone, Default)]
pub struct MinifyRequest {
    pub content: Option<String>,
    pub src_path: Option<PathBuf>,
    pub dist_path: Option<PathBuf>,
}

impl MinifyRequest {
    pub fn content(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..Default::default()
        }
    }

    pub fn file(src_path: impl Into<PathBuf>) -> Self {
        Self {
            src_path: Some(src_path.into()),
            ..Default::default()
        }
    }

    pub fn write_to(mut self, dist_path: impl Into<PathBuf>) -> Self {
        self.dist_path = Some(dist_path.into());
        self
    }

    fn input(&self, encoding: TextEncoding) -> Result<String> {
        match (&self.content, &self.src_path) {
            (Some(content), _) => Ok(content.clone()),
            (None, Some(path)) => read_text(path, encoding),
            (None, None) => Err(BuildError::InvalidRequest(
                "minification needs either `content` or `src_path`".to_string(),
            )),
        }
    }
}

/// Minified JavaScript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MinifiedJs {
    pub code: String,
    /// Always `None`: the minifier does not emit source maps
    pub source_map: Option<String>,
}

/// Minified CSS.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MinifiedCss {
    pub styles: String,
}

impl Build {
    /// Minify JavaScript, writing it to `dist_path` when given.
    pub fn minify_js(&self, request: &MinifyRequest) -> Result<MinifiedJs> {
        let encoding = self.settings().encoding;
        let source = request.input(encoding)?;
        let code = minify_js_source(&source)?;

        if let Some(dist_path) = &request.dist_path {
            write_text(dist_path, &code, encoding)?;
            tracing::info!("Minified JavaScript to {}", dist_path.display());
        }

        Ok(MinifiedJs {
            code,
            source_map: None,
        })
    }

    /// Minify CSS, writing it to `dist_path` when given.
    pub fn minify_css(&self, request: &MinifyRequest) -> Result<MinifiedCss> {
        let encoding = self.settings().encoding;
        let source = request.input(encoding)?;
        let styles = minify_css_source(&source).map_err(|message| BuildError::Minify {
            kind: "CSS",
            message,
        })?;

        if let Some(dist_path) = &request.dist_path {
            write_text(dist_path, &styles, encoding)?;
            tracing::info!("Minified CSS to {}", dist_path.display());
        }

        Ok(MinifiedCss { styles })
    }
}

fn minify_js_source(source: &str) -> Result<String> {
    let session = Session::new();
    let mut output = Vec::new();

    minify(&session, TopLevelMode::Global, source.as_bytes(), &mut output).map_err(|e| {
        BuildError::Minify {
            kind: "JavaScript",
            message: format!("{:?}", e),
        }
    })?;

    String::from_utf8(output).map_err(|e| BuildError::Minify {
        kind: "JavaScript",
        message: e.to_string(),
    })
}

/// Minify CSS using lightningcss.
fn minify_css_source(css: &str) -> Result<String, String> {
    let mut stylesheet = StyleSheet::parse(css, ParserOptions::default())
        .map_err(|e| format!("CSS parse error: {}", e))?;

    stylesheet
        .minify(MinifyOptions::default())
        .map_err(|e| format!("CSS minify error: {}", e))?;

    let minified = stylesheet
        .to_css(PrinterOptions {
            minify: true,
            ..Default::default()
        })
        .map_err(|e| format!("CSS minify error: {}", e))?;

    Ok(minified.code)
}
