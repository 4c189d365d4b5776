//! Error types for plaster-build.

use std::path::{Path, PathBuf};

/// Errors that can occur during a build operation.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to render template {name}: {message}")]
    Template { name: String, message: String },

    #[error("Failed to compile stylesheet: {0}")]
    StylesheetCompile(String),

    #[error("Failed to minify {kind}: {message}")]
    Minify { kind: &'static str, message: String },

    #[error("Dependency unavailable: {0}")]
    DependencyUnavailable(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Encoding error at {}: {message}", path.display())]
    Encoding { path: PathBuf, message: String },
}

impl BuildError {
    /// Wrap an I/O error with the path it happened on.
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}

pub type Result<T, E = BuildError> = std::result::Result<T, E>;
