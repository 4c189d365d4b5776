//! CLI commands.

pub mod build;
pub mod concat;
pub mod copy;
pub mod init;
pub mod minify;
pub mod render;
pub mod scss;

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use plaster_build::Build;

use crate::manifest::Manifest;

/// Builder configured from the manifest at `config`, or defaults if absent.
pub(crate) fn open_build(config: &Path) -> Result<Build> {
    Ok(Manifest::load_or_default(config)?.build())
}

/// Write command output to stdout.
pub(crate) fn emit(text: &str) -> Result<()> {
    let mut stdout = std::io::stdout().lock();
    stdout
        .write_all(text.as_bytes())
        .and_then(|_| stdout.flush())
        .context("Failed to write to stdout")
}
