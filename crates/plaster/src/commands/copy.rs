//! Asset copy command.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use plaster_build::CopyRequest;

use super::open_build;

/// Run the copy command.
pub fn run(config: &Path, sources: Vec<PathBuf>, dist: PathBuf) -> Result<()> {
    let build = open_build(config)?;

    build
        .copy_assets(&CopyRequest::new(sources, dist))
        .context("Copy failed")?;

    Ok(())
}
