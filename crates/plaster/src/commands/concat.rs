//! Concatenation and Bootstrap bundle commands.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use plaster_build::ConcatEntry;

use super::{emit, open_build};

/// Run the concat command.
pub async fn run(config: &Path, files: Vec<String>, out: Option<PathBuf>) -> Result<()> {
    let build = open_build(config)?;
    let entries: Vec<ConcatEntry> = files.into_iter().map(ConcatEntry::from).collect();

    let joined = build
        .concat_files(&entries, out.as_deref())
        .await
        .context("Concatenation failed")?;

    if out.is_none() {
        emit(&joined)?;
    }

    Ok(())
}

/// Run the bootstrap command.
pub async fn run_bootstrap(config: &Path, out: Option<PathBuf>) -> Result<()> {
    run(config, vec![plaster_build::concat::BOOTSTRAP3_TOKEN.to_string()], out).await
}
