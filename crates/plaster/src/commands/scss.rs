//! SCSS compile command.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use plaster_build::{OutputStyle, ScssOptions};

use super::{emit, open_build};

/// Run the scss command.
pub async fn run(config: &Path, file: PathBuf, out: Option<PathBuf>, style: OutputStyle) -> Result<()> {
    let build = open_build(config)?;
    let options = ScssOptions {
        output_style: style,
        out_file: out,
        ..ScssOptions::from_file(file)
    };

    let compiled = build
        .compile_scss(&options)
        .await
        .context("SCSS compilation failed")?;

    if options.out_file.is_none() {
        emit(&compiled.css)?;
    }

    Ok(())
}
