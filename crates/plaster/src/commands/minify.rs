//! Minification commands.

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use plaster_build::MinifyRequest;

use super::{emit, open_build};

/// What to minify.
#[derive(Debug, Clone, Copy)]
pub enum Kind {
    Js,
    Css,
}

/// Run a minify command. Reads stdin when `src` is not given.
pub fn run(config: &Path, kind: Kind, src: Option<PathBuf>, out: Option<PathBuf>) -> Result<()> {
    let build = open_build(config)?;

    let mut request = match src {
        Some(src) => MinifyRequest::file(src),
        None => {
            let mut content = String::new();
            std::io::stdin()
                .read_to_string(&mut content)
                .context("Failed to read stdin")?;
            MinifyRequest::content(content)
        }
    };
    request.dist_path = out;

    let minified = match kind {
        Kind::Js => build.minify_js(&request).map(|m| m.code),
        Kind::Css => build.minify_css(&request).map(|m| m.styles),
    }
    .context("Minification failed")?;

    if request.dist_path.is_none() {
        emit(&minified)?;
    }

    Ok(())
}
