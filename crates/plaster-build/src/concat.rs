//! Ordered file concatenation.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::builder::{read_text, write_text, Build};
use crate::error::Result;
use crate::settings::TextEncoding;

/// Reserved entry that expands to the compiled Bootstrap 3 bundle.
pub const BOOTSTRAP3_TOKEN: &str = "bootstrap3";

/// One input of a concatenation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConcatEntry {
    /// A file read from disk
    File(PathBuf),
    /// The generated Bootstrap 3 bundle
    Bootstrap3,
}

impl From<&str> for ConcatEntry {
    fn from(value: &str) -> Self {
        if value == BOOTSTRAP3_TOKEN {
            Self::Bootstrap3
        } else {
            Self::File(PathBuf::from(value))
        }
    }
}

impl From<String> for ConcatEntry {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl From<PathBuf> for ConcatEntry {
    fn from(value: PathBuf) -> Self {
        Self::File(value)
    }
}

impl From<&Path> for ConcatEntry {
    fn from(value: &Path) -> Self {
        Self::File(value.to_path_buf())
    }
}

impl fmt::Display for ConcatEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Bootstrap3 => f.write_str(BOOTSTRAP3_TOKEN),
        }
    }
}

impl Build {
    /// Join entries with newlines, in order, optionally writing the result.
    ///
    /// Every input is read before anything is written, so a missing file
    /// leaves `dist_path` untouched.
    pub async fn concat_files(
        &self,
        entries: &[ConcatEntry],
        dist_path: Option<&Path>,
    ) -> Result<String> {
        let encoding = self.settings().encoding;
        let mut pieces = Vec::with_capacity(entries.len());

        for entry in entries {
            let piece = match entry {
                ConcatEntry::Bootstrap3 => self.build_bootstrap3().await?,
                ConcatEntry::File(path) => read_text(path, encoding)?,
            };
            pieces.push(piece);
        }

        let joined = pieces.join("\n");

        if let Some(dist_path) = dist_path {
            write_text(dist_path, &joined, encoding)?;
            tracing::info!(
                "Concatenated {} files into {}",
                entries.len(),
                dist_path.display()
            );
        }

        Ok(joined)
    }
}

/// Read and join files synchronously.
pub(crate) fn join_files<P: AsRef<Path>>(paths: &[P], encoding: TextEncoding) -> Result<String> {
    let pieces = paths
        .iter()
        .map(|p| read_text(p.as_ref(), encoding))
        .collect::<Result<Vec<_>>>()?;

    Ok(pieces.join("\n"))
}
