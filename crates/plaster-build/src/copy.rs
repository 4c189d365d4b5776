//! Recursive asset copying.

use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::builder::Build;
use crate::error::{BuildError, Result};

/// Files or directories to copy into `dist`.
#[derive(Debug, Clone, Default)]
pub struct CopyRequest {
    pub sources: Vec<PathBuf>,
    pub dist: PathBuf,
}

impl CopyRequest {
    pub fn new(sources: impl IntoIterator<Item = impl Into<PathBuf>>, dist: impl Into<PathBuf>) -> Self {
        Self {
            sources: sources.into_iter().map(Into::into).collect(),
            dist: dist.into(),
        }
    }
}

impl Build {
    /// Copy each source into `dist/<name>`, in order, stopping at the first failure.
    ///
    /// Returns the number of files copied.
    pub fn copy_assets(&self, request: &CopyRequest) -> Result<usize> {
        fs::create_dir_all(&request.dist).map_err(|e| BuildError::io(&request.dist, e))?;
        let dist = fs::canonicalize(&request.dist).map_err(|e| BuildError::io(&request.dist, e))?;

        let mut copied = 0;
        for source in &request.sources {
            let name = source.file_name().ok_or_else(|| {
                BuildError::InvalidRequest(format!("cannot copy {}: no file name", source.display()))
            })?;

            // The walk would otherwise descend into its own output
            let resolved = fs::canonicalize(source).map_err(|e| BuildError::io(source, e))?;
            if dist.join(name).starts_with(&resolved) {
                return Err(BuildError::InvalidRequest(format!(
                    "cannot copy {} into {}: destination is inside the source",
                    source.display(),
                    request.dist.display()
                )));
            }

            copied += copy_tree(source, &request.dist.join(name))?;
        }

        tracing::info!(
            "Copied {} files into {}",
            copied,
            request.dist.display()
        );

        Ok(copied)
    }
}

/// Copy a file or a directory tree to `dest`.
fn copy_tree(source: &Path, dest: &Path) -> Result<usize> {
    let mut copied = 0;

    for entry in WalkDir::new(source).follow_links(true) {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(source).to_path_buf();
            BuildError::io(&path, e.into())
        })?;

        let relative = entry.path().strip_prefix(source).unwrap_or(Path::new(""));
        let target = if relative.as_os_str().is_empty() {
            dest.to_path_buf()
        } else {
            dest.join(relative)
        };

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target).map_err(|e| BuildError::io(&target, e))?;
            continue;
        }

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(|e| BuildError::io(parent, e))?;
        }
        fs::copy(entry.path(), &target).map_err(|e| BuildError::io(entry.path(), e))?;
        tracing::debug!("Copied {} -> {}", entry.path().display(), target.display());
        copied += 1;
    }

    Ok(copied)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn copies_files_and_trees() {
        let temp = tempdir().unwrap();
        let file_a = temp.path().join("robots.txt");
        let dir_b = temp.path().join("img");
        fs::write(&file_a, "User-agent: *").unwrap();
        fs::create_dir_all(dir_b.join("icons")).unwrap();
        fs::write(dir_b.join("logo.svg"), "<svg/>").unwrap();
        fs::write(dir_b.join("icons/star.svg"), "<svg id=star/>").unwrap();

        let dist = temp.path().join("dist/assets");
        let build = Build::default();

        let copied = build
            .copy_assets(&CopyRequest::new([&file_a, &dir_b], &dist))
            .unwrap();

        assert_eq!(copied, 3);
        assert_eq!(fs::read_to_string(dist.join("robots.txt")).unwrap(), "User-agent: *");
        assert_eq!(fs::read_to_string(dist.join("img/logo.svg")).unwrap(), "<svg/>");
        assert_eq!(
            fs::read_to_string(dist.join("img/icons/star.svg")).unwrap(),
            "<svg id=star/>"
        );
    }

    #[test]
    fn copies_empty_directories() {
        let temp = tempdir().unwrap();
        let fonts = temp.path().join("fonts");
        fs::create_dir_all(fonts.join("empty")).unwrap();

        let dist = temp.path().join("dist");
        Build::default()
            .copy_assets(&CopyRequest::new([&fonts], &dist))
            .unwrap();

        assert!(dist.join("fonts/empty").is_dir());
    }

    #[test]
    fn rejects_destination_inside_source() {
        let temp = tempdir().unwrap();
        let site = temp.path().join("site");
        fs::create_dir_all(&site).unwrap();
        fs::write(site.join("index.html"), "<p/>").unwrap();

        let out = site.join("out");
        let result = Build::default().copy_assets(&CopyRequest::new([&site], &out));

        assert!(matches!(result, Err(BuildError::InvalidRequest(_))));
        assert!(!out.join("site").exists());
    }

    #[test]
    fn rejects_destination_inside_source_via_relative_path() {
        let temp = tempdir().unwrap();
        let site = temp.path().join("site");
        fs::create_dir_all(site.join("img")).unwrap();
        fs::write(site.join("img/a.png"), "png").unwrap();

        let dist = site.join("img/../img/build");
        let result = Build::default().copy_assets(&CopyRequest::new([site.join("img")], &dist));

        assert!(matches!(result, Err(BuildError::InvalidRequest(_))));
        assert!(!site.join("img/build/img").exists());
    }

    #[test]
    fn stops_at_first_missing_source() {
        let temp = tempdir().unwrap();
        let present = temp.path().join("present.txt");
        let later = temp.path().join("later.txt");
        fs::write(&present, "1").unwrap();
        fs::write(&later, "2").unwrap();

        let dist = temp.path().join("dist");
        let request = CopyRequest::new(
            [present, temp.path().join("missing.txt"), later],
            &dist,
        );

        let result = Build::default().copy_assets(&request);

        assert!(matches!(result, Err(BuildError::Io { .. })));
        assert!(dist.join("present.txt").exists());
        assert!(!dist.join("later.txt").exists());
    }
}
