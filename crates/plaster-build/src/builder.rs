//! The `Build` entry point.
//!
//! `Build` owns the settings and the collaborators every operation delegates
//! to. The operations themselves live next to their collaborator:
//! templates in [`crate::templates`], concatenation in [`crate::concat`], and
//! so on, each as an `impl Build` block.

use std::fs;
use std::path::{Path, PathBuf};

use minijinja::Environment;

use crate::bootstrap::LessCompiler;
use crate::error::{BuildError, Result};
use crate::paths::resolve_under;
use crate::settings::{BuildSettings, TextEncoding};

/// Asset builder bound to a source and a distribution root.
pub struct Build {
    settings: BuildSettings,
    pub(crate) templates: Environment<'static>,
    pub(crate) less: Option<Box<dyn LessCompiler>>,
}

impl Build {
    /// Create a new builder without a Less compiler.
    pub fn new(settings: BuildSettings) -> Self {
        let mut templates = Environment::new();

        // Partials referenced with {% include %} / {% extends %} come from the source root
        templates.set_loader(minijinja::path_loader(settings.source_root.clone()));

        tracing::debug!(
            "Build configured: src={} dist={} encoding={}",
            settings.source_root.display(),
            settings.dist_root.display(),
            settings.encoding
        );

        Self {
            settings,
            templates,
            less: None,
        }
    }

    /// Attach the compiler used for the Bootstrap 3 bundle.
    pub fn with_less_compiler(mut self, compiler: impl LessCompiler + 'static) -> Self {
        self.less = Some(Box::new(compiler));
        self
    }

    /// Settings this build was constructed with.
    pub fn settings(&self) -> &BuildSettings {
        &self.settings
    }

    /// Resolve a path under the source root.
    pub fn resolve_source(&self, path: impl AsRef<Path>) -> PathBuf {
        resolve_under(
            path.as_ref(),
            &self.settings.source_root,
            self.settings.containment,
        )
    }

    /// Resolve a path under the distribution root.
    pub fn resolve_dist(&self, path: impl AsRef<Path>) -> PathBuf {
        resolve_under(
            path.as_ref(),
            &self.settings.dist_root,
            self.settings.containment,
        )
    }
}

impl Default for Build {
    fn default() -> Self {
        Self::new(BuildSettings::default())
    }
}

/// Read and decode a text file, blocking.
pub(crate) fn read_text(path: &Path, encoding: TextEncoding) -> Result<String> {
    let bytes = fs::read(path).map_err(|e| BuildError::io(path, e))?;

    encoding.decode(bytes).map_err(|message| BuildError::Encoding {
        path: path.to_path_buf(),
        message,
    })
}

/// Encode and write a text file, creating its parent directories first.
pub(crate) fn write_text(path: &Path, text: &str, encoding: TextEncoding) -> Result<()> {
    let bytes = encoding.encode(text).map_err(|message| BuildError::Encoding {
        path: path.to_path_buf(),
        message,
    })?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| BuildError::io(parent, e))?;
    }

    fs::write(path, bytes).map_err(|e| BuildError::io(path, e))?;
    tracing::debug!("Wrote {}", path.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn resolves_against_configured_roots() {
        let build = Build::new(BuildSettings {
            source_root: PathBuf::from("/site/src"),
            dist_root: PathBuf::from("/site/dist"),
            ..Default::default()
        });

        assert_eq!(build.resolve_source("a.html"), PathBuf::from("/site/src/a.html"));
        assert_eq!(build.resolve_dist("/site/dist/a.html"), PathBuf::from("/site/dist/a.html"));
    }

    #[test]
    fn write_text_creates_parents() {
        let temp = tempdir().unwrap();
        let target = temp.path().join("a/b/c.txt");

        write_text(&target, "hello", TextEncoding::Utf8).unwrap();

        assert_eq!(fs::read_to_string(target).unwrap(), "hello");
    }

    #[test]
    fn read_text_reports_missing_path() {
        let temp = tempdir().unwrap();
        let missing = temp.path().join("missing.txt");

        match read_text(&missing, TextEncoding::Utf8) {
            Err(BuildError::Io { path, .. }) => assert_eq!(path, missing),
            other => panic!("expected Io error, got {:?}", other),
        }
    }

    #[test]
    fn text_helpers_use_the_given_encoding() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("latin1.css");
        fs::write(&path, [0x2f, 0x2a, 0xe9, 0x2a, 0x2f]).unwrap();

        assert!(matches!(
            read_text(&path, TextEncoding::Utf8),
            Err(BuildError::Encoding { .. })
        ));

        let text = read_text(&path, TextEncoding::Latin1).unwrap();
        assert_eq!(text, "/*é*/");

        write_text(&path, &text, TextEncoding::Latin1).unwrap();
        assert_eq!(fs::read(&path).unwrap(), vec![0x2f, 0x2a, 0xe9, 0x2a, 0x2f]);
    }
}
