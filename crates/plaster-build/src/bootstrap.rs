//! Bootstrap 3 bundle generation.
//!
//! The Less sources come from the Bootstrap package under the dependency
//! root. Both the package and the Less compiler are optional: when either is
//! missing the bundle is skipped and an empty string is returned.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use crate::builder::Build;
use crate::concat::join_files;
use crate::error::{BuildError, Result};

/// Bootstrap component sources, in cascade order, relative to `bootstrap/less`.
pub const BOOTSTRAP3_COMPONENTS: &[&str] = &[
    // Core variables and mixins
    "variables.less",
    "mixins.less",
    // Reset
    "normalize.less",
    // Core CSS
    "scaffolding.less",
    "type.less",
    "code.less",
    "grid.less",
    "tables.less",
    "forms.less",
    "buttons.less",
    // Components
    "component-animations.less",
    "dropdowns.less",
    "button-groups.less",
    "input-groups.less",
    "navs.less",
    "navbar.less",
    "breadcrumbs.less",
    "pagination.less",
    "pager.less",
    "labels.less",
    "badges.less",
    "jumbotron.less",
    "thumbnails.less",
    "alerts.less",
    "progress-bars.less",
    "media.less",
    "list-group.less",
    "panels.less",
    "responsive-embed.less",
    "wells.less",
    "close.less",
    // Components w/ JavaScript
    "modals.less",
    "tooltip.less",
    "popovers.less",
    "carousel.less",
    // Utility classes
    "utilities.less",
    "responsive-utilities.less",
];

/// Appended after the Bootstrap components, before compilation.
pub const BOOTSTRAP3_OVERRIDES: &str = r#"
.navbar { border-radius: 0; }
.btn:focus, .btn:active:focus { outline: none; }
"#;

/// A Less compiler.
#[async_trait]
pub trait LessCompiler: Send + Sync {
    /// Compile Less source to CSS. `include_dir` resolves `@import`s.
    ///
    /// Returns [`BuildError::DependencyUnavailable`] when the compiler itself
    /// cannot be found.
    async fn compile(&self, source: &str, include_dir: &Path) -> Result<String>;
}

/// Compiles Less through the `lessc` executable.
#[derive(Debug, Clone)]
pub struct Lessc {
    program: PathBuf,
}

impl Lessc {
    pub fn new() -> Self {
        Self::with_program("lessc")
    }

    /// Use a specific executable, e.g. `node_modules/.bin/lessc`.
    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for Lessc {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LessCompiler for Lessc {
    async fn compile(&self, source: &str, include_dir: &Path) -> Result<String> {
        let mut child = Command::new(&self.program)
            .arg("--no-color")
            .arg(format!("--include-path={}", include_dir.display()))
            .arg("-")
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => BuildError::DependencyUnavailable(format!(
                    "{} is not installed",
                    self.program.display()
                )),
                _ => BuildError::io(&self.program, e),
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            // An early exit closes the pipe; its status and stderr are checked below
            match stdin.write_all(source.as_bytes()).await {
                Err(e) if e.kind() != std::io::ErrorKind::BrokenPipe => {
                    return Err(BuildError::io(&self.program, e));
                }
                _ => {}
            }
        }

        let output = child
            .wait_with_output()
            .await
            .map_err(|e| BuildError::io(&self.program, e))?;

        if !output.status.success() {
            return Err(BuildError::StylesheetCompile(
                String::from_utf8_lossy(&output.stderr).trim().to_string(),
            ));
        }

        String::from_utf8(output.stdout)
            .map_err(|e| BuildError::StylesheetCompile(format!("lessc produced invalid UTF-8: {}", e)))
    }
}

impl Build {
    /// Compile the Bootstrap 3 bundle.
    ///
    /// An empty string means the bundle was skipped, not that it failed.
    pub async fn build_bootstrap3(&self) -> Result<String> {
        let less_dir = self.bootstrap3_dir();

        if !less_dir.is_dir() {
            tracing::info!(
                "Bootstrap 3 sources not found at {}, skipping bundle",
                less_dir.display()
            );
            return Ok(String::new());
        }

        let Some(compiler) = self.less.as_deref() else {
            tracing::info!("No Less compiler configured, skipping Bootstrap 3 bundle");
            return Ok(String::new());
        };

        let components: Vec<PathBuf> = BOOTSTRAP3_COMPONENTS
            .iter()
            .map(|name| less_dir.join(name))
            .collect();

        let mut source = join_files(&components, self.settings().encoding)?;
        source.push_str(BOOTSTRAP3_OVERRIDES);

        match compiler.compile(&source, &less_dir).await {
            Ok(css) => {
                tracing::info!("Compiled Bootstrap 3 bundle ({} bytes)", css.len());
                Ok(css)
            }
            Err(BuildError::DependencyUnavailable(reason)) => {
                tracing::info!("Skipping Bootstrap 3 bundle: {}", reason);
                Ok(String::new())
            }
            Err(e) => Err(e),
        }
    }

    fn bootstrap3_dir(&self) -> PathBuf {
        self.settings()
            .dependency_root
            .join("bootstrap")
            .join("less")
    }
}
