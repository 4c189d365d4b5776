//! Manifest build command.

use std::path::Path;
use std::time::Instant;

use anyhow::{bail, Context, Result};
use plaster_build::{Build, CopyRequest, MinifyRequest, ScssOptions, TemplateJob};

use crate::manifest::Manifest;

/// Totals reported after a build.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct BuildSummary {
    pub copied: usize,
    pub stylesheets: usize,
    pub bundles: usize,
    pub minified: usize,
    pub templates: usize,
}

/// Run the build command.
pub async fn run(config: &Path) -> Result<()> {
    tracing::info!("Building assets...");
    let start = Instant::now();

    let Some(manifest) = Manifest::load(config)? else {
        bail!(
            "Manifest not found: {}. Run 'plaster init' first.",
            config.display()
        );
    };

    let build = manifest.build();
    let summary = execute(&build, &manifest).await?;

    tracing::info!(
        "Copied {} files, compiled {} stylesheets, wrote {} bundles, minified {} files, rendered {} templates in {}ms",
        summary.copied,
        summary.stylesheets,
        summary.bundles,
        summary.minified,
        summary.templates,
        start.elapsed().as_millis()
    );
    tracing::info!("Output: {}", build.settings().dist_root.display());

    Ok(())
}

/// Run every manifest step in order, stopping at the first failure.
pub async fn execute(build: &Build, manifest: &Manifest) -> Result<BuildSummary> {
    let mut summary = BuildSummary::default();

    for step in &manifest.copy {
        summary.copied += build
            .copy_assets(&CopyRequest::from(step))
            .with_context(|| format!("Copy into {} failed", step.dist.display()))?;
    }

    for step in &manifest.scss {
        build
            .compile_scss(&ScssOptions::from(step))
            .await
            .context("SCSS step failed")?;
        summary.stylesheets += 1;
    }

    for step in &manifest.concat {
        build
            .concat_files(&step.entries(), step.out.as_deref())
            .await
            .context("Concat step failed")?;
        summary.bundles += 1;
    }

    for step in &manifest.minify_css {
        build
            .minify_css(&MinifyRequest::from(step))
            .context("CSS minify step failed")?;
        summary.minified += 1;
    }

    for step in &manifest.minify_js {
        build
            .minify_js(&MinifyRequest::from(step))
            .context("JavaScript minify step failed")?;
        summary.minified += 1;
    }

    let jobs: Vec<TemplateJob> = manifest.templates.iter().map(TemplateJob::from).collect();
    if !jobs.is_empty() {
        summary.templates = build
            .render_templates(&jobs, &manifest.data)
            .await
            .context("Template step failed")?
            .len();
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::tempdir;

    #[tokio::test]
    async fn runs_manifest_steps_in_order() {
        let temp = tempdir().unwrap();
        let root = temp.path();
        fs::create_dir_all(root.join("src/scss")).unwrap();
        fs::create_dir_all(root.join("src/img")).unwrap();
        fs::write(root.join("src/img/logo.svg"), "<svg/>").unwrap();
        fs::write(root.join("src/scss/site.scss"), ".a { .b { color: red; } }").unwrap();
        fs::write(root.join("src/app.js"), "function add(a, b) { return a + b; }").unwrap();
        fs::write(root.join("src/index.html"), "{{ site }} - {{ title }} ({{ fileName }})").unwrap();

        let manifest = Manifest::parse(&format!(
            r#"
[settings]
src = "{root}/src"
dist = "{root}/dist"
dependencies = "{root}/node_modules"

[data]
site = "Example"

[[copy]]
sources = ["{root}/src/img"]
dist = "{root}/dist/assets"

[[scss]]
file = "{root}/src/scss/site.scss"
out = "{root}/dist/css/site.css"

[[concat]]
files = ["bootstrap3", "{root}/dist/css/site.css"]
out = "{root}/dist/css/bundle.css"

[[minify_css]]
src = "{root}/dist/css/bundle.css"
out = "{root}/dist/css/bundle.min.css"

[[minify_js]]
src = "{root}/src/app.js"
out = "{root}/dist/js/app.min.js"

[[templates]]
source = "index.html"
target = "index.html"
data = {{ title = "Home" }}
"#,
            root = root.display().to_string().replace('\\', "/")
        ))
        .unwrap();

        let build = manifest.build();
        let summary = execute(&build, &manifest).await.unwrap();

        assert_eq!(
            summary,
            BuildSummary {
                copied: 1,
                stylesheets: 1,
                bundles: 1,
                minified: 2,
                templates: 1,
            }
        );
        assert!(root.join("dist/assets/img/logo.svg").exists());
        assert!(fs::read_to_string(root.join("dist/css/bundle.min.css"))
            .unwrap()
            .contains(".a .b"));
        assert!(root.join("dist/js/app.min.js").exists());
        assert_eq!(
            fs::read_to_string(root.join("dist/index.html")).unwrap(),
            "Example - Home (index.html)"
        );
    }

    #[tokio::test]
    async fn stops_at_failing_step() {
        let temp = tempdir().unwrap();
        let root = temp.path().display().to_string().replace('\\', "/");

        let manifest = Manifest::parse(&format!(
            r#"
[[concat]]
files = ["{root}/missing.css"]
out = "{root}/dist/bundle.css"

[[minify_js]]
content = "var a = 1;"
out = "{root}/dist/a.js"
"#
        ))
        .unwrap();

        let result = execute(&manifest.build(), &manifest).await;

        assert!(result.is_err());
        assert!(!temp.path().join("dist/a.js").exists());
    }
}
