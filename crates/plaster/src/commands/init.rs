//! Initialize a plaster project.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// Run the init command.
pub async fn run(config: &Path, yes: bool) -> Result<()> {
    tracing::info!("Initializing plaster...");

    let root = config.parent().unwrap_or(Path::new(""));
    scaffold(root, config, yes)?;

    tracing::info!("Initialization complete!");
    tracing::info!("Run 'plaster build' to build your assets.");

    Ok(())
}

fn scaffold(root: &Path, config: &Path, yes: bool) -> Result<()> {
    let src_dir = root.join("src");

    // Check if src already exists
    if src_dir.exists() && !yes {
        tracing::warn!("src/ directory already exists. Use --yes to overwrite.");
        return Ok(());
    }

    let files = [
        (config.to_path_buf(), DEFAULT_MANIFEST),
        (src_dir.join("index.html"), DEFAULT_INDEX),
        (src_dir.join("partials/head.html"), DEFAULT_HEAD),
        (src_dir.join("scss/site.scss"), DEFAULT_SCSS),
        (src_dir.join("js/app.js"), DEFAULT_JS),
    ];

    for (path, contents) in files {
        if path.exists() && !yes {
            continue;
        }

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::write(&path, contents)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        tracing::info!("Created {}", path.display());
    }

    Ok(())
}

const DEFAULT_MANIFEST: &str = r#"# Plaster Configuration

[settings]
# Template sources
src = "src"

# Build output
dist = "dist"

# Encoding for template files (utf-8 or latin1)
file_encoding = "utf-8"

# Where bootstrap/less is looked up
dependencies = "node_modules"

[data]
site = "My Site"

[[scss]]
file = "src/scss/site.scss"
out = "dist/css/site.css"

# Prepend "bootstrap3" to bundle Bootstrap (needs lessc)
[[concat]]
files = ["dist/css/site.css"]
out = "dist/css/bundle.css"

[[minify_css]]
src = "dist/css/bundle.css"
out = "dist/css/bundle.min.css"

[[minify_js]]
src = "src/js/app.js"
out = "dist/js/app.min.js"

[[templates]]
source = "index.html"
target = "index.html"
data = { title = "Home" }
"#;

const DEFAULT_INDEX: &str = r#"<!DOCTYPE html>
<html lang="en">
{% include "partials/head.html" %}
<body>
  <h1>{{ title }}</h1>
  <p>Welcome to {{ site }}.</p>
  <script src="js/app.min.js"></script>
</body>
</html>
"#;

const DEFAULT_HEAD: &str = r#"<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>{{ title }} - {{ site }}</title>
  <link rel="stylesheet" href="css/bundle.min.css">
</head>
"#;

const DEFAULT_SCSS: &str = r#"$text: #222;
$accent: #336699;

body {
  color: $text;
  font-family: system-ui, sans-serif;

  a {
    color: $accent;
  }
}
"#;

const DEFAULT_JS: &str = r#"document.addEventListener('DOMContentLoaded', function () {
  var links = document.querySelectorAll('a[href^="http"]');
  for (var i = 0; i < links.length; i++) {
    links[i].setAttribute('rel', 'noopener');
  }
});
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::Manifest;
    use tempfile::tempdir;

    #[test]
    fn scaffolds_a_valid_manifest() {
        let temp = tempdir().unwrap();
        let config = temp.path().join("plaster.toml");

        scaffold(temp.path(), &config, false).unwrap();

        let manifest = Manifest::load(&config).unwrap().unwrap();
        assert_eq!(manifest.templates.len(), 1);
        assert!(temp.path().join("src/partials/head.html").exists());
        assert!(temp.path().join("src/js/app.js").exists());
    }

    #[test]
    fn leaves_existing_sources_alone() {
        let temp = tempdir().unwrap();
        let config = temp.path().join("plaster.toml");
        fs::create_dir_all(temp.path().join("src")).unwrap();
        fs::write(temp.path().join("src/index.html"), "mine").unwrap();

        scaffold(temp.path(), &config, false).unwrap();

        assert_eq!(fs::read_to_string(temp.path().join("src/index.html")).unwrap(), "mine");
        assert!(!config.exists());
    }
}
