//! Single template render command.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use plaster_build::{TemplateData, TemplateJob};

use crate::manifest::Manifest;

/// Run the render command.
pub async fn run(config: &Path, source: PathBuf, target: PathBuf, data: Option<PathBuf>) -> Result<()> {
    let manifest = Manifest::load_or_default(config)?;
    let build = manifest.build();

    let mut job = TemplateJob::new(source, target);
    if let Some(data) = data {
        job.data = load_data(&data)?;
    }

    let rendered = build
        .render_templates(std::slice::from_ref(&job), &manifest.data)
        .await
        .context("Template rendering failed")?;

    for output in rendered {
        tracing::info!("Wrote {}", output.target.display());
    }

    Ok(())
}

/// Load template data from a JSON, YAML or TOML file.
pub fn load_data(path: &Path) -> Result<TemplateData> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read data file {}", path.display()))?;

    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    let data: TemplateData = match ext {
        "json" => serde_json::from_str(&content)?,
        "yaml" | "yml" => serde_yaml::from_str(&content)?,
        "toml" => toml::from_str(&content)?,
        other => bail!("Unsupported data file extension: {:?}", other),
    };

    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use tempfile::tempdir;

    #[test]
    fn loads_each_data_format() {
        let temp = tempdir().unwrap();
        let files = [
            ("data.json", r#"{"title": "Home", "n": 1}"#),
            ("data.yaml", "title: Home\nn: 1\n"),
            ("data.toml", "title = \"Home\"\nn = 1\n"),
        ];

        for (name, body) in files {
            let path = temp.path().join(name);
            fs::write(&path, body).unwrap();

            let data = load_data(&path).unwrap();

            assert_eq!(data["title"], json!("Home"), "{}", name);
            assert_eq!(data["n"], json!(1), "{}", name);
        }
    }

    #[test]
    fn rejects_unknown_extension() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("data.ini");
        fs::write(&path, "title=Home").unwrap();

        assert!(load_data(&path).is_err());
    }
}
