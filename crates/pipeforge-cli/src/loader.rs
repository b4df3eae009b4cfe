//! Reading definitions and catalogs from disk.
//!
//! Both file kinds are decoded with `serde_yaml`, which also accepts JSON.

use std::path::Path;

use anyhow::Context;
use pipeforge_common::config::PipeforgeConfig;
use pipeforge_common::error::PipeforgeError;
use pipeforge_translate::registry::ComponentRegistry;
use serde_json::Value;

fn read(path: &Path) -> Result<String, PipeforgeError> {
    std::fs::read_to_string(path).map_err(|source| PipeforgeError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Reads a pipeline definition file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or decoded.
pub fn read_definition(path: &Path) -> anyhow::Result<Value> {
    let content = read(path)?;
    let definition = serde_yaml::from_str(&content)
        .with_context(|| format!("failed to decode definition {}", path.display()))?;
    tracing::debug!(path = %path.display(), "definition loaded");
    Ok(definition)
}

/// Reads a catalog file, or returns the defaults when `path` is `None`.
///
/// # Errors
///
/// Returns an error if the file cannot be read or decoded.
pub fn read_catalog(path: Option<&Path>) -> anyhow::Result<PipeforgeConfig> {
    let Some(path) = path else {
        return Ok(PipeforgeConfig::default());
    };
    let content = read(path)?;
    let config: PipeforgeConfig = serde_yaml::from_str(&content)
        .with_context(|| format!("failed to decode catalog {}", path.display()))?;
    tracing::debug!(
        path = %path.display(),
        components = config.components.len(),
        "catalog loaded"
    );
    Ok(config)
}

/// Builds the registry described by the catalog at `path`.
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded or names an invalid or
/// duplicate type.
pub fn load_registry(path: Option<&Path>) -> anyhow::Result<ComponentRegistry> {
    let config = read_catalog(path)?;
    Ok(ComponentRegistry::from_config(&config)?)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use serde_json::json;
    use tempfile::NamedTempFile;

    use super::*;

    fn file_with(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("temp file");
        file.write_all(content.as_bytes()).expect("write");
        file
    }

    #[test]
    fn read_yaml_definition() {
        let file = file_with(
            "pipeline.Sequential:\n  steps:\n    - x.Scaler\n    - x.PCA:\n        n_components: 3\n",
        );
        let definition = read_definition(file.path()).expect("should decode");
        assert_eq!(
            definition,
            json!({"pipeline.Sequential": {"steps": ["x.Scaler", {"x.PCA": {"n_components": 3}}]}})
        );
    }

    #[test]
    fn read_json_definition() {
        let file = file_with(r#"["x.A", {"x.B": null}]"#);
        let definition = read_definition(file.path()).expect("should decode");
        assert_eq!(definition, json!(["x.A", {"x.B": null}]));
    }

    #[test]
    fn missing_definition_reports_path() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("absent.yaml");
        let err = read_definition(&path).unwrap_err();
        assert!(err.to_string().contains("absent.yaml"), "got: {err}");
    }

    #[test]
    fn no_catalog_means_defaults() {
        let config = read_catalog(None).expect("defaults");
        assert_eq!(config, PipeforgeConfig::default());
    }

    #[test]
    fn catalog_from_yaml() {
        let file = file_with(
            "parallel_container: sklearn.pipeline.FeatureUnion\ncomponents:\n  - sklearn.decomposition.PCA\n",
        );
        let config = read_catalog(Some(file.path())).expect("should decode");
        assert_eq!(config.parallel_container, "sklearn.pipeline.FeatureUnion");
        assert_eq!(config.sequential_container, "pipeline.Sequential");
        assert_eq!(config.components, vec!["sklearn.decomposition.PCA"]);
    }

    #[test]
    fn catalog_with_unknown_field_is_rejected() {
        let file = file_with("containers: []\n");
        assert!(read_catalog(Some(file.path())).is_err());
    }

    #[test]
    fn registry_from_catalog_file() {
        let file = file_with("components: [x.A, x.B]\n");
        let registry = load_registry(Some(file.path())).expect("should build");
        assert!(registry.contains("x.A"));
        assert!(registry.contains("pipeline.Parallel"));
        assert_eq!(registry.len(), 4);
    }

    #[test]
    fn registry_rejects_duplicate_catalog_entry() {
        let file = file_with("components: [x.A, x.A]\n");
        let err = load_registry(Some(file.path())).unwrap_err();
        assert!(err.to_string().contains("already registered"), "got: {err}");
    }
}
