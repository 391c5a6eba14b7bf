use crate::error::{CliError, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileConfig {
    pub temp_dir: Option<PathBuf>,
    pub validation: Option<FileValidationConfig>,
    pub model: Option<FileModelConfig>,
    pub sampling: Option<FileSamplingConfig>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileValidationConfig {
    pub max_file_size_mb: Option<f64>,
    pub min_ca_atoms: Option<usize>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileModelConfig {
    pub program_root: Option<PathBuf>,
    pub script: Option<String>,
    pub interpreter: Option<PathBuf>,
    /// Relative paths are resolved against the program root.
    pub weights_dir: Option<PathBuf>,
    pub model_name: Option<String>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileSamplingConfig {
    pub temperature: Option<f64>,
    pub seed: Option<u64>,
    pub timeout_seconds: Option<u64>,
}

impl FileConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn full_file_deserializes() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            r#"
            temp-dir = "/scratch"

            [validation]
            max-file-size-mb = 5.5
            min-ca-atoms = 20

            [model]
            program-root = "/opt/ProteinMPNN"
            script = "run.py"
            interpreter = "/usr/bin/python3"
            weights-dir = "ca_model_weights"
            model-name = "v_48_030"

            [sampling]
            temperature = 0.3
            seed = 1
            timeout-seconds = 60
            "#,
        )
        .unwrap();

        let cfg = FileConfig::from_file(&path).unwrap();
        assert_eq!(cfg.temp_dir, Some(PathBuf::from("/scratch")));
        let validation = cfg.validation.unwrap();
        assert_eq!(validation.max_file_size_mb, Some(5.5));
        assert_eq!(validation.min_ca_atoms, Some(20));
        let model = cfg.model.unwrap();
        assert_eq!(model.model_name.as_deref(), Some("v_48_030"));
        assert_eq!(model.weights_dir, Some(PathBuf::from("ca_model_weights")));
        let sampling = cfg.sampling.unwrap();
        assert_eq!(sampling.timeout_seconds, Some(60));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[sampling]\ntemprature = 0.3\n").unwrap();

        let err = FileConfig::from_file(&path).unwrap_err();
        assert!(matches!(err, CliError::FileParsing { .. }));
    }
}
