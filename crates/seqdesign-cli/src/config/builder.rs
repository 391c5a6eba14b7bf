use super::defaults::DefaultsConfig;
use super::file::FileConfig;
use super::models::AppConfig;
use crate::data::DataManager;
use crate::error::{CliError, Result};
use crate::utils::parser;
use seqdesign::engine::config as core_config;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// Values taken from the command line, highest precedence first.
#[derive(Debug, Default, Clone)]
pub struct ConfigOverrides {
    pub config_file: Option<PathBuf>,
    pub set_values: Vec<String>,
    pub temperature: Option<f64>,
    pub seed: Option<u64>,
    pub timeout_seconds: Option<u64>,
}

pub fn build_config(overrides: &ConfigOverrides, data_manager: &DataManager) -> Result<AppConfig> {
    let defaults = DefaultsConfig::default();

    let file_config = if let Some(config_path) = &overrides.config_file {
        FileConfig::from_file(config_path)?
    } else {
        FileConfig::default()
    };

    let mut file_config = apply_set_values(file_config, &overrides.set_values)?;

    let validation_file = file_config.validation.take().unwrap_or_default();
    let validation = core_config::ValidationConfig {
        min_ca_atoms: validation_file
            .min_ca_atoms
            .unwrap_or(defaults.min_ca_atoms),
        ..Default::default()
    }
    .with_max_file_size_mb(
        validation_file
            .max_file_size_mb
            .unwrap_or(defaults.max_file_size_mb),
    )
    .map_err(|e| CliError::Config(e.to_string()))?;

    let sampling_file = file_config.sampling.take().unwrap_or_default();
    let temperature = overrides
        .temperature
        .or(sampling_file.temperature)
        .unwrap_or(defaults.temperature);
    if !(temperature.is_finite() && temperature > 0.0) {
        return Err(CliError::Config(format!(
            "Sampling temperature must be a positive number, got {}",
            temperature
        )));
    }
    let sampling = core_config::SamplingConfig {
        temperature,
        seed: overrides
            .seed
            .or(sampling_file.seed)
            .unwrap_or(defaults.seed),
    };
    let timeout_seconds = overrides
        .timeout_seconds
        .or(sampling_file.timeout_seconds)
        .unwrap_or(defaults.timeout_seconds);

    let model_file = file_config.model.take().unwrap_or_default();
    let program_root = model_file
        .program_root
        .unwrap_or_else(|| data_manager.program_root());
    let weights_dir = program_root.join(
        model_file
            .weights_dir
            .unwrap_or_else(|| PathBuf::from(&defaults.weights_subdir)),
    );

    let invocation = core_config::InvocationConfigBuilder::new()
        .program_root(program_root)
        .script_name(model_file.script.unwrap_or(defaults.script))
        .interpreter(
            model_file
                .interpreter
                .unwrap_or_else(|| PathBuf::from(&defaults.interpreter)),
        )
        .weights_dir(weights_dir)
        .model_name(model_file.model_name.unwrap_or(defaults.model_name))
        .timeout(Duration::from_secs(timeout_seconds))
        .build()
        .map_err(|e| CliError::Config(e.to_string()))?;

    Ok(AppConfig {
        design: core_config::DesignConfig {
            validation,
            sampling,
            temp_dir: file_config.temp_dir,
        },
        invocation,
    })
}

fn parse_value<T: FromStr>(key: &str, value: &str, kind: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| CliError::Config(format!("Invalid {} value for {}: {}", kind, key, value)))
}

fn apply_set_values(mut config: FileConfig, set_values: &[String]) -> Result<FileConfig> {
    for kv_pair in set_values {
        let (key, value_str) =
            parser::split_key_value(kv_pair).map_err(|e| CliError::Config(e.to_string()))?;

        match key {
            "temp-dir" => {
                config.temp_dir = Some(PathBuf::from(value_str));
            }
            "validation.max-file-size-mb" => {
                config
                    .validation
                    .get_or_insert_with(Default::default)
                    .max_file_size_mb = Some(parse_value(key, value_str, "float")?);
            }
            "validation.min-ca-atoms" => {
                config
                    .validation
                    .get_or_insert_with(Default::default)
                    .min_ca_atoms = Some(parse_value(key, value_str, "integer")?);
            }
            "model.program-root" => {
                config.model.get_or_insert_with(Default::default).program_root =
                    Some(PathBuf::from(value_str));
            }
            "model.script" => {
                config.model.get_or_insert_with(Default::default).script =
                    Some(value_str.to_string());
            }
            "model.interpreter" => {
                config.model.get_or_insert_with(Default::default).interpreter =
                    Some(PathBuf::from(value_str));
            }
            "model.weights-dir" => {
                config.model.get_or_insert_with(Default::default).weights_dir =
                    Some(PathBuf::from(value_str));
            }
            "model.model-name" => {
                config.model.get_or_insert_with(Default::default).model_name =
                    Some(value_str.to_string());
            }
            "sampling.temperature" => {
                config
                    .sampling
                    .get_or_insert_with(Default::default)
                    .temperature = Some(parse_value(key, value_str, "float")?);
            }
            "sampling.seed" => {
                config.sampling.get_or_insert_with(Default::default).seed =
                    Some(parse_value(key, value_str, "integer")?);
            }
            "sampling.timeout-seconds" => {
                config
                    .sampling
                    .get_or_insert_with(Default::default)
                    .timeout_seconds = Some(parse_value(key, value_str, "integer")?);
            }
            _ => {
                return Err(CliError::Config(format!(
                    "Unsupported configuration key for --set: '{}'",
                    key
                )));
            }
        }
    }
    Ok(config)
}
