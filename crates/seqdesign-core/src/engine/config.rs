use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_NUM_SEQUENCES: usize = 5;
pub const MAX_SEQUENCES: usize = 10;
pub const DEFAULT_MAX_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;
pub const DEFAULT_MIN_CA_ATOMS: usize = 10;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);
pub const DEFAULT_SEED: u64 = 42;
pub const DEFAULT_SAMPLING_TEMPERATURE: f64 = 0.1;
pub const BATCH_SIZE: usize = 1;
pub const DEFAULT_MODEL_NAME: &str = "v_48_020";
pub const WEIGHTS_EXTENSION: &str = "pt";

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
    #[error("Invalid value for {parameter}: {reason}")]
    InvalidValue {
        parameter: &'static str,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValidationConfig {
    pub max_file_size_bytes: u64,
    pub min_ca_atoms: usize,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            max_file_size_bytes: DEFAULT_MAX_FILE_SIZE_BYTES,
            min_ca_atoms: DEFAULT_MIN_CA_ATOMS,
        }
    }
}

impl ValidationConfig {
    pub fn with_max_file_size_mb(mut self, megabytes: f64) -> Result<Self, ConfigError> {
        if !megabytes.is_finite() || megabytes <= 0.0 {
            return Err(ConfigError::InvalidValue {
                parameter: "max_file_size_mb",
                reason: format!("must be a positive number, got {}", megabytes),
            });
        }
        self.max_file_size_bytes = (megabytes * 1024.0 * 1024.0).round() as u64;
        Ok(self)
    }

    pub fn max_file_size_mb(&self) -> f64 {
        super::error::megabytes(self.max_file_size_bytes)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SamplingConfig {
    pub temperature: f64,
    pub seed: u64,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            temperature: DEFAULT_SAMPLING_TEMPERATURE,
            seed: DEFAULT_SEED,
        }
    }
}

/// Location and limits of the external design program.
#[derive(Debug, Clone, PartialEq)]
pub struct InvocationConfig {
    /// Installation root; also the working directory of the child process.
    pub program_root: PathBuf,
    pub script_name: String,
    pub interpreter: PathBuf,
    pub weights_dir: PathBuf,
    pub model_name: String,
    pub timeout: Duration,
}

impl InvocationConfig {
    pub fn script_path(&self) -> PathBuf {
        self.program_root.join(&self.script_name)
    }

    pub fn weights_file(&self) -> PathBuf {
        self.weights_dir
            .join(format!("{}.{}", self.model_name, WEIGHTS_EXTENSION))
    }
}

#[derive(Default)]
pub struct InvocationConfigBuilder {
    program_root: Option<PathBuf>,
    script_name: Option<String>,
    interpreter: Option<PathBuf>,
    weights_dir: Option<PathBuf>,
    model_name: Option<String>,
    timeout: Option<Duration>,
}

impl InvocationConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn program_root(mut self, path: PathBuf) -> Self {
        self.program_root = Some(path);
        self
    }

    pub fn script_name(mut self, name: impl Into<String>) -> Self {
        self.script_name = Some(name.into());
        self
    }

    pub fn interpreter(mut self, path: PathBuf) -> Self {
        self.interpreter = Some(path);
        self
    }

    pub fn weights_dir(mut self, path: PathBuf) -> Self {
        self.weights_dir = Some(path);
        self
    }

    pub fn model_name(mut self, name: impl Into<String>) -> Self {
        self.model_name = Some(name.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn build(self) -> Result<InvocationConfig, ConfigError> {
        let timeout = self.timeout.unwrap_or(DEFAULT_TIMEOUT);
        if timeout.is_zero() {
            return Err(ConfigError::InvalidValue {
                parameter: "timeout",
                reason: "must be greater than zero".to_string(),
            });
        }

        let program_root = self
            .program_root
            .ok_or(ConfigError::MissingParameter("program_root"))?;
        let weights_dir = self
            .weights_dir
            .ok_or(ConfigError::MissingParameter("weights_dir"))?;
        let interpreter = self
            .interpreter
            .ok_or(ConfigError::MissingParameter("interpreter"))?;
        let script_name = self
            .script_name
            .ok_or(ConfigError::MissingParameter("script_name"))?;

        // The child runs inside `program_root`, so every path it receives must
        // not depend on the caller's working directory.
        let interpreter = if interpreter.components().count() > 1 {
            absolute_path("interpreter", &interpreter)?
        } else {
            interpreter
        };

        Ok(InvocationConfig {
            program_root: absolute_path("program_root", &program_root)?,
            script_name,
            interpreter,
            weights_dir: absolute_path("weights_dir", &weights_dir)?,
            model_name: self
                .model_name
                .unwrap_or_else(|| DEFAULT_MODEL_NAME.to_string()),
            timeout,
        })
    }
}

fn absolute_path(parameter: &'static str, path: &Path) -> Result<PathBuf, ConfigError> {
    std::path::absolute(path).map_err(|e| ConfigError::InvalidValue {
        parameter,
        reason: format!("cannot resolve '{}': {}", path.display(), e),
    })
}

/// Settings shared by every request of a design run.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DesignConfig {
    pub validation: ValidationConfig,
    pub sampling: SamplingConfig,
    /// Where uploaded structures are staged; the system temp dir when unset.
    pub temp_dir: Option<PathBuf>,
}
