use seqdesign::engine::error::{DesignError, ErrorKind, ValidationError};
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

pub const EXIT_FAILURE: i32 = 1;
pub const EXIT_USAGE: i32 = 2;
pub const EXIT_CLIENT_ERROR: i32 = 3;
pub const EXIT_NOT_FOUND: i32 = 4;
pub const EXIT_TIMEOUT: i32 = 5;
pub const EXIT_INTERNAL: i32 = 6;

#[derive(Debug, Error)]
pub enum CliError {
    /// Shown with the redacted message; full details go to the log.
    #[error("{}", .0.public_message())]
    Design(#[from] DesignError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Data management error: {0}")]
    Data(String),

    #[error(
        "Model weights not found at '{}'. Check the installation with `seqdesign data path`.",
        weights.display()
    )]
    ModelUnavailable { weights: PathBuf },

    #[error("Failed to parse file '{path}': {source}", path = path.display())]
    FileParsing {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid argument: {0}")]
    Argument(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CliError {
    /// Process exit status for this failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Design(e) => kind_exit_code(e.kind()),
            CliError::Validation(_) => EXIT_CLIENT_ERROR,
            CliError::ModelUnavailable { .. } => EXIT_NOT_FOUND,
            CliError::Config(_) | CliError::Argument(_) | CliError::FileParsing { .. } => {
                EXIT_USAGE
            }
            CliError::Data(_) | CliError::Io(_) | CliError::Other(_) => EXIT_FAILURE,
        }
    }
}

fn kind_exit_code(kind: ErrorKind) -> i32 {
    match kind {
        ErrorKind::ClientError => EXIT_CLIENT_ERROR,
        ErrorKind::NotFound => EXIT_NOT_FOUND,
        ErrorKind::GatewayTimeout => EXIT_TIMEOUT,
        ErrorKind::Internal => EXIT_INTERNAL,
    }
}
