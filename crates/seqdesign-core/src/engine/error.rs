use crate::core::io::fasta::FormatError;
use crate::core::io::pdb::PdbError;
use serde::Serialize;
use std::fmt;
use std::io;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

const BYTES_PER_MEGABYTE: f64 = 1024.0 * 1024.0;

/// Generic message surfaced for failures whose details stay in the logs.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

pub(crate) fn megabytes(bytes: u64) -> f64 {
    bytes as f64 / BYTES_PER_MEGABYTE
}

fn chain_list(ids: &[char]) -> String {
    let joined = ids.iter().map(char::to_string).collect::<Vec<_>>().join(", ");
    format!("[{}]", joined)
}

/// Stable, machine-readable reason for a validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ValidationCategory {
    InvalidRequest,
    FileNotFound,
    FileTooLarge,
    NoAtomRecords,
    ParseError,
    ChainNotFound,
    NoStandardResidues,
    InsufficientBackbone,
}

impl ValidationCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValidationCategory::InvalidRequest => "invalid-request",
            ValidationCategory::FileNotFound => "file-not-found",
            ValidationCategory::FileTooLarge => "file-too-large",
            ValidationCategory::NoAtomRecords => "no-atom-records",
            ValidationCategory::ParseError => "parse-error",
            ValidationCategory::ChainNotFound => "chain-not-found",
            ValidationCategory::NoStandardResidues => "no-standard-residues",
            ValidationCategory::InsufficientBackbone => "insufficient-backbone",
        }
    }
}

impl fmt::Display for ValidationCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A defect in the caller's input. Messages are safe to show verbatim.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Invalid design request: {0}")]
    InvalidRequest(String),

    #[error("PDB file not found: {}", .path.display())]
    FileNotFound { path: PathBuf },

    #[error("PDB file exceeds {limit_mb:.1} MB limit ({size_mb:.1} MB)")]
    FileTooLarge { size_mb: f64, limit_mb: f64 },

    #[error("PDB file contains no ATOM records")]
    NoAtomRecords,

    #[error("Failed to parse PDB file: {0}")]
    Parse(#[from] PdbError),

    #[error("Failed to parse PDB file: no coordinate records before END")]
    NoCoordinatesBeforeEnd,

    #[error(
        "Chain(s) {} not found in structure. Available chains: {}",
        chain_list(.missing),
        chain_list(.available)
    )]
    ChainNotFound {
        missing: Vec<char>,
        available: Vec<char>,
    },

    #[error("Chain {chain} has no standard amino acid residues")]
    NoStandardResidues { chain: char },

    #[error(
        "Chain {chain} has only {found} CA atoms (minimum {required} required for sequence design)"
    )]
    InsufficientBackbone {
        chain: char,
        found: usize,
        required: usize,
    },
}

impl ValidationError {
    pub fn category(&self) -> ValidationCategory {
        match self {
            ValidationError::InvalidRequest(_) => ValidationCategory::InvalidRequest,
            ValidationError::FileNotFound { .. } => ValidationCategory::FileNotFound,
            ValidationError::FileTooLarge { .. } => ValidationCategory::FileTooLarge,
            ValidationError::NoAtomRecords => ValidationCategory::NoAtomRecords,
            ValidationError::Parse(_) | ValidationError::NoCoordinatesBeforeEnd => {
                ValidationCategory::ParseError
            }
            ValidationError::ChainNotFound { .. } => ValidationCategory::ChainNotFound,
            ValidationError::NoStandardResidues { .. } => ValidationCategory::NoStandardResidues,
            ValidationError::InsufficientBackbone { .. } => {
                ValidationCategory::InsufficientBackbone
            }
        }
    }
}

/// Outcome class of a failed design run, as seen by a caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ErrorKind {
    /// The request itself was defective and can be corrected by the caller.
    ClientError,
    /// The structure file or the design program installation is missing.
    NotFound,
    /// The design program exceeded its time budget.
    GatewayTimeout,
    /// The design program or its output failed in an unexpected way.
    Internal,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::ClientError => "client-error",
            ErrorKind::NotFound => "not-found",
            ErrorKind::GatewayTimeout => "gateway-timeout",
            ErrorKind::Internal => "internal",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
pub enum DesignError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("{what} not found: {}", .path.display())]
    NotFound { what: &'static str, path: PathBuf },

    #[error("Design program exceeded the {}s time limit", .limit.as_secs())]
    Timeout { limit: Duration },

    #[error("Design program failed: {0}")]
    Invocation(String),

    #[error("Malformed design output: {0}")]
    Format(#[from] FormatError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl DesignError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DesignError::Validation(_) => ErrorKind::ClientError,
            DesignError::NotFound { .. } => ErrorKind::NotFound,
            DesignError::Timeout { .. } => ErrorKind::GatewayTimeout,
            DesignError::Invocation(_) | DesignError::Format(_) | DesignError::Io(_) => {
                ErrorKind::Internal
            }
        }
    }

    /// The validation category, when the request itself was at fault.
    pub fn category(&self) -> Option<ValidationCategory> {
        match self {
            DesignError::Validation(e) => Some(e.category()),
            _ => None,
        }
    }

    /// The message that may be shown to an untrusted caller.
    ///
    /// Only validation failures and timeouts are described; everything else
    /// collapses to [`INTERNAL_ERROR_MESSAGE`].
    pub fn public_message(&self) -> String {
        match self {
            DesignError::Validation(e) => e.to_string(),
            DesignError::Timeout { .. } => self.to_string(),
            _ => INTERNAL_ERROR_MESSAGE.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chain_not_found_message_lists_both_sets() {
        let err = ValidationError::ChainNotFound {
            missing: vec!['X', 'Z'],
            available: vec!['A', 'B'],
        };
        assert_eq!(
            err.to_string(),
            "Chain(s) [X, Z] not found in structure. Available chains: [A, B]"
        );
        assert_eq!(err.category(), ValidationCategory::ChainNotFound);
    }

    #[test]
    fn file_too_large_message_uses_megabytes() {
        let err = ValidationError::FileTooLarge {
            size_mb: megabytes(11 * 1024 * 1024),
            limit_mb: 10.0,
        };
        assert_eq!(err.to_string(), "PDB file exceeds 10.0 MB limit (11.0 MB)");
    }

    #[test]
    fn categories_have_stable_names() {
        assert_eq!(ValidationCategory::FileTooLarge.as_str(), "file-too-large");
        assert_eq!(
            serde_json::to_string(&ValidationCategory::InsufficientBackbone).unwrap(),
            "\"insufficient-backbone\""
        );
    }

    #[test]
    fn kinds_map_to_outcome_classes() {
        assert_eq!(
            DesignError::from(ValidationError::NoAtomRecords).kind(),
            ErrorKind::ClientError
        );
        assert_eq!(
            DesignError::Timeout {
                limit: Duration::from_secs(300)
            }
            .kind(),
            ErrorKind::GatewayTimeout
        );
        assert_eq!(
            DesignError::Invocation("boom".into()).kind(),
            ErrorKind::Internal
        );
        assert_eq!(
            DesignError::from(FormatError::NoEntries).kind(),
            ErrorKind::Internal
        );
    }

    #[test]
    fn kinds_and_categories_are_exposed_for_callers() {
        assert_eq!(ErrorKind::GatewayTimeout.as_str(), "gateway-timeout");
        assert_eq!(
            serde_json::to_string(&ErrorKind::ClientError).unwrap(),
            "\"client-error\""
        );

        let err = DesignError::from(ValidationError::NoCoordinatesBeforeEnd);
        assert_eq!(err.category(), Some(ValidationCategory::ParseError));
        assert!(DesignError::Invocation("boom".into()).category().is_none());
    }

    #[test]
    fn public_message_hides_internal_details() {
        let err = DesignError::Invocation("Traceback: /opt/mpnn/secret.py".into());
        assert_eq!(err.public_message(), INTERNAL_ERROR_MESSAGE);

        let err = DesignError::NotFound {
            what: "Design program",
            path: PathBuf::from("/opt/mpnn/protein_mpnn_run.py"),
        };
        assert_eq!(err.public_message(), INTERNAL_ERROR_MESSAGE);

        let err = DesignError::from(ValidationError::NoStandardResidues { chain: 'B' });
        assert_eq!(
            err.public_message(),
            "Chain B has no standard amino acid residues"
        );
    }
}
