use crate::cli::DesignArgs;
use crate::config::builder::{ConfigOverrides, build_config};
use crate::config::defaults::DefaultsConfig;
use crate::data::DataManager;
use crate::error::{CliError, Result};
use crate::utils::progress::CliProgressHandler;
use seqdesign::{
    engine::{
        error::{ErrorKind, ValidationCategory, ValidationError},
        invoker::ProteinMpnnInvoker,
        progress::ProgressReporter,
        readiness,
        request::DesignRequest,
    },
    workflows::{
        self,
        design::{DesignResult, StructureUpload},
    },
};
use serde::Serialize;
use std::io;
use std::path::Path;
use tracing::info;

const SUCCESS_STATUS: &str = "success";
const ERROR_STATUS: &str = "error";

#[derive(Serialize)]
struct DesignResponse<'a> {
    status: &'static str,
    #[serde(flatten)]
    result: &'a DesignResult,
}

#[derive(Serialize)]
struct ErrorResponse {
    status: &'static str,
    kind: ErrorKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    category: Option<ValidationCategory>,
    message: String,
}

impl ErrorResponse {
    fn from_error(err: &CliError) -> Option<Self> {
        let (kind, category, message) = match err {
            CliError::Design(e) => (e.kind(), e.category(), e.public_message()),
            CliError::Validation(e) => (ErrorKind::ClientError, Some(e.category()), e.to_string()),
            _ => return None,
        };
        Some(Self {
            status: ERROR_STATUS,
            kind,
            category,
            message,
        })
    }
}

pub async fn run(args: DesignArgs) -> Result<()> {
    let result = match design(&args).await {
        Ok(result) => result,
        Err(err) => {
            if let Some(json) = render_error(&err)? {
                write_output(args.output.as_deref(), &json)?;
            }
            return Err(err);
        }
    };

    let json = render_response(&result)?;
    write_output(args.output.as_deref(), &json)?;
    if let Some(path) = &args.output {
        info!("Result written to {:?}", path);
        eprintln!("✓ Result written to: {}", path.display());
    }
    Ok(())
}

async fn design(args: &DesignArgs) -> Result<DesignResult> {
    info!("Initializing data manager...");
    let data_manager = DataManager::new()?;

    info!("Merging configuration from file and CLI arguments...");
    let overrides = ConfigOverrides {
        config_file: args.config.clone(),
        set_values: args.set_values.clone(),
        temperature: args.temperature,
        seed: args.seed,
        timeout_seconds: args.timeout,
    };
    let app_config = build_config(&overrides, &data_manager)?;

    let readiness = readiness::initialize(&app_config.invocation.weights_file());
    if !readiness.is_ready() {
        return Err(CliError::ModelUnavailable {
            weights: readiness.weights_file().to_path_buf(),
        });
    }

    let num_sequences = args
        .num_sequences
        .unwrap_or(DefaultsConfig::default().num_sequences);
    let request = DesignRequest::new(args.chains.clone(), num_sequences)?;

    info!("Reading input structure from {:?}", &args.input);
    let bytes = read_upload(&args.input).await?;
    let upload = StructureUpload {
        file_name: args.input.file_name().and_then(|name| name.to_str()),
        bytes: &bytes,
    };

    let mut invoker = ProteinMpnnInvoker::new(app_config.invocation.clone());
    if let Some(dir) = &app_config.design.temp_dir {
        invoker = invoker.with_temp_dir(dir.clone());
    }

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    eprintln!(
        "Designing {} sequence(s) for chain(s) {:?}...",
        request.num_sequences(),
        request.chains()
    );
    let outcome =
        workflows::design::run(upload, &request, &app_config.design, &invoker, &reporter).await;
    progress_handler.clear();
    Ok(outcome?)
}

fn write_output(path: Option<&Path>, json: &str) -> Result<()> {
    match path {
        Some(path) => std::fs::write(path, format!("{}\n", json))?,
        None => println!("{}", json),
    }
    Ok(())
}

async fn read_upload(path: &Path) -> Result<Vec<u8>> {
    tokio::fs::read(path).await.map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => CliError::Validation(ValidationError::FileNotFound {
            path: path.to_path_buf(),
        }),
        _ => CliError::Io(e),
    })
}

fn render_response(result: &DesignResult) -> Result<String> {
    let response = DesignResponse {
        status: SUCCESS_STATUS,
        result,
    };
    serde_json::to_string_pretty(&response).map_err(|e| CliError::Other(e.into()))
}

/// JSON body for failures a caller can act on; `None` for local CLI errors.
fn render_error(err: &CliError) -> Result<Option<String>> {
    let Some(response) = ErrorResponse::from_error(err) else {
        return Ok(None);
    };
    serde_json::to_string_pretty(&response)
        .map(Some)
        .map_err(|e| CliError::Other(e.into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use seqdesign::engine::error::DesignError;
    use seqdesign::workflows::design::{ChainResidueCount, DesignMetadata};
    use serde_json::Value;

    #[test]
    fn response_is_flattened_under_success_status() {
        let result = DesignResult {
            metadata: DesignMetadata {
                num_residues: 76,
                residues_per_chain: vec![ChainResidueCount {
                    chain: 'A',
                    residues: 76,
                }],
                chains: vec!['A'],
                num_sequences: 1,
            },
            native_sequence: "MQIFVK".to_string(),
            sequences: vec!["MKVLVK".to_string()],
        };

        let json: Value = serde_json::from_str(&render_response(&result).unwrap()).unwrap();
        assert_eq!(json["status"], "success");
        assert_eq!(json["metadata"]["num_residues"], 76);
        assert_eq!(json["metadata"]["chains"], serde_json::json!(["A"]));
        assert_eq!(json["native_sequence"], "MQIFVK");
        assert_eq!(json["sequences"], serde_json::json!(["MKVLVK"]));
    }

    #[test]
    fn invocation_failure_renders_redacted_error_body() {
        let err = CliError::from(DesignError::Invocation(
            "process exited with 1: RuntimeError in /opt/mpnn/protein_mpnn_utils.py".into(),
        ));

        let json: Value = serde_json::from_str(&render_error(&err).unwrap().unwrap()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "status": "error",
                "kind": "internal",
                "message": "Internal server error",
            })
        );
    }

    #[test]
    fn validation_failure_renders_category() {
        let err = CliError::from(DesignError::from(ValidationError::ChainNotFound {
            missing: vec!['C'],
            available: vec!['A'],
        }));

        let json: Value = serde_json::from_str(&render_error(&err).unwrap().unwrap()).unwrap();
        assert_eq!(json["status"], "error");
        assert_eq!(json["kind"], "client-error");
        assert_eq!(json["category"], "chain-not-found");
        assert_eq!(
            json["message"],
            "Chain(s) [C] not found in structure. Available chains: [A]"
        );
    }

    #[test]
    fn local_cli_errors_have_no_error_body() {
        let err = CliError::Config("bad key".into());
        assert!(render_error(&err).unwrap().is_none());
    }

    #[tokio::test]
    async fn missing_input_is_a_validation_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_upload(&dir.path().join("absent.pdb")).await.unwrap_err();
        assert!(matches!(
            err,
            CliError::Validation(ValidationError::FileNotFound { .. })
        ));
    }
}
