use crate::core::io::fasta::{self, FormatError};
use crate::core::models::structure::ParsedStructure;
use crate::engine::config::DesignConfig;
use crate::engine::error::{DesignError, ErrorKind, ValidationError};
use crate::engine::invoker::{DesignInvoker, InvocationParams};
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::request::DesignRequest;
use crate::engine::validation;
use serde::Serialize;
use std::io::{self, Write};
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::{debug, error, info, instrument, warn};

const STAGED_FILE_PREFIX: &str = "mpnn_";
const DEFAULT_STRUCTURE_SUFFIX: &str = ".pdb";

/// Raw structure bytes as received from a caller.
#[derive(Debug, Clone, Copy)]
pub struct StructureUpload<'a> {
    /// Original file name; only its extension is used.
    pub file_name: Option<&'a str>,
    pub bytes: &'a [u8],
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChainResidueCount {
    pub chain: char,
    pub residues: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DesignMetadata {
    pub num_residues: usize,
    pub residues_per_chain: Vec<ChainResidueCount>,
    pub chains: Vec<char>,
    pub num_sequences: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DesignResult {
    pub metadata: DesignMetadata,
    pub native_sequence: String,
    pub sequences: Vec<String>,
}

/// Validates an uploaded structure, runs the design program on it and
/// collects the sequences it produced.
///
/// The staged copy of the upload and the program's output directory are
/// removed before this returns, whatever the outcome.
#[instrument(skip_all, name = "design_workflow")]
pub async fn run<I: DesignInvoker>(
    upload: StructureUpload<'_>,
    request: &DesignRequest,
    config: &DesignConfig,
    invoker: &I,
    reporter: &ProgressReporter<'_>,
) -> Result<DesignResult, DesignError> {
    let result = execute(upload, request, config, invoker, reporter).await;
    if let Err(e) = &result {
        match e.kind() {
            ErrorKind::ClientError => warn!(error = %e, "Design request rejected"),
            _ => error!(error = %e, kind = ?e.kind(), "Design request failed"),
        }
    }
    result
}

async fn execute<I: DesignInvoker>(
    upload: StructureUpload<'_>,
    request: &DesignRequest,
    config: &DesignConfig,
    invoker: &I,
    reporter: &ProgressReporter<'_>,
) -> Result<DesignResult, DesignError> {
    let staged = stage_upload(&upload, config.temp_dir.as_deref())?;
    debug!(path = %staged.path().display(), bytes = upload.bytes.len(), "Staged structure upload");

    reporter.report(Progress::StageStart { name: "Validation" });
    let structure = validation::validate(staged.path(), request.chains(), &config.validation)?;
    let residues_per_chain = count_residues(&structure, request.chains())?;
    drop(structure);
    reporter.report(Progress::StageFinish);
    info!(chains = ?request.chains(), "Structure validated");

    reporter.report(Progress::StageStart { name: "Design" });
    let params = InvocationParams {
        structure_path: staged.path(),
        chains: request.chains(),
        num_sequences: request.num_sequences(),
        sampling_temperature: config.sampling.temperature,
        seed: config.sampling.seed,
    };
    let artifact = invoker.invoke(&params).await?;
    reporter.report(Progress::StageFinish);

    reporter.report(Progress::StageStart { name: "Parsing" });
    let parsed = fasta::parse(artifact.sequences_path())?;
    if parsed.designed.len() != request.num_sequences() {
        return Err(FormatError::SequenceCount {
            expected: request.num_sequences(),
            actual: parsed.designed.len(),
        }
        .into());
    }
    reporter.report(Progress::StageFinish);

    let num_residues = residues_per_chain.iter().map(|c| c.residues).sum();
    info!(
        num_residues,
        num_sequences = parsed.designed.len(),
        "Sequence design completed"
    );
    reporter.report(Progress::Message(format!(
        "Designed {} sequence(s) over {} residue(s)",
        parsed.designed.len(),
        num_residues
    )));

    Ok(DesignResult {
        metadata: DesignMetadata {
            num_residues,
            residues_per_chain,
            chains: request.chains().to_vec(),
            num_sequences: request.num_sequences(),
        },
        native_sequence: parsed.native,
        sequences: parsed.designed,
    })
}

fn stage_upload(upload: &StructureUpload<'_>, temp_dir: Option<&Path>) -> io::Result<NamedTempFile> {
    let suffix = upload
        .file_name
        .and_then(|name| Path::new(name).extension())
        .map(|ext| format!(".{}", ext.to_string_lossy()))
        .unwrap_or_else(|| DEFAULT_STRUCTURE_SUFFIX.to_string());

    let mut builder = tempfile::Builder::new();
    builder.prefix(STAGED_FILE_PREFIX).suffix(&suffix);
    let mut file = match temp_dir {
        Some(dir) => builder.tempfile_in(dir)?,
        None => builder.tempfile()?,
    };
    file.write_all(upload.bytes)?;
    file.flush()?;
    Ok(file)
}

fn count_residues(
    structure: &ParsedStructure,
    chains: &[char],
) -> Result<Vec<ChainResidueCount>, ValidationError> {
    chains
        .iter()
        .map(|&chain| {
            structure
                .standard_residue_count(chain)
                .map(|residues| ChainResidueCount { chain, residues })
                .ok_or(ValidationError::NoStandardResidues { chain })
        })
        .collect()
}
