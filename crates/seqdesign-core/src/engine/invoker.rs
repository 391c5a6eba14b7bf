use super::config::{BATCH_SIZE, InvocationConfig};
use super::error::DesignError;
use std::ffi::OsString;
use std::fs;
use std::future::Future;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tempfile::TempDir;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Command;
use tracing::{debug, info, warn};

const OUTPUT_DIR_PREFIX: &str = "mpnn_";
const SEQUENCES_SUBDIR: &str = "seqs";
const SEQUENCES_EXTENSION: &str = "fa";
/// Bytes of child stdout/stderr retained for error reports.
const OUTPUT_TAIL_BYTES: usize = 4096;
const READ_CHUNK_BYTES: usize = 8192;

/// Per-call inputs to a design program.
#[derive(Debug, Clone)]
pub struct InvocationParams<'a> {
    pub structure_path: &'a Path,
    pub chains: &'a [char],
    pub num_sequences: usize,
    pub sampling_temperature: f64,
    pub seed: u64,
}

/// The output of one design run.
///
/// Owns the scratch directory the program wrote into; dropping the artifact
/// deletes it together with everything inside.
#[derive(Debug)]
pub struct DesignArtifact {
    output_dir: TempDir,
    sequences_path: PathBuf,
}

impl DesignArtifact {
    pub fn new(output_dir: TempDir, sequences_path: PathBuf) -> Self {
        Self {
            output_dir,
            sequences_path,
        }
    }

    pub fn output_dir(&self) -> &Path {
        self.output_dir.path()
    }

    pub fn sequences_path(&self) -> &Path {
        &self.sequences_path
    }
}

/// Runs a sequence-design model against a structure file.
pub trait DesignInvoker {
    fn invoke(
        &self,
        params: &InvocationParams<'_>,
    ) -> impl Future<Output = Result<DesignArtifact, DesignError>> + Send;
}

/// Invokes the ProteinMPNN command-line program as a child process.
#[derive(Debug, Clone)]
pub struct ProteinMpnnInvoker {
    config: InvocationConfig,
    temp_root: Option<PathBuf>,
}

impl ProteinMpnnInvoker {
    pub fn new(config: InvocationConfig) -> Self {
        Self {
            config,
            temp_root: None,
        }
    }

    /// Places per-run output directories under `dir` instead of the system temp dir.
    pub fn with_temp_dir(mut self, dir: PathBuf) -> Self {
        self.temp_root = Some(dir);
        self
    }

    pub fn config(&self) -> &InvocationConfig {
        &self.config
    }

    pub fn build_arguments(
        &self,
        structure_path: &Path,
        params: &InvocationParams<'_>,
        output_dir: &Path,
    ) -> Vec<OsString> {
        let chains = params
            .chains
            .iter()
            .map(char::to_string)
            .collect::<Vec<_>>()
            .join(" ");

        let mut args: Vec<OsString> = vec![self.config.script_path().into_os_string()];
        let mut push = |flag: &str, value: OsString| {
            args.push(flag.into());
            args.push(value);
        };
        push("--pdb_path", structure_path.into());
        push("--pdb_path_chains", chains.into());
        push("--out_folder", output_dir.into());
        push("--num_seq_per_target", params.num_sequences.to_string().into());
        push("--sampling_temp", params.sampling_temperature.to_string().into());
        push("--path_to_model_weights", self.config.weights_dir.clone().into());
        push("--seed", params.seed.to_string().into());
        push("--batch_size", BATCH_SIZE.to_string().into());
        args
    }

    fn create_output_dir(&self) -> io::Result<TempDir> {
        let mut builder = tempfile::Builder::new();
        builder.prefix(OUTPUT_DIR_PREFIX);
        match &self.temp_root {
            Some(root) => builder.tempdir_in(root),
            None => builder.tempdir(),
        }
    }

    async fn run(&self, params: &InvocationParams<'_>) -> Result<DesignArtifact, DesignError> {
        if !params.structure_path.is_file() {
            return Err(DesignError::NotFound {
                what: "Structure file",
                path: params.structure_path.to_path_buf(),
            });
        }
        let script = self.config.script_path();
        if !script.is_file() {
            return Err(DesignError::NotFound {
                what: "Design program",
                path: script,
            });
        }

        let structure_path = std::path::absolute(params.structure_path)?;
        let output_dir = self.create_output_dir()?;
        let output_path = std::path::absolute(output_dir.path())?;
        let args = self.build_arguments(&structure_path, params, &output_path);
        debug!(interpreter = %self.config.interpreter.display(), ?args, "Launching design program");

        let mut child = Command::new(&self.config.interpreter)
            .args(&args)
            .current_dir(&self.config.program_root)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| match e.kind() {
                io::ErrorKind::NotFound => DesignError::NotFound {
                    what: "Interpreter",
                    path: self.config.interpreter.clone(),
                },
                _ => DesignError::Io(e),
            })?;

        let stdout = child.stdout.take();
        let stderr = child.stderr.take();
        let completion = async {
            tokio::try_join!(
                child.wait(),
                read_tail(stdout, OUTPUT_TAIL_BYTES),
                read_tail(stderr, OUTPUT_TAIL_BYTES),
            )
        };
        let (status, stdout, stderr) = tokio::time::timeout(self.config.timeout, completion)
            .await
            .map_err(|_| {
                warn!(limit = ?self.config.timeout, "Design program timed out; terminating it");
                DesignError::Timeout {
                    limit: self.config.timeout,
                }
            })??;

        if !status.success() {
            return Err(DesignError::Invocation(format!(
                "process exited with {}: {}",
                status,
                tail(&stderr, OUTPUT_TAIL_BYTES)
            )));
        }

        let stem = structure_path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let seqs_dir = output_path.join(SEQUENCES_SUBDIR);
        let sequences_path = seqs_dir.join(format!("{}.{}", stem, SEQUENCES_EXTENSION));

        if !sequences_path.is_file() {
            let produced = list_sequence_files(&seqs_dir);
            return Err(DesignError::Invocation(format!(
                "expected output {} was not produced; found [{}]; stdout: {}",
                sequences_path.display(),
                produced.join(", "),
                tail(&stdout, OUTPUT_TAIL_BYTES)
            )));
        }

        info!(path = %sequences_path.display(), "Design program finished");
        Ok(DesignArtifact::new(output_dir, sequences_path))
    }
}

impl DesignInvoker for ProteinMpnnInvoker {
    fn invoke(
        &self,
        params: &InvocationParams<'_>,
    ) -> impl Future<Output = Result<DesignArtifact, DesignError>> + Send {
        self.run(params)
    }
}

fn list_sequence_files(dir: &Path) -> Vec<String> {
    let Ok(entries) = fs::read_dir(dir) else {
        return Vec::new();
    };
    let mut names: Vec<String> = entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.extension().is_some_and(|ext| ext == SEQUENCES_EXTENSION))
        .filter_map(|path| path.file_name().map(|n| n.to_string_lossy().into_owned()))
        .collect();
    names.sort();
    names
}

/// Drains `reader` to the end, keeping at most the last `limit` bytes.
async fn read_tail<R: AsyncRead + Unpin>(reader: Option<R>, limit: usize) -> io::Result<Vec<u8>> {
    let Some(mut reader) = reader else {
        return Ok(Vec::new());
    };
    let mut kept = Vec::with_capacity(limit * 2);
    let mut chunk = vec![0u8; READ_CHUNK_BYTES];
    loop {
        let n = reader.read(&mut chunk).await?;
        if n == 0 {
            break;
        }
        kept.extend_from_slice(&chunk[..n]);
        if kept.len() > limit * 2 {
            let excess = kept.len() - limit;
            kept.drain(..excess);
        }
    }
    if kept.len() > limit {
        let excess = kept.len() - limit;
        kept.drain(..excess);
    }
    Ok(kept)
}

/// Last `limit` bytes of `bytes` as text, cut on a character boundary.
fn tail(bytes: &[u8], limit: usize) -> String {
    let text = String::from_utf8_lossy(bytes);
    let text = text.trim();
    if text.len() <= limit {
        return text.to_string();
    }
    let mut start = text.len() - limit;
    while !text.is_char_boundary(start) {
        start += 1;
    }
    text[start..].to_string()
}
