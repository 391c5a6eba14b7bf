//! Staged validation of an uploaded structure file.
//!
//! Stages run cheapest first and stop at the first failure, so an oversized
//! or obviously empty file is rejected before any parsing work is done.

use super::config::ValidationConfig;
use super::error::{ValidationError, megabytes};
use crate::core::io::pdb::{PdbError, PdbFile};
use crate::core::io::traits::StructureFormat;
use crate::core::models::structure::{Model, ParsedStructure};
use std::collections::BTreeSet;
use std::fs::{self, File};
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use tracing::debug;

const ATOM_RECORD_PREFIX: &[u8] = b"ATOM  ";
const HETERO_RECORD_PREFIX: &[u8] = b"HETATM";

/// Validates `path` for sequence design of `chains` and returns the parsed
/// structure for reuse.
pub fn validate(
    path: &Path,
    chains: &[char],
    config: &ValidationConfig,
) -> Result<ParsedStructure, ValidationError> {
    check_size(path, config)?;
    check_atom_records(path)?;

    let (structure, metadata) = PdbFile::read_from_path(path)?;
    debug!(
        atoms = metadata.atom_records,
        hetero = metadata.hetero_records,
        skipped_alternates = metadata.skipped_alternates,
        "Parsed structure file"
    );

    // An ATOM line was seen earlier, so an empty structure means every
    // coordinate record sat after END.
    let model = structure
        .first_model()
        .ok_or(ValidationError::NoCoordinatesBeforeEnd)?;
    check_chains_exist(model, chains)?;
    check_backbone(model, chains, config.min_ca_atoms)?;

    Ok(structure)
}

/// Counts `HETATM` records in a structure file.
pub fn count_hetero_records(path: &Path) -> io::Result<usize> {
    count_records(path, HETERO_RECORD_PREFIX)
}

fn check_size(path: &Path, config: &ValidationConfig) -> Result<(), ValidationError> {
    let size = match fs::metadata(path) {
        Ok(meta) => meta.len(),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(ValidationError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        Err(e) => return Err(PdbError::Io(e).into()),
    };

    if size > config.max_file_size_bytes {
        return Err(ValidationError::FileTooLarge {
            size_mb: megabytes(size),
            limit_mb: config.max_file_size_mb(),
        });
    }
    Ok(())
}

fn check_atom_records(path: &Path) -> Result<(), ValidationError> {
    let count = count_records(path, ATOM_RECORD_PREFIX).map_err(PdbError::Io)?;
    if count == 0 {
        return Err(ValidationError::NoAtomRecords);
    }
    Ok(())
}

fn count_records(path: &Path, prefix: &[u8]) -> io::Result<usize> {
    let reader = BufReader::new(File::open(path)?);
    let mut count = 0;
    for line in reader.split(b'\n') {
        if line?.starts_with(prefix) {
            count += 1;
        }
    }
    Ok(count)
}

fn check_chains_exist(model: &Model, chains: &[char]) -> Result<(), ValidationError> {
    let available: BTreeSet<char> = model.chain_ids().collect();
    let missing: BTreeSet<char> = chains
        .iter()
        .copied()
        .filter(|id| !available.contains(id))
        .collect();

    if !missing.is_empty() {
        return Err(ValidationError::ChainNotFound {
            missing: missing.into_iter().collect(),
            available: available.into_iter().collect(),
        });
    }
    Ok(())
}

fn check_backbone(model: &Model, chains: &[char], required: usize) -> Result<(), ValidationError> {
    for &id in chains {
        let Some(chain) = model.chain(id) else {
            continue;
        };
        if chain.standard_residue_count() == 0 {
            return Err(ValidationError::NoStandardResidues { chain: id });
        }
        let found = chain.backbone_atom_count();
        if found < required {
            return Err(ValidationError::InsufficientBackbone {
                chain: id,
                found,
                required,
            });
        }
    }
    Ok(())
}
