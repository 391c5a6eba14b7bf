use std::fs::File;
use std::io::{self, BufRead, BufReader, Cursor};
use std::path::Path;
use thiserror::Error;

const HEADER_PREFIX: char = '>';

#[derive(Debug, Error)]
pub enum FormatError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("No header-delimited entries found in sequence file")]
    NoEntries,
    #[error("Expected {expected} designed sequence(s) but the design program produced {actual}")]
    SequenceCount { expected: usize, actual: usize },
}

/// One header-delimited entry of a FASTA file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FastaEntry {
    /// Header text without the leading `>`.
    pub header: String,
    /// Concatenation of the entry's sequence lines.
    pub sequence: String,
}

/// The sequences recovered from a design run.
///
/// The first entry written by the design program is always the native
/// sequence; every following entry is a designed sequence, in generation order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DesignedSequences {
    pub native: String,
    pub designed: Vec<String>,
}

impl DesignedSequences {
    fn from_entries(entries: Vec<FastaEntry>) -> Result<Self, FormatError> {
        let mut iter = entries.into_iter();
        let native = iter.next().ok_or(FormatError::NoEntries)?.sequence;
        Ok(Self {
            native,
            designed: iter.map(|e| e.sequence).collect(),
        })
    }
}

/// Reads all entries from a FASTA stream.
///
/// Blank lines and surrounding whitespace are ignored. Text before the first
/// header does not belong to any entry and is skipped.
pub fn read_entries(reader: &mut impl BufRead) -> Result<Vec<FastaEntry>, FormatError> {
    let mut entries: Vec<FastaEntry> = Vec::new();

    for line_res in reader.lines() {
        let line = line_res?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if let Some(header) = line.strip_prefix(HEADER_PREFIX) {
            entries.push(FastaEntry {
                header: header.trim().to_string(),
                sequence: String::new(),
            });
        } else if let Some(current) = entries.last_mut() {
            current
                .sequence
                .extend(line.chars().filter(|c| !c.is_whitespace()));
        }
    }

    if entries.is_empty() {
        return Err(FormatError::NoEntries);
    }
    Ok(entries)
}

/// Parses a design-program output file into native and designed sequences.
pub fn parse(path: &Path) -> Result<DesignedSequences, FormatError> {
    let mut reader = BufReader::new(File::open(path)?);
    DesignedSequences::from_entries(read_entries(&mut reader)?)
}

/// Same as [`parse`] for in-memory text.
pub fn parse_str(text: &str) -> Result<DesignedSequences, FormatError> {
    DesignedSequences::from_entries(read_entries(&mut Cursor::new(text.as_bytes()))?)
}
