use crate::core::io::traits::StructureFormat;
use crate::core::models::atom::Atom;
use crate::core::models::builder::StructureBuilder;
use crate::core::models::residue::{ResidueKey, ResidueKind};
use crate::core::models::structure::ParsedStructure;
use nalgebra::Point3;
use std::io::{self, BufRead};
use thiserror::Error;
use tracing::debug;

/// Minimum line length for an `ATOM`/`HETATM` record: the z coordinate ends at column 54.
const MIN_COORDINATE_RECORD_LEN: usize = 54;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PdbMetadata {
    pub header_lines: Vec<String>,
    pub atom_records: usize,
    pub hetero_records: usize,
    pub skipped_alternates: usize,
}

#[derive(Debug, Error)]
pub enum PdbError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error on line {line}: {kind}")]
    Parse {
        line: usize,
        kind: PdbParseErrorKind,
    },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PdbParseErrorKind {
    #[error("Invalid integer format in columns {columns} (value: '{value}')")]
    InvalidInt { columns: String, value: String },
    #[error("Invalid or missing coordinate in columns {columns} (value: '{value}')")]
    InvalidFloat { columns: String, value: String },
    #[error("Required field in columns {columns} is empty")]
    MissingRequiredField { columns: String },
    #[error("Line is too short for ATOM/HETATM record (must be at least 54 chars)")]
    LineTooShort,
}

fn slice_and_trim(line: &str, start: usize, end: usize) -> &str {
    line.get(start..end).unwrap_or("").trim()
}

fn column_char(line: &str, index: usize) -> Option<char> {
    line.get(index..index + 1)
        .and_then(|s| s.chars().next())
        .filter(|c| !c.is_whitespace())
}

fn parse_coordinate(line: &str, line_num: usize, start: usize, end: usize) -> Result<f64, PdbError> {
    let value = slice_and_trim(line, start, end);
    value.parse().map_err(|_| PdbError::Parse {
        line: line_num,
        kind: PdbParseErrorKind::InvalidFloat {
            columns: format!("{}-{}", start + 1, end),
            value: value.into(),
        },
    })
}

/// Reader for the fixed-column PDB format.
pub struct PdbFile;

impl StructureFormat for PdbFile {
    type Metadata = PdbMetadata;
    type Error = PdbError;

    fn read_from(
        reader: &mut impl BufRead,
    ) -> Result<(ParsedStructure, Self::Metadata), Self::Error> {
        let mut builder = StructureBuilder::new();
        let mut metadata = PdbMetadata::default();

        for (line_num, line_res) in reader.lines().enumerate() {
            let line = line_res?;
            let line_num = line_num + 1;

            let record_type = slice_and_trim(&line, 0, 6);
            match record_type {
                "ATOM" | "HETATM" => {
                    let is_hetero = record_type == "HETATM";
                    if line.len() < MIN_COORDINATE_RECORD_LEN {
                        return Err(PdbError::Parse {
                            line: line_num,
                            kind: PdbParseErrorKind::LineTooShort,
                        });
                    }

                    let serial = slice_and_trim(&line, 6, 11).parse::<usize>().ok();
                    let name_str = slice_and_trim(&line, 12, 16);
                    let res_name_str = slice_and_trim(&line, 17, 20);
                    let chain_id = line.get(21..22).and_then(|s| s.chars().next()).unwrap_or(' ');
                    let res_seq_str = slice_and_trim(&line, 22, 26);
                    let insertion_code = column_char(&line, 26);

                    if name_str.is_empty() {
                        return Err(PdbError::Parse {
                            line: line_num,
                            kind: PdbParseErrorKind::MissingRequiredField {
                                columns: "13-16".into(),
                            },
                        });
                    }
                    let res_seq: isize = res_seq_str.parse().map_err(|_| PdbError::Parse {
                        line: line_num,
                        kind: PdbParseErrorKind::InvalidInt {
                            columns: "23-26".into(),
                            value: res_seq_str.into(),
                        },
                    })?;
                    let x = parse_coordinate(&line, line_num, 30, 38)?;
                    let y = parse_coordinate(&line, line_num, 38, 46)?;
                    let z = parse_coordinate(&line, line_num, 46, 54)?;

                    let mut atom = Atom::new(name_str, serial, Point3::new(x, y, z));
                    let element = slice_and_trim(&line, 76, 78);
                    if !element.is_empty() {
                        atom = atom.with_element(element);
                    }

                    let key = ResidueKey {
                        kind: ResidueKind::classify(is_hetero, res_name_str),
                        number: res_seq,
                        insertion_code,
                    };
                    builder.add_atom(chain_id, key, res_name_str, atom);

                    if is_hetero {
                        metadata.hetero_records += 1;
                    } else {
                        metadata.atom_records += 1;
                    }
                }
                "MODEL" => {
                    builder.start_model();
                }
                "ENDMDL" => {
                    builder.end_model();
                }
                "END" => break,
                "HEADER" | "TITLE" | "COMPND" => metadata.header_lines.push(line.clone()),
                _ => {}
            }
        }

        metadata.skipped_alternates = builder.skipped_alternates();
        if metadata.skipped_alternates > 0 {
            debug!(
                "Ignored {} alternate-location atom record(s).",
                metadata.skipped_alternates
            );
        }
        Ok((builder.build(), metadata))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::test_utils::{PdbFixture, atom_line};
    use std::io::Cursor;

    fn read(text: &str) -> Result<(ParsedStructure, PdbMetadata), PdbError> {
        PdbFile::read_from(&mut Cursor::new(text.as_bytes()))
    }

    #[test]
    fn reads_chains_residues_and_atoms() {
        let text = PdbFixture::new().chain('A', 3).chain('B', 2).render();
        let (structure, metadata) = read(&text).unwrap();

        assert_eq!(structure.models().len(), 1);
        let model = structure.first_model().unwrap();
        assert_eq!(model.chain_ids().collect::<Vec<_>>(), vec!['A', 'B']);
        assert_eq!(structure.standard_residue_count('A'), Some(3));
        assert_eq!(structure.standard_residue_count('B'), Some(2));
        assert_eq!(metadata.atom_records, 5 * 4);
        assert_eq!(metadata.hetero_records, 0);

        let residue = &structure.chain('A').unwrap().residues()[0];
        assert_eq!(residue.name, "ALA");
        assert_eq!(residue.number, 1);
        let ca = residue.atom("CA").unwrap();
        assert_eq!(ca.element.as_deref(), Some("C"));
        assert!(ca.serial.is_some());
    }

    #[test]
    fn hetatm_records_become_hetero_residues() {
        let text = PdbFixture::new()
            .chain('A', 2)
            .hetero('A', "HOH", 3)
            .hetero('A', "HEM", 1)
            .render();
        let (structure, metadata) = read(&text).unwrap();

        let chain = structure.chain('A').unwrap();
        assert_eq!(chain.residues().len(), 6);
        assert_eq!(chain.standard_residue_count(), 2);
        assert_eq!(
            chain
                .residues()
                .iter()
                .filter(|r| r.kind == ResidueKind::Water)
                .count(),
            3
        );
        assert_eq!(metadata.hetero_records, 4);
    }

    #[test]
    fn header_lines_are_retained() {
        let text = PdbFixture::new()
            .raw("HEADER    UBIQUITIN                               02-JAN-87   1UBQ")
            .chain('A', 1)
            .render();
        let (_, metadata) = read(&text).unwrap();
        assert_eq!(metadata.header_lines.len(), 1);
        assert!(metadata.header_lines[0].contains("1UBQ"));
    }

    #[test]
    fn end_record_stops_parsing() {
        let mut text = PdbFixture::new().chain('A', 2).render();
        text.push_str(&atom_line("ATOM", 99, "CA", "GLY", 'Z', 1, [0.0, 0.0, 0.0], "C"));
        text.push('\n');
        let (structure, _) = read(&text).unwrap();
        assert!(structure.chain('Z').is_none());
    }

    #[test]
    fn model_records_produce_multiple_models() {
        let text = PdbFixture::new()
            .raw("MODEL        1")
            .chain('A', 2)
            .raw("ENDMDL")
            .raw("MODEL        2")
            .chain('A', 2)
            .chain('B', 1)
            .raw("ENDMDL")
            .render();
        let (structure, _) = read(&text).unwrap();
        assert_eq!(structure.models().len(), 2);
        assert!(structure.chain('B').is_none());
        assert!(structure.model(1).unwrap().chain('B').is_some());
    }

    #[test]
    fn alternate_locations_keep_first_atom() {
        let text = [
            atom_line("ATOM", 1, "CA", "SER", 'A', 1, [1.0, 1.0, 1.0], "C"),
            atom_line("ATOM", 2, "CA", "SER", 'A', 1, [2.0, 2.0, 2.0], "C"),
        ]
        .join("\n");
        let (structure, metadata) = read(&text).unwrap();
        let residue = &structure.chain('A').unwrap().residues()[0];
        assert_eq!(residue.atoms().len(), 1);
        assert_eq!(residue.atom("CA").unwrap().position.x, 1.0);
        assert_eq!(metadata.skipped_alternates, 1);
    }

    #[test]
    fn malformed_coordinates_are_rejected() {
        let text = "ATOM      1  N   ALA A   1     XXXXX YYYYY ZZZZZ  1.00  0.00           N\nEND\n";
        let err = read(text).unwrap_err();
        match err {
            PdbError::Parse { line, kind } => {
                assert_eq!(line, 1);
                assert!(matches!(kind, PdbParseErrorKind::InvalidFloat { .. }));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn truncated_coordinate_record_is_rejected() {
        let err = read("ATOM      1  CA  ALA A   1      11.104   6.134\n").unwrap_err();
        assert!(matches!(
            err,
            PdbError::Parse {
                kind: PdbParseErrorKind::LineTooShort,
                ..
            }
        ));
    }

    #[test]
    fn non_numeric_residue_number_is_rejected() {
        let line = "ATOM      1  CA  ALA A   X      11.104   6.134  -6.504  1.00  0.00           C";
        let err = read(line).unwrap_err();
        assert!(matches!(
            err,
            PdbError::Parse {
                kind: PdbParseErrorKind::InvalidInt { .. },
                ..
            }
        ));
    }

    #[test]
    fn lenient_columns_tolerate_garbage() {
        let line = "ATOM  *****  CA  ALA A   1      11.104   6.134  -6.504  x.xx  y.yy";
        let (structure, _) = read(line).unwrap();
        let atom = &structure.chain('A').unwrap().residues()[0].atoms()[0];
        assert!(atom.serial.is_none());
        assert!(atom.element.is_none());
    }

    #[test]
    fn insertion_codes_split_residues() {
        let text = [
            atom_line("ATOM", 1, "CA", "ALA", 'A', 52, [0.0, 0.0, 0.0], "C"),
            "ATOM      2  CA  GLY A  52A      1.000   1.000   1.000  1.00  0.00           C"
                .to_string(),
        ]
        .join("\n");
        let (structure, _) = read(&text).unwrap();
        let chain = structure.chain('A').unwrap();
        assert_eq!(chain.residues().len(), 2);
        assert_eq!(chain.residues()[1].insertion_code, Some('A'));
    }
}
