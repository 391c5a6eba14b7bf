//! Synthetic PDB fixtures for unit tests.

use std::fs;
use std::path::{Path, PathBuf};

const BACKBONE_ATOMS: [(&str, &str); 4] = [("N", "N"), ("CA", "C"), ("C", "C"), ("O", "O")];
const RESIDUE_CYCLE: [&str; 5] = ["ALA", "GLY", "SER", "LEU", "LYS"];

/// Formats one fixed-column `ATOM`/`HETATM` record.
#[allow(clippy::too_many_arguments)]
pub(crate) fn atom_line(
    record: &str,
    serial: usize,
    name: &str,
    res_name: &str,
    chain: char,
    res_seq: isize,
    xyz: [f64; 3],
    element: &str,
) -> String {
    let name_field = if name.len() < 4 {
        format!(" {:<3}", name)
    } else {
        name.to_string()
    };
    format!(
        "{:<6}{:>5} {:<4} {:>3} {}{:>4}    {:>8.3}{:>8.3}{:>8.3}{:>6.2}{:>6.2}          {:>2}",
        record, serial, name_field, res_name, chain, res_seq, xyz[0], xyz[1], xyz[2], 1.0, 0.0, element
    )
}

/// Builder for PDB text with generated residues.
pub(crate) struct PdbFixture {
    lines: Vec<String>,
    serial: usize,
    next_residue: isize,
}

impl PdbFixture {
    pub(crate) fn new() -> Self {
        Self {
            lines: Vec::new(),
            serial: 0,
            next_residue: 1,
        }
    }

    pub(crate) fn raw(mut self, line: &str) -> Self {
        self.lines.push(line.to_string());
        self
    }

    /// Appends `residues` standard residues with N, CA, C and O atoms.
    pub(crate) fn chain(self, chain: char, residues: usize) -> Self {
        self.residues(chain, residues, &BACKBONE_ATOMS)
    }

    /// Appends `residues` standard residues that lack an alpha carbon.
    pub(crate) fn chain_without_ca(self, chain: char, residues: usize) -> Self {
        self.residues(chain, residues, &[("N", "N"), ("C", "C"), ("O", "O")])
    }

    /// Appends `count` single-atom hetero groups named `res_name`.
    pub(crate) fn hetero(mut self, chain: char, res_name: &str, count: usize) -> Self {
        for _ in 0..count {
            let res_seq = self.take_residue_number();
            self.serial += 1;
            let offset = self.serial as f64 * 0.5;
            self.lines.push(atom_line(
                "HETATM",
                self.serial,
                "O",
                res_name,
                chain,
                res_seq,
                [offset, -offset, 1.0],
                "O",
            ));
        }
        self
    }

    fn residues(mut self, chain: char, residues: usize, atoms: &[(&str, &str)]) -> Self {
        for i in 0..residues {
            let res_seq = self.take_residue_number();
            let res_name = RESIDUE_CYCLE[i % RESIDUE_CYCLE.len()];
            for (j, (name, element)) in atoms.iter().enumerate() {
                self.serial += 1;
                let x = res_seq as f64 * 3.8;
                let y = j as f64 * 1.2;
                self.lines.push(atom_line(
                    "ATOM", self.serial, name, res_name, chain, res_seq, [x, y, -2.5], element,
                ));
            }
        }
        self.lines.push(format!("TER   {:>5}", self.serial + 1));
        self
    }

    fn take_residue_number(&mut self) -> isize {
        let n = self.next_residue;
        self.next_residue += 1;
        n
    }

    pub(crate) fn render(&self) -> String {
        let mut text = self.lines.join("\n");
        text.push_str("\nEND\n");
        text
    }

    pub(crate) fn write_to(&self, dir: &Path, file_name: &str) -> PathBuf {
        let path = dir.join(file_name);
        fs::write(&path, self.render()).expect("failed to write PDB fixture");
        path
    }
}
