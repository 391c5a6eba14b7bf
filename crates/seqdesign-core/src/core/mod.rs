//! # Core Module
//!
//! Stateless building blocks of the design pipeline: the parsed structure
//! model and the readers for the file formats that enter and leave it.
//!
//! - **Structure Representation** ([`models`]) - Models, chains, residues and atoms
//! - **File I/O** ([`io`]) - Fixed-column PDB reader and FASTA result reader

pub mod io;
pub mod models;

#[cfg(test)]
pub(crate) mod test_utils;
