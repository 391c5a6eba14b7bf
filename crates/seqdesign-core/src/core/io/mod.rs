//! Provides input functionality for the file formats the pipeline consumes.
//!
//! Structure files are read through the [`traits::StructureFormat`] interface
//! (currently implemented for PDB in [`pdb`]); the FASTA output of the external
//! design program is read by [`fasta`].

pub mod fasta;
pub mod pdb;
pub mod traits;
