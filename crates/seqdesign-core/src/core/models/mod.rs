//! # Core Models Module
//!
//! Data structures for the parsed form of a structure file.
//!
//! ## Overview
//!
//! A [`ParsedStructure`](structure::ParsedStructure) is an ownership tree:
//! models own chains, chains own residues and residues own atoms. The tree is
//! assembled once by the [`StructureBuilder`](builder::StructureBuilder) and is
//! read-only afterwards, so validation stages and the design workflow can share
//! it by reference.
//!
//! ## Key Components
//!
//! - [`atom`] - Atom name, serial, coordinates and element
//! - [`residue`] - Residue identity and its standard/hetero classification
//! - [`chain`] - Ordered residues of a single-character chain
//! - [`structure`] - Models and the top-level parsed structure
//! - [`builder`] - Incremental construction from atom records

pub mod atom;
pub mod builder;
pub mod chain;
pub mod residue;
pub mod structure;
