//! # seqdesign Core Library
//!
//! Validates protein structure files, hands them to an external
//! ProteinMPNN-style sequence-design program and collects the designed
//! sequences it writes back.
//!
//! ## Layout
//!
//! - **[`core`]**: the parsed structure model plus readers for PDB input and
//!   FASTA output.
//! - **[`engine`]**: request validation, configuration, the [`engine::invoker::DesignInvoker`]
//!   capability, process-wide model readiness and the error model.
//! - **[`workflows`]**: the end-to-end design pipeline that ties the other
//!   layers together and owns every temporary resource it creates.

pub mod core;
pub mod engine;
pub mod workflows;
