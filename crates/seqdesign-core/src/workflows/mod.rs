//! End-to-end workflows built on the engine.
//!
//! - [`design`] takes an uploaded structure through validation, the external
//!   design program and output parsing.

pub mod design;
