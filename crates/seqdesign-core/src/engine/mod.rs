//! Request handling: configuration, validation, invocation of the design
//! program and the error model shared by all of them.

pub mod config;
pub mod error;
pub mod invoker;
pub mod progress;
pub mod readiness;
pub mod request;
pub mod validation;
