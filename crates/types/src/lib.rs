//! Shared types for the ModularFlow configuration crates
//!
//! This crate contains the error types and URL helpers shared by the
//! configuration resolver and the command line front end.

pub mod error;
pub mod utils;

// Re-export commonly used types
pub use error::{ConfigError, ModularFlowError, Result};
