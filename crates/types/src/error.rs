//! Error types for the ModularFlow configuration crates

use thiserror::Error;

/// Main error type for ModularFlow configuration consumers
#[derive(Error, Debug)]
pub enum ModularFlowError {
    /// Configuration related errors
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for ModularFlow operations
pub type Result<T> = std::result::Result<T, ModularFlowError>;

/// Configuration specific errors
///
/// The resolver itself never produces these. They come from the opt-in
/// validation layer and from loading values out of `.env` files.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Validation error
    #[error("Configuration validation error: {field}: {message}")]
    ValidationError { field: String, message: String },

    /// Env file could not be read or parsed
    #[error("Failed to load env file {path}: {message}")]
    EnvFile { path: String, message: String },
}

impl From<ConfigError> for ModularFlowError {
    fn from(err: ConfigError) -> Self {
        ModularFlowError::Config(err.to_string())
    }
}
