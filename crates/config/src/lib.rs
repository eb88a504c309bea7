//! Global API configuration for ModularFlow
//!
//! This crate resolves the API base URL and path prefix from environment
//! overrides, normalizes them, and keeps one process-wide copy around for
//! callers that do not need to observe environment changes.

pub mod env;
pub mod global;
pub mod loader;
pub mod schema;
pub mod validation;

#[cfg(test)]
mod test_support;

pub use env::{DotenvFile, EnvSource, LayeredEnv, MapEnv, ProcessEnv};
pub use global::{global_api_config, refresh};
pub use loader::{resolve_base_url, resolve_config, resolve_config_from, resolve_prefix, ConfigLoader};
pub use schema::*;
pub use validation::*;
