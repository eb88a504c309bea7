//! Process-wide configuration instance

use crate::loader::resolve_config;
use crate::schema::GlobalApiConfig;
use std::sync::OnceLock;
use tracing::debug;

static GLOBAL_API_CONFIG: OnceLock<GlobalApiConfig> = OnceLock::new();

/// The process-wide configuration, resolved on first access
///
/// Concurrent first callers race on a one-time initializer, so the
/// environment is read once and everyone observes the same instance.
/// Later environment changes are not picked up; use [`refresh`] for that.
pub fn global_api_config() -> &'static GlobalApiConfig {
    GLOBAL_API_CONFIG.get_or_init(|| {
        let config = resolve_config();
        debug!(api_root = %config.api_root(), "Initialized process-wide API configuration");
        config
    })
}

/// Re-read the environment and return a new configuration
///
/// The cached process-wide instance is left untouched.
pub fn refresh() -> GlobalApiConfig {
    resolve_config()
}
