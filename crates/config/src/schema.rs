//! Configuration schema definitions

use serde::Serialize;
use types::utils::join_route;
use url::Url;

/// Environment variable overriding the API base URL
pub const BASE_URL_ENV: &str = "MODULARFLOW_API_BASE_URL";

/// Environment variable overriding the API path prefix
pub const API_PREFIX_ENV: &str = "MODULARFLOW_API_PREFIX";

/// Base URL used when no override is set
pub const DEFAULT_BASE_URL: &str = "http://localhost:8050";

/// API prefix used when no override is set
pub const DEFAULT_API_PREFIX: &str = "/api";

/// Resolved global API configuration
///
/// Instances are immutable. The only way to obtain one is through the
/// resolver, which guarantees `base_url` has no trailing `/` and
/// `api_prefix` starts with a single `/` and has no trailing `/`.
/// A prefix override made only of slashes resolves to an empty
/// `api_prefix`; see [`crate::ConfigValidator`] for guarding against it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GlobalApiConfig {
    base_url: String,
    api_prefix: String,
}

impl GlobalApiConfig {
    pub(crate) fn new(base_url: String, api_prefix: String) -> Self {
        Self { base_url, api_prefix }
    }

    /// Scheme, host and port of the API service, without a trailing slash
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Path segment prepended to every API route
    pub fn api_prefix(&self) -> &str {
        &self.api_prefix
    }

    /// `base_url` joined with `api_prefix`
    pub fn api_root(&self) -> String {
        format!("{}{}", self.base_url, self.api_prefix)
    }

    /// Full URL for an API route
    ///
    /// Leading slashes on `route` are ignored, so `"chat"` and `"/chat"`
    /// produce the same URL.
    pub fn endpoint(&self, route: &str) -> String {
        join_route(&self.api_root(), route)
    }

    /// `base_url` with any userinfo credentials removed, for logging
    ///
    /// Values that do not parse as a URL are returned unchanged.
    pub fn redacted_base_url(&self) -> String {
        match Url::parse(&self.base_url) {
            Ok(mut url) if !url.username().is_empty() || url.password().is_some() => {
                // Only fails for URLs that cannot carry credentials in the first place
                let _ = url.set_username("");
                let _ = url.set_password(None);
                url.to_string()
            }
            _ => self.base_url.clone(),
        }
    }

    /// The configuration as `KEY=value` pairs, keyed by override variable
    pub fn to_env_pairs(&self) -> [(&'static str, &str); 2] {
        [(BASE_URL_ENV, &self.base_url), (API_PREFIX_ENV, &self.api_prefix)]
    }
}

impl Default for GlobalApiConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL.to_string(), DEFAULT_API_PREFIX.to_string())
    }
}
