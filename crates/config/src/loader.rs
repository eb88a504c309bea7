//! Configuration resolver
//!
//! Resolution never fails. Malformed or missing overrides are normalized
//! into something usable instead of aborting start-up.

use crate::env::{DotenvFile, EnvSource, LayeredEnv, MapEnv, ProcessEnv};
use crate::schema::{GlobalApiConfig, API_PREFIX_ENV, BASE_URL_ENV, DEFAULT_API_PREFIX, DEFAULT_BASE_URL};
use std::path::Path;
use tracing::debug;
use types::utils::trim_trailing_slashes;

/// Normalize a raw API prefix
///
/// Missing, empty or whitespace-only input yields `/api`. Anything else is
/// trimmed, given a leading `/` if it lacks one, and stripped of trailing
/// slashes. Input made only of slashes therefore yields `""`.
pub fn resolve_prefix(raw: Option<&str>) -> String {
    let trimmed = raw.map(str::trim).unwrap_or_default();
    if trimmed.is_empty() {
        return DEFAULT_API_PREFIX.to_string();
    }

    let prefixed = if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{}", trimmed)
    };
    trim_trailing_slashes(&prefixed).to_string()
}

/// Normalize a raw base URL
///
/// Missing or empty input yields the default. Any other value is kept
/// verbatim apart from trailing slashes.
pub fn resolve_base_url(raw: Option<&str>) -> String {
    let selected = raw.filter(|s| !s.is_empty()).unwrap_or(DEFAULT_BASE_URL);
    trim_trailing_slashes(selected).to_string()
}

/// Resolve configuration from the process environment
///
/// Every call re-reads the environment and returns a fresh instance.
pub fn resolve_config() -> GlobalApiConfig {
    resolve_config_from(&ProcessEnv)
}

/// Resolve configuration from an arbitrary environment source
pub fn resolve_config_from<E: EnvSource + ?Sized>(env: &E) -> GlobalApiConfig {
    let raw_base_url = env.get(BASE_URL_ENV);
    let raw_prefix = env.get(API_PREFIX_ENV);

    let config = GlobalApiConfig::new(
        resolve_base_url(raw_base_url.as_deref()),
        resolve_prefix(raw_prefix.as_deref()),
    );

    debug!(
        base_url = %config.redacted_base_url(),
        base_url_overridden = raw_base_url.as_deref().is_some_and(|s| !s.is_empty()),
        api_prefix = %config.api_prefix(),
        api_prefix_overridden = raw_prefix.as_deref().is_some_and(|s| !s.trim().is_empty()),
        "Resolved global API configuration"
    );

    config
}

/// Loader for layered sources other than the bare process environment
pub struct ConfigLoader;

impl ConfigLoader {
    /// Resolve configuration with `overrides` layered over a base source
    ///
    /// The base is the variables of `env_file` when given, otherwise the
    /// process environment. Only reading the file can fail; the values
    /// themselves are normalized like any other override.
    pub fn load(env_file: Option<&Path>, overrides: MapEnv) -> types::Result<GlobalApiConfig> {
        let base: Box<dyn EnvSource> = match env_file {
            Some(path) => Box::new(DotenvFile::load(path)?),
            None => Box::new(ProcessEnv),
        };

        Ok(resolve_config_from(&LayeredEnv::new(overrides, base)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{env_guard, set_env_var};
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_prefix_defaults() {
        assert_eq!(resolve_prefix(None), "/api");
        assert_eq!(resolve_prefix(Some("")), "/api");
        assert_eq!(resolve_prefix(Some("   ")), "/api");
        assert_eq!(resolve_prefix(Some("\t\n")), "/api");
    }

    #[test]
    fn test_prefix_normalization() {
        assert_eq!(resolve_prefix(Some("/api/")), "/api");
        assert_eq!(resolve_prefix(Some("api")), "/api");
        assert_eq!(resolve_prefix(Some("  v2  ")), "/v2");
        assert_eq!(resolve_prefix(Some("v2/")), "/v2");
        assert_eq!(resolve_prefix(Some("/api/v1///")), "/api/v1");
        assert_eq!(resolve_prefix(Some("api/v1")), "/api/v1");
    }

    #[test]
    fn test_prefix_all_slashes_is_empty() {
        assert_eq!(resolve_prefix(Some("///")), "");
        assert_eq!(resolve_prefix(Some("/")), "");
        assert_eq!(resolve_prefix(Some(" / ")), "");
    }

    #[test]
    fn test_prefix_without_slash_gets_exactly_one() {
        for raw in ["api", "v2", "modules/SmartTavern", " x ", "a/b/"] {
            let resolved = resolve_prefix(Some(raw));
            let expected = raw.trim().trim_end_matches('/');
            assert!(resolved.starts_with('/'), "{raw:?} -> {resolved:?}");
            assert!(!resolved.starts_with("//"), "{raw:?} -> {resolved:?}");
            assert_eq!(&resolved[1..], expected);
        }
    }

    #[test]
    fn test_prefix_with_slash_never_doubles() {
        for raw in ["/api", "/api/", "/v2/", " /x ", "/a/b"] {
            let resolved = resolve_prefix(Some(raw));
            assert!(!resolved.starts_with("//"), "{raw:?} -> {resolved:?}");
            assert!(!resolved.ends_with('/'), "{raw:?} -> {resolved:?}");
        }
    }

    #[test]
    fn test_prefix_idempotent() {
        let inputs = [None, Some(""), Some("   "), Some("api"), Some("/api/"), Some(" v2/ "), Some("a/b//")];
        for raw in inputs {
            let once = resolve_prefix(raw);
            assert_eq!(resolve_prefix(Some(&once)), once, "input {raw:?}");
        }
    }

    #[test]
    fn test_base_url_resolution() {
        assert_eq!(resolve_base_url(None), "http://localhost:8050");
        assert_eq!(resolve_base_url(Some("")), "http://localhost:8050");
        assert_eq!(resolve_base_url(Some("http://example.com/")), "http://example.com");
        assert_eq!(resolve_base_url(Some("http://example.com///")), "http://example.com");
        assert_eq!(resolve_base_url(Some("https://api.example.com:9000")), "https://api.example.com:9000");
        assert_eq!(resolve_base_url(Some("///")), "");
    }

    #[test]
    fn test_resolve_without_overrides() {
        let config = resolve_config_from(&MapEnv::new());
        assert_eq!(config.base_url(), "http://localhost:8050");
        assert_eq!(config.api_prefix(), "/api");
        assert_eq!(config, GlobalApiConfig::default());
    }

    #[test]
    fn test_resolve_with_overrides() {
        let env = MapEnv::new()
            .with(BASE_URL_ENV, "http://example.com/")
            .with(API_PREFIX_ENV, "v2");
        let config = resolve_config_from(&env);
        assert_eq!(config.base_url(), "http://example.com");
        assert_eq!(config.api_prefix(), "/v2");
    }

    #[test]
    fn test_resolve_with_empty_overrides() {
        let env = MapEnv::new().with(BASE_URL_ENV, "").with(API_PREFIX_ENV, "");
        assert_eq!(resolve_config_from(&env), GlobalApiConfig::default());
    }

    #[test]
    fn test_resolve_with_whitespace_prefix_override() {
        let env = MapEnv::new().with(API_PREFIX_ENV, "   ");
        assert_eq!(resolve_config_from(&env).api_prefix(), "/api");

        let env = MapEnv::new().with(API_PREFIX_ENV, " \t ");
        assert_eq!(resolve_config_from(&env).api_prefix(), "/api");
    }

    #[test]
    fn test_resolve_returns_fresh_instances() {
        let first = resolve_config_from(&MapEnv::new().with(API_PREFIX_ENV, "v1"));
        let second = resolve_config_from(&MapEnv::new().with(API_PREFIX_ENV, "v2"));
        assert_eq!(first.api_prefix(), "/v1");
        assert_eq!(second.api_prefix(), "/v2");
    }

    #[test]
    fn test_resolve_from_process_env() {
        let _lock = env_guard();
        let _base = set_env_var(BASE_URL_ENV, None);
        let _prefix = set_env_var(API_PREFIX_ENV, None);
        assert_eq!(resolve_config(), GlobalApiConfig::default());

        let _base = set_env_var(BASE_URL_ENV, Some("http://example.com/"));
        let _prefix = set_env_var(API_PREFIX_ENV, Some("v2"));
        let config = resolve_config();
        assert_eq!(config.base_url(), "http://example.com");
        assert_eq!(config.api_prefix(), "/v2");
    }

    #[test]
    fn test_load_from_env_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "MODULARFLOW_API_BASE_URL=https://tavern.example.org/").unwrap();
        writeln!(file, "MODULARFLOW_API_PREFIX=/backend/api/").unwrap();

        let config = ConfigLoader::load(Some(file.path()), MapEnv::new()).unwrap();
        assert_eq!(config.base_url(), "https://tavern.example.org");
        assert_eq!(config.api_prefix(), "/backend/api");
    }

    #[test]
    fn test_load_overrides_win_over_env_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "MODULARFLOW_API_BASE_URL=https://tavern.example.org/").unwrap();
        writeln!(file, "MODULARFLOW_API_PREFIX=/backend").unwrap();

        let overrides = MapEnv::new().with(API_PREFIX_ENV, "v3");
        let config = ConfigLoader::load(Some(file.path()), overrides).unwrap();
        assert_eq!(config.base_url(), "https://tavern.example.org");
        assert_eq!(config.api_prefix(), "/v3");
    }

    #[test]
    fn test_load_missing_env_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = ConfigLoader::load(Some(dir.path().join("absent.env").as_path()), MapEnv::new()).unwrap_err();
        assert!(matches!(err, types::ModularFlowError::Config(_)));
        assert!(err.to_string().contains("absent.env"));
    }

    #[test]
    fn test_load_from_process_env_with_overrides() {
        let _lock = env_guard();
        let _base = set_env_var(BASE_URL_ENV, Some("http://from-env.example/"));
        let _prefix = set_env_var(API_PREFIX_ENV, None);

        let overrides = MapEnv::new().with(API_PREFIX_ENV, "cli");
        let config = ConfigLoader::load(None, overrides).unwrap();
        assert_eq!(config.base_url(), "http://from-env.example");
        assert_eq!(config.api_prefix(), "/cli");
    }
}
