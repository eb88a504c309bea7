//! Environment sources the resolver reads overrides from

use std::collections::HashMap;
use std::path::Path;
use types::ConfigError;

/// Read-only access to named environment values
///
/// The resolver only ever asks for a value by name. Implementations must not
/// mutate anything as a side effect of a lookup.
pub trait EnvSource: Send + Sync {
    /// Value of `name`, or `None` when it is not set
    fn get(&self, name: &str) -> Option<String>;
}

impl<T: EnvSource + ?Sized> EnvSource for &T {
    fn get(&self, name: &str) -> Option<String> {
        (**self).get(name)
    }
}

impl<T: EnvSource + ?Sized> EnvSource for Box<T> {
    fn get(&self, name: &str) -> Option<String> {
        (**self).get(name)
    }
}

/// The real process environment
///
/// Values that are not valid unicode are treated as unset.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn get(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

/// In-memory environment, mostly for tests and embedding
#[derive(Debug, Clone, Default)]
pub struct MapEnv {
    vars: HashMap<String, String>,
}

impl MapEnv {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a variable, replacing any previous value
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(name.into(), value.into());
        self
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MapEnv {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

impl EnvSource for MapEnv {
    fn get(&self, name: &str) -> Option<String> {
        self.vars.get(name).cloned()
    }
}

/// Variables parsed from a `.env` file
///
/// Unlike `dotenv::from_path`, loading does not export anything into the
/// process environment.
#[derive(Debug, Clone)]
pub struct DotenvFile {
    vars: MapEnv,
}

impl DotenvFile {
    /// Parse a `.env` file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let env_file_error = |message: String| ConfigError::EnvFile {
            path: path.display().to_string(),
            message,
        };

        // The non-deprecated `from_path` exports into the process environment
        #[allow(deprecated)]
        let iter = dotenv::from_path_iter(path).map_err(|e| env_file_error(e.to_string()))?;
        let mut vars = MapEnv::new();
        let mut count = 0usize;
        for item in iter {
            let (key, value) = item.map_err(|e| env_file_error(e.to_string()))?;
            vars = vars.with(key, value);
            count += 1;
        }

        tracing::debug!(path = %path.display(), count, "Parsed env file");
        Ok(Self { vars })
    }
}

impl EnvSource for DotenvFile {
    fn get(&self, name: &str) -> Option<String> {
        self.vars.get(name)
    }
}

/// Two sources stacked: `overrides` wins whenever it has a value
#[derive(Debug, Clone)]
pub struct LayeredEnv<O, B> {
    overrides: O,
    base: B,
}

impl<O: EnvSource, B: EnvSource> LayeredEnv<O, B> {
    pub fn new(overrides: O, base: B) -> Self {
        Self { overrides, base }
    }
}

impl<O: EnvSource, B: EnvSource> EnvSource for LayeredEnv<O, B> {
    fn get(&self, name: &str) -> Option<String> {
        self.overrides.get(name).or_else(|| self.base.get(name))
    }
}
