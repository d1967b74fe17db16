//! Current API version lookup.
//!
//! The resolver never reads configuration storage directly. Hosts pass a
//! [`CurrentVersionSource`] into resolution, which keeps version math
//! independent of how the deployment stores its settings and lets tests
//! substitute a fixed value.
//!
//! # Example
//!
//! ```ignore
//! use apiroute_core::{AppSettings, EnvSettings, FixedVersion};
//!
//! // From an in-memory settings map
//! let settings = AppSettings::new().with("currentApiVersion", "3");
//!
//! // From CURRENT_API_VERSION, after loading `.env`
//! let env = EnvSettings::new().with_dotenv();
//!
//! // From a value the host already parsed
//! let fixed = FixedVersion(3);
//! ```

use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Well-known settings key holding the current API version
pub const CURRENT_API_VERSION_KEY: &str = "currentApiVersion";

/// Capability that reports the deployment's current API version.
///
/// Implementations return the raw configured value. Parsing and validation
/// happen in the resolver so every source fails the same way.
pub trait CurrentVersionSource {
    /// Raw current API version, or `None` when the setting is absent
    fn current_api_version(&self) -> Option<String>;
}

/// In-memory application settings keyed by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppSettings {
    values: HashMap<String, String>,
}

impl AppSettings {
    /// Create an empty settings map
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a setting, builder style
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    /// Insert or replace a setting
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    /// Look up a setting by key
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }
}

impl<K, V> FromIterator<(K, V)> for AppSettings
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl CurrentVersionSource for AppSettings {
    fn current_api_version(&self) -> Option<String> {
        self.get(CURRENT_API_VERSION_KEY).map(str::to_string)
    }
}

#[derive(Debug, Deserialize)]
struct VersionEnv {
    current_api_version: Option<String>,
}

/// Reads the current API version from the process environment.
///
/// The variable is `CURRENT_API_VERSION`, or `<PREFIX>_CURRENT_API_VERSION`
/// when a prefix is configured. Every lookup reads the environment afresh.
#[derive(Debug, Clone, Default)]
pub struct EnvSettings {
    prefix: Option<String>,
}

impl EnvSettings {
    /// Read `CURRENT_API_VERSION`
    pub fn new() -> Self {
        Self::default()
    }

    /// Read `<PREFIX>_CURRENT_API_VERSION`
    pub fn prefixed(prefix: impl Into<String>) -> Self {
        Self {
            prefix: Some(prefix.into()),
        }
    }

    /// Load a `.env` file from the current directory before the first lookup.
    ///
    /// Existing environment variables are not overridden.
    pub fn with_dotenv(self) -> Self {
        load_dotenv();
        self
    }

    /// Name of the environment variable this source reads
    pub fn variable(&self) -> String {
        match &self.prefix {
            Some(prefix) => format!("{}_CURRENT_API_VERSION", prefix),
            None => "CURRENT_API_VERSION".to_string(),
        }
    }
}

impl CurrentVersionSource for EnvSettings {
    fn current_api_version(&self) -> Option<String> {
        let loaded = match &self.prefix {
            Some(prefix) => envy::prefixed(format!("{}_", prefix)).from_env::<VersionEnv>(),
            None => envy::from_env::<VersionEnv>(),
        };

        match loaded {
            Ok(env) => env.current_api_version,
            Err(err) => {
                route_event!(warn, variable = %self.variable(), error = %err, "failed to read current API version from environment");
                None
            }
        }
    }
}

/// A current API version the host has already determined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedVersion(pub u32);

impl CurrentVersionSource for FixedVersion {
    fn current_api_version(&self) -> Option<String> {
        Some(self.0.to_string())
    }
}

/// Source backed by a closure, see [`from_fn`].
#[derive(Clone)]
pub struct FnSource<F>(F);

impl<F> std::fmt::Debug for FnSource<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnSource").finish_non_exhaustive()
    }
}

/// Wrap a closure as a [`CurrentVersionSource`]
pub fn from_fn<F>(f: F) -> FnSource<F>
where
    F: Fn() -> Option<String>,
{
    FnSource(f)
}

impl<F> CurrentVersionSource for FnSource<F>
where
    F: Fn() -> Option<String>,
{
    fn current_api_version(&self) -> Option<String> {
        (self.0)()
    }
}

/// Load environment variables from a `.env` file in the current directory.
///
/// Returns the path of the loaded file, or `None` if no file was found.
/// Existing environment variables are not overridden.
pub fn load_dotenv() -> Option<PathBuf> {
    dotenvy::dotenv().ok()
}

/// Load environment variables from a specific `.env` file.
pub fn load_dotenv_from(path: impl AsRef<Path>) -> Option<PathBuf> {
    let path = path.as_ref();
    dotenvy::from_path(path).ok().map(|_| path.to_path_buf())
}
