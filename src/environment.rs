//! Environment access for the manifest locator
//!
//! The locator never reads process state directly. It goes through the
//! [`Environment`] trait so that lookups can be redirected in tests without
//! touching global process state.

use std::collections::HashMap;
use std::path::PathBuf;

use directories::BaseDirs;

use crate::properties;

/// Read-only view of the places a manifest can come from.
pub trait Environment: Send + Sync {
    /// Returns a process property by name.
    fn property(&self, key: &str) -> Option<String>;

    /// Returns an OS environment variable by name.
    fn env_var(&self, key: &str) -> Option<String>;

    /// Returns the current user's home directory, if it can be determined.
    fn home_dir(&self) -> Option<PathBuf>;
}

/// The real process environment.
///
/// Properties come from [`crate::properties`], variables from `std::env`, and
/// the home directory from the platform's user directories.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemEnvironment;

impl Environment for SystemEnvironment {
    fn property(&self, key: &str) -> Option<String> {
        properties::property(key)
    }

    fn env_var(&self, key: &str) -> Option<String> {
        // Non-unicode values cannot hold a JSON manifest or a usable path
        std::env::var(key).ok()
    }

    fn home_dir(&self) -> Option<PathBuf> {
        BaseDirs::new().map(|dirs| dirs.home_dir().to_path_buf())
    }
}

/// An in-memory environment.
///
/// # Examples
///
/// ```
/// use solace_services::environment::{Environment, MapEnvironment};
///
/// let env = MapEnvironment::new()
///     .with_property("SOLCAP_SERVICES", "{}")
///     .with_home_dir("/home/app");
///
/// assert_eq!(env.property("SOLCAP_SERVICES").as_deref(), Some("{}"));
/// assert_eq!(env.env_var("SOLCAP_SERVICES"), None);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MapEnvironment {
    properties: HashMap<String, String>,
    env_vars: HashMap<String, String>,
    home_dir: Option<PathBuf>,
}

impl MapEnvironment {
    /// Creates an empty environment with no home directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a process property.
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// Adds an environment variable.
    pub fn with_env_var(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env_vars.insert(key.into(), value.into());
        self
    }

    /// Sets the home directory.
    pub fn with_home_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.home_dir = Some(dir.into());
        self
    }
}

impl Environment for MapEnvironment {
    fn property(&self, key: &str) -> Option<String> {
        self.properties.get(key).cloned()
    }

    fn env_var(&self, key: &str) -> Option<String> {
        self.env_vars.get(key).cloned()
    }

    fn home_dir(&self) -> Option<PathBuf> {
        self.home_dir.clone()
    }
}
