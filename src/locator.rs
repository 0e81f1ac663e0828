//! Manifest locator
//!
//! Finds the raw services manifest by walking an ordered list of
//! [`SearchQuery`] values and returning the first non-empty result. The
//! default search order is:
//!
//! 1. process property `SOLACE_CREDENTIALS`
//! 2. process property `SOLCAP_SERVICES`
//! 3. environment variable `SOLACE_CREDENTIALS`
//! 4. environment variable `SOLCAP_SERVICES`
//! 5. file `.solaceservices` in the directory named by `SOLACE_SERVICES_HOME`
//!    (process property, then environment variable), or the home directory
//!
//! Content found under `SOLACE_CREDENTIALS` is passed through the configured
//! [`CredentialsExchange`] before it is considered.
//!
//! The locator never fails. Unreadable manifest files are logged and skipped.

use std::fmt;
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::environment::{Environment, SystemEnvironment};
use crate::exchange::{CredentialsExchange, NoopExchange};

/// Key holding platform credentials that must be exchanged for a manifest.
pub const SOLACE_CREDENTIALS: &str = "SOLACE_CREDENTIALS";

/// Key holding a services manifest.
pub const SOLCAP_SERVICES: &str = "SOLCAP_SERVICES";

/// Key naming the directory that holds the manifest file.
pub const SOLACE_SERVICES_HOME: &str = "SOLACE_SERVICES_HOME";

/// Default manifest file name.
pub const MANIFEST_FILE_NAME: &str = ".solaceservices";

/// Where a search query looks for a manifest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ManifestSource {
    /// A process property (see [`crate::properties`]).
    ProcessProperty,
    /// An OS environment variable.
    EnvVar,
    /// A manifest file in the directory named by the key.
    File,
}

impl fmt::Display for ManifestSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::ProcessProperty => "process_property",
            Self::EnvVar => "env_var",
            Self::File => "file",
        };
        f.write_str(name)
    }
}

/// A single `(source, key)` lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    /// Where to look.
    pub source: ManifestSource,
    /// Property or variable name.
    pub key: String,
}

impl SearchQuery {
    /// Creates a query.
    pub fn new(source: ManifestSource, key: impl Into<String>) -> Self {
        Self {
            source,
            key: key.into(),
        }
    }

    /// Returns the default search order.
    pub fn defaults() -> Vec<Self> {
        vec![
            Self::new(ManifestSource::ProcessProperty, SOLACE_CREDENTIALS),
            Self::new(ManifestSource::ProcessProperty, SOLCAP_SERVICES),
            Self::new(ManifestSource::EnvVar, SOLACE_CREDENTIALS),
            Self::new(ManifestSource::EnvVar, SOLCAP_SERVICES),
            Self::new(ManifestSource::File, SOLACE_SERVICES_HOME),
        ]
    }
}

/// Locates the raw services manifest.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use solace_services::environment::MapEnvironment;
/// use solace_services::locator::{ManifestLocator, SOLCAP_SERVICES};
///
/// let env = MapEnvironment::new().with_env_var(SOLCAP_SERVICES, "[]");
/// let locator = ManifestLocator::new().with_environment(Arc::new(env));
///
/// assert_eq!(locator.get_manifest().as_deref(), Some("[]"));
/// ```
#[derive(Clone)]
pub struct ManifestLocator {
    queries: Vec<SearchQuery>,
    manifest_file_name: String,
    environment: Arc<dyn Environment>,
    exchange: Arc<dyn CredentialsExchange>,
}

impl fmt::Debug for ManifestLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ManifestLocator")
            .field("queries", &self.queries)
            .field("manifest_file_name", &self.manifest_file_name)
            .finish_non_exhaustive()
    }
}

impl Default for ManifestLocator {
    fn default() -> Self {
        Self::new()
    }
}

impl ManifestLocator {
    /// Creates a locator with the default search order over the real process
    /// environment.
    pub fn new() -> Self {
        Self::with_queries(SearchQuery::defaults())
    }

    /// Creates a locator with a custom search order.
    pub fn with_queries(queries: Vec<SearchQuery>) -> Self {
        Self {
            queries,
            manifest_file_name: MANIFEST_FILE_NAME.to_string(),
            environment: Arc::new(SystemEnvironment),
            exchange: Arc::new(NoopExchange),
        }
    }

    /// Replaces the environment lookups are made against.
    pub fn with_environment(mut self, environment: Arc<dyn Environment>) -> Self {
        self.environment = environment;
        self
    }

    /// Replaces the credentials exchange hook.
    pub fn with_exchange(mut self, exchange: Arc<dyn CredentialsExchange>) -> Self {
        self.exchange = exchange;
        self
    }

    /// Sets the manifest file name used by [`ManifestSource::File`] queries.
    pub fn with_manifest_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.manifest_file_name = file_name.into();
        self
    }

    /// Returns the configured search order.
    pub fn queries(&self) -> &[SearchQuery] {
        &self.queries
    }

    /// Returns the first non-empty manifest in search order.
    ///
    /// The content is returned as found and is not validated.
    pub fn get_manifest(&self) -> Option<String> {
        for query in &self.queries {
            let mut manifest = self.lookup(query);

            if query.key == SOLACE_CREDENTIALS && !manifest.is_empty() {
                manifest = self.exchange.exchange(&manifest);
            }

            if !manifest.is_empty() {
                tracing::debug!(source = %query.source, key = %query.key, "Found services manifest");
                return Some(manifest);
            }
        }

        tracing::debug!("No services manifest found");
        None
    }

    fn lookup(&self, query: &SearchQuery) -> String {
        match query.source {
            ManifestSource::ProcessProperty => {
                self.environment.property(&query.key).unwrap_or_default()
            }
            ManifestSource::EnvVar => self.environment.env_var(&query.key).unwrap_or_default(),
            ManifestSource::File => match self.manifest_dir(&query.key) {
                Some(dir) => read_manifest_file(&dir.join(&self.manifest_file_name)),
                None => {
                    tracing::debug!(key = %query.key, "No manifest directory and no home directory");
                    String::new()
                }
            },
        }
    }

    /// The environment variable is only consulted when the property is
    /// absent. A property set to `""` selects the home directory.
    fn manifest_dir(&self, key: &str) -> Option<PathBuf> {
        let dir = match self.environment.property(key) {
            Some(dir) => dir,
            None => self.environment.env_var(key).unwrap_or_default(),
        };

        if dir.is_empty() {
            self.environment.home_dir()
        } else {
            Some(PathBuf::from(dir))
        }
    }
}

/// Reads a manifest file, returning an empty string if it is missing or
/// cannot be read.
fn read_manifest_file(path: &Path) -> String {
    if !path.exists() {
        return String::new();
    }

    manifest_from_read(path, std::fs::read(path))
}

fn manifest_from_read(path: &Path, read: io::Result<Vec<u8>>) -> String {
    match read {
        Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
        Err(e) if e.kind() == ErrorKind::PermissionDenied => {
            tracing::warn!(
                "{} cannot be opened for reading. Ignoring file parameter...",
                path.display()
            );
            String::new()
        }
        Err(e) => {
            tracing::error!(error = %e, "Error reading {}", path.display());
            String::new()
        }
    }
}
