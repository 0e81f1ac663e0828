//! Solace service credentials loader
//!
//! [`SolaceCredentialsLoader`] is the entry point for applications. Each call
//! locates the manifest afresh with a [`ManifestLocator`] and normalizes it;
//! nothing is cached between calls.
//!
//! | Manifest shape               | Detected by                              | Default service id                           |
//! |------------------------------|------------------------------------------|----------------------------------------------|
//! | Map of services              | object root with `solace-pubsub` or `solace-messaging` | service `name`, else `msgVpnName@activeManagementHostname` |
//! | List of service credentials  | array root                               | `msgVpnName@activeManagementHostname`        |
//! | Single service credentials   | anything else                            | `msgVpnName@activeManagementHostname`        |
//!
//! An `id` already present in the credentials always wins.

use crate::config::LoaderConfig;
use crate::error::Result;
use crate::locator::ManifestLocator;
use crate::model::{ServiceCredentialsMap, SolaceServiceCredentials};
use crate::normalizer::normalize;

/// Reads Solace service credentials from the application environment.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use solace_services::environment::MapEnvironment;
/// use solace_services::locator::{ManifestLocator, SOLCAP_SERVICES};
/// use solace_services::SolaceCredentialsLoader;
///
/// let env = MapEnvironment::new().with_property(
///     SOLCAP_SERVICES,
///     r#"{"msgVpnName":"vpn1","activeManagementHostname":"mgr.example"}"#,
/// );
/// let loader = SolaceCredentialsLoader::with_locator(
///     ManifestLocator::new().with_environment(Arc::new(env)),
/// );
///
/// assert!(loader.manifest_exists());
/// let creds = loader.get_service_credentials_by_id("vpn1@mgr.example").unwrap();
/// assert!(creds.is_some());
/// ```
#[derive(Debug, Clone, Default)]
pub struct SolaceCredentialsLoader {
    locator: ManifestLocator,
}

impl SolaceCredentialsLoader {
    /// Creates a loader over the real process environment with the default
    /// search order.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a loader using the given locator.
    pub fn with_locator(locator: ManifestLocator) -> Self {
        Self { locator }
    }

    /// Creates a loader from configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the configuration is invalid
    pub fn from_config(config: &LoaderConfig) -> Result<Self> {
        config.validate()?;
        let locator = ManifestLocator::with_queries(config.search.clone())
            .with_manifest_file_name(config.manifest_file_name.clone());
        Ok(Self::with_locator(locator))
    }

    /// Returns the underlying locator.
    pub fn locator(&self) -> &ManifestLocator {
        &self.locator
    }

    /// Fetches every Solace service in the manifest, keyed by service id.
    ///
    /// Returns an empty map when no manifest is found.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ServicesError::MalformedManifest`] if a manifest was
    /// found but could not be decoded.
    pub fn get_all_service_credentials(&self) -> Result<ServiceCredentialsMap> {
        let Some(raw) = self.locator.get_manifest() else {
            return Ok(ServiceCredentialsMap::new());
        };

        normalize(&raw).map_err(|e| {
            tracing::error!("{}", e);
            e
        })
    }

    /// Returns one Solace service from the manifest, or `None` if there are
    /// none.
    ///
    /// Which service is returned when the manifest holds several is
    /// unspecified; use [`Self::get_service_credentials_by_id`] to pick one.
    pub fn get_service_credentials(&self) -> Result<Option<SolaceServiceCredentials>> {
        Ok(self.get_all_service_credentials()?.into_values().next())
    }

    /// Returns the Solace service with the given id, if present.
    pub fn get_service_credentials_by_id(
        &self,
        service_id: &str,
    ) -> Result<Option<SolaceServiceCredentials>> {
        Ok(self.get_all_service_credentials()?.remove(service_id))
    }

    /// Returns `true` if a non-empty manifest is present in the environment.
    ///
    /// The manifest is located again but not parsed.
    pub fn manifest_exists(&self) -> bool {
        self.locator.get_manifest().is_some()
    }
}
