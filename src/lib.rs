//! Solace services - credential discovery for Solace messaging clients
//!
//! This library locates a Solace services manifest in the application's
//! environment, parses it, and exposes the service credentials it contains
//! keyed by a stable service id.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//!
//! - `locator`: Ordered search for the raw manifest (process properties,
//!   environment variables, manifest file)
//! - `normalizer`: Shape detection, decoding, and service id assignment
//! - `loader`: The query API applications call
//! - `model`: Credentials and services-map types
//! - `environment`: Injectable access to process state
//! - `properties`: Process-scoped property store
//! - `exchange`: Hook for exchanging platform credentials for a manifest
//! - `config`: Loader configuration and validation
//! - `logging`: Optional `tracing` subscriber setup
//! - `error`: Error types and result aliases
//!
//! # Example
//!
//! ```no_run
//! use solace_services::SolaceCredentialsLoader;
//!
//! fn main() -> solace_services::Result<()> {
//!     let loader = SolaceCredentialsLoader::new();
//!     if let Some(creds) = loader.get_service_credentials()? {
//!         println!("Connecting to VPN {:?}", creds.msg_vpn_name);
//!     }
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod environment;
pub mod error;
pub mod exchange;
pub mod loader;
pub mod locator;
pub mod logging;
pub mod model;
pub mod normalizer;
pub mod properties;

// Re-export commonly used types
pub use config::LoaderConfig;
pub use error::{Result, ServicesError};
pub use loader::SolaceCredentialsLoader;
pub use locator::{ManifestLocator, ManifestSource, SearchQuery};
pub use model::{ServiceCredentialsMap, SolaceMessagingServiceInfo, SolaceServiceCredentials};

#[cfg(test)]
pub mod test_utils;
