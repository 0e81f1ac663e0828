//! Error types for the Solace services loader
//!
//! This module defines the error types surfaced by the loader, using
//! `thiserror` for ergonomic error handling.
//!
//! A missing manifest is not an error: it is reported as an empty credentials
//! map. Filesystem problems while reading the manifest file are logged and
//! absorbed by the locator. Only configuration problems and manifests that
//! cannot be decoded reach the caller.

use thiserror::Error;

/// Main error type for Solace services loader operations
#[derive(Error, Debug)]
pub enum ServicesError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// A non-empty manifest that cannot be decoded into any supported shape
    ///
    /// The raw manifest text is kept so callers can report exactly what was
    /// found in the environment.
    #[error("The provided services manifest does not have the expected format:\n{raw}")]
    MalformedManifest {
        /// The manifest text as returned by the locator
        raw: String,
        /// The underlying decoding failure
        #[source]
        source: serde_json::Error,
    },
}

impl ServicesError {
    /// Returns the raw manifest text for [`ServicesError::MalformedManifest`].
    pub fn raw_manifest(&self) -> Option<&str> {
        match self {
            Self::MalformedManifest { raw, .. } => Some(raw),
            _ => None,
        }
    }
}

/// Result type alias for Solace services loader operations
pub type Result<T> = std::result::Result<T, ServicesError>;
