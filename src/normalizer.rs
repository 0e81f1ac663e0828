//! Manifest normalization
//!
//! Turns a raw manifest into a [`ServiceCredentialsMap`]. Three document
//! shapes are accepted:
//!
//! | Shape        | Detected by                                              |
//! |--------------|----------------------------------------------------------|
//! | Services map | object root with a `solace-pubsub` or `solace-messaging` key |
//! | List         | array root                                               |
//! | Single       | anything else                                            |
//!
//! The manifest is parsed once into a [`serde_json::Value`] and the shape is
//! chosen from the tree. The tree is then decoded into the concrete shape, so
//! a decoding failure is reported against the shape that was detected.
//!
//! Every record gets an id from [`derive_id`].

use serde_json::Value;

use crate::error::{Result, ServicesError};
use crate::model::{
    non_empty, ServiceCredentialsMap, ServicesManifest, SolaceServiceCredentials,
    SOLACE_MESSAGING_SERVICES_KEY, SOLACE_PUBSUB_SERVICES_KEY,
};

/// Document layout of a manifest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManifestShape {
    /// Object holding a list of named services.
    ServicesMap,
    /// Array of credentials records.
    List,
    /// One credentials record.
    Single,
}

impl ManifestShape {
    /// Detects the shape of a parsed manifest.
    pub fn detect(root: &Value) -> Self {
        match root {
            Value::Object(map)
                if map.contains_key(SOLACE_PUBSUB_SERVICES_KEY)
                    || map.contains_key(SOLACE_MESSAGING_SERVICES_KEY) =>
            {
                Self::ServicesMap
            }
            Value::Array(_) => Self::List,
            _ => Self::Single,
        }
    }
}

/// Derives the id a credentials record is indexed under.
///
/// A non-empty `credentials.id` wins. Otherwise a non-empty `service_name`
/// (only ever supplied for services-map entries) is used. Otherwise the id is
/// `msgVpnName + "@" + activeManagementHostname`; absent operands count as
/// empty, so a record without a VPN name yields an id such as `"@host"`.
///
/// # Examples
///
/// ```
/// use solace_services::model::SolaceServiceCredentials;
/// use solace_services::normalizer::derive_id;
///
/// let creds = SolaceServiceCredentials {
///     msg_vpn_name: Some("vpn1".to_string()),
///     active_management_hostname: Some("mgr.example".to_string()),
///     ..Default::default()
/// };
///
/// assert_eq!(derive_id(&creds, None), "vpn1@mgr.example");
/// assert_eq!(derive_id(&creds, Some("my-service")), "my-service");
/// ```
pub fn derive_id(credentials: &SolaceServiceCredentials, service_name: Option<&str>) -> String {
    if let Some(id) = credentials.service_id() {
        return id.to_string();
    }
    if let Some(name) = non_empty(service_name) {
        return name.to_string();
    }
    format!(
        "{}@{}",
        credentials.msg_vpn_name.as_deref().unwrap_or_default(),
        credentials
            .active_management_hostname
            .as_deref()
            .unwrap_or_default()
    )
}

/// Parses a manifest into credentials keyed by service id.
///
/// Records are inserted in document order, so when two records derive the
/// same id the later one is kept.
///
/// # Errors
///
/// Returns [`ServicesError::MalformedManifest`] if the text is not JSON or
/// the detected shape does not decode.
///
/// # Examples
///
/// ```
/// use solace_services::normalizer::normalize;
///
/// let services = normalize(
///     r#"[{"id":"x","msgVpnName":"v1"},{"msgVpnName":"v2","activeManagementHostname":"h2"}]"#,
/// )
/// .unwrap();
///
/// assert!(services.contains_key("x"));
/// assert!(services.contains_key("v2@h2"));
/// ```
pub fn normalize(raw: &str) -> Result<ServiceCredentialsMap> {
    let records = decode_records(raw).map_err(|source| ServicesError::MalformedManifest {
        raw: raw.to_string(),
        source,
    })?;

    let mut services = ServiceCredentialsMap::with_capacity(records.len());
    for (id, mut credentials) in records {
        credentials.id = Some(id.clone());
        services.insert(id, credentials);
    }
    Ok(services)
}

fn decode_records(
    raw: &str,
) -> std::result::Result<Vec<(String, SolaceServiceCredentials)>, serde_json::Error> {
    let root: Value = serde_json::from_str(raw)?;

    let records = match ManifestShape::detect(&root) {
        ManifestShape::ServicesMap => serde_json::from_value::<ServicesManifest>(root)?
            .into_services()
            .into_iter()
            .map(|service| {
                let id = derive_id(&service.credentials, service.name.as_deref());
                (id, service.credentials)
            })
            .collect(),
        ManifestShape::List => serde_json::from_value::<Vec<SolaceServiceCredentials>>(root)?
            .into_iter()
            .map(|credentials| (derive_id(&credentials, None), credentials))
            .collect(),
        ManifestShape::Single => {
            let credentials = serde_json::from_value::<SolaceServiceCredentials>(root)?;
            vec![(derive_id(&credentials, None), credentials)]
        }
    };

    Ok(records)
}
