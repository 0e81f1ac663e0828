//! Solace service credential types
//!
//! Serde types for the documents a services manifest can contain. Field names
//! follow the camelCase JSON of the Solace messaging service binding and are
//! case-sensitive. Unknown fields are ignored on input.
//!
//! # Example
//!
//! ```rust
//! use solace_services::model::SolaceServiceCredentials;
//!
//! let json = r#"{
//!   "clientUsername": "app-user",
//!   "msgVpnName": "vpn1",
//!   "smfHosts": ["tcp://broker.example:55555"],
//!   "activeManagementHostname": "mgr.example"
//! }"#;
//!
//! let creds: SolaceServiceCredentials = serde_json::from_str(json).unwrap();
//! assert_eq!(creds.msg_vpn_name.as_deref(), Some("vpn1"));
//! assert_eq!(creds.smf_hosts, Some(vec!["tcp://broker.example:55555".to_string()]));
//! ```

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Services-map key used by current platforms.
pub const SOLACE_PUBSUB_SERVICES_KEY: &str = "solace-pubsub";

/// Legacy services-map key.
pub const SOLACE_MESSAGING_SERVICES_KEY: &str = "solace-messaging";

/// Normalized credentials keyed by service id.
pub type ServiceCredentialsMap = HashMap<String, SolaceServiceCredentials>;

/// Connection credentials for one Solace messaging service.
///
/// Only `id`, `msg_vpn_name` and `active_management_hostname` are interpreted
/// by the loader. Everything else is carried through as decoded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SolaceServiceCredentials {
    /// Service id. Assigned by the loader when absent or empty.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Client username.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_username: Option<String>,

    /// Client password.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_password: Option<String>,

    /// Message VPN name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub msg_vpn_name: Option<String>,

    /// SMF hosts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub smf_hosts: Option<Vec<String>>,

    /// SMF TLS hosts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub smf_tls_hosts: Option<Vec<String>>,

    /// SMF compressed hosts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub smf_zip_hosts: Option<Vec<String>>,

    /// JMS JNDI URIs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jms_jndi_uris: Option<Vec<String>>,

    /// JMS JNDI TLS URIs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jms_jndi_tls_uris: Option<Vec<String>>,

    /// REST URIs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rest_uris: Option<Vec<String>>,

    /// REST TLS URIs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rest_tls_uris: Option<Vec<String>>,

    /// AMQP URIs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amqp_uris: Option<Vec<String>>,

    /// AMQP TLS URIs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amqp_tls_uris: Option<Vec<String>>,

    /// MQTT URIs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mqtt_uris: Option<Vec<String>>,

    /// MQTT TLS URIs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mqtt_tls_uris: Option<Vec<String>>,

    /// MQTT over WebSocket URIs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mqtt_ws_uris: Option<Vec<String>>,

    /// MQTT over secure WebSocket URIs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mqtt_wss_uris: Option<Vec<String>>,

    /// Management hostnames.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub management_hostnames: Option<Vec<String>>,

    /// Management password.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub management_password: Option<String>,

    /// Management username.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub management_username: Option<String>,

    /// Hostname of the active management endpoint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_management_hostname: Option<String>,
}

impl SolaceServiceCredentials {
    /// Returns the service id, or `None` when absent or empty.
    pub fn service_id(&self) -> Option<&str> {
        non_empty(self.id.as_deref())
    }
}

/// One entry of a services map: a named service and its credentials.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolaceMessagingServiceInfo {
    /// Service instance name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Service credentials.
    pub credentials: SolaceServiceCredentials,
}

/// A services-map manifest.
///
/// Platforms publish the service list under either
/// [`SOLACE_PUBSUB_SERVICES_KEY`] or the legacy
/// [`SOLACE_MESSAGING_SERVICES_KEY`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServicesManifest {
    /// Services listed under `solace-pubsub`.
    #[serde(
        rename = "solace-pubsub",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub solace_pubsub: Option<Vec<SolaceMessagingServiceInfo>>,

    /// Services listed under the legacy `solace-messaging` key.
    #[serde(
        rename = "solace-messaging",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub solace_messaging: Option<Vec<SolaceMessagingServiceInfo>>,
}

impl ServicesManifest {
    /// Consumes the manifest, returning the `solace-pubsub` list when present
    /// and the legacy list otherwise.
    pub fn into_services(self) -> Vec<SolaceMessagingServiceInfo> {
        self.solace_pubsub
            .or(self.solace_messaging)
            .unwrap_or_default()
    }
}

pub(crate) fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
