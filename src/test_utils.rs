//! Test utilities for the Solace services loader
//!
//! This module provides temporary directory management, manifest fixtures,
//! and a `tracing` layer that records emitted events so tests can assert on
//! warnings and errors.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use tempfile::TempDir;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

use crate::error::ServicesError;
use crate::locator::MANIFEST_FILE_NAME;

/// Create a temporary directory for testing
pub fn temp_dir() -> TempDir {
    TempDir::new().expect("Failed to create temporary directory")
}

/// Write `content` to the manifest file inside `dir`
///
/// # Returns
///
/// Returns the path to the created file
pub fn create_manifest_file(dir: &TempDir, content: &str) -> PathBuf {
    let path = dir.path().join(MANIFEST_FILE_NAME);
    std::fs::write(&path, content).expect("Failed to write manifest file");
    path
}

/// Assert that an error contains the expected message
pub fn assert_error_contains<T>(result: Result<T, ServicesError>, expected: &str) {
    match result {
        Ok(_) => panic!("Expected error containing '{}' but got Ok", expected),
        Err(e) => {
            let error_msg = e.to_string();
            assert!(
                error_msg.contains(expected),
                "Error message '{}' does not contain '{}'",
                error_msg,
                expected
            );
        }
    }
}

/// A fully populated single-service credentials record
pub fn sample_credentials_json() -> String {
    r#"{
  "clientUsername": "sample-client",
  "clientPassword": "sample-password",
  "msgVpnName": "sample-vpn",
  "smfHosts": ["tcp://broker.example:55555"],
  "smfTlsHosts": ["tcps://broker.example:55443"],
  "smfZipHosts": ["tcp://broker.example:55003"],
  "jmsJndiUris": ["smf://broker.example:55555"],
  "jmsJndiTlsUris": ["smfs://broker.example:55443"],
  "restUris": ["http://broker.example:9000"],
  "restTlsUris": ["https://broker.example:9443"],
  "amqpUris": ["amqp://broker.example:5672"],
  "amqpTlsUris": ["amqps://broker.example:5671"],
  "mqttUris": ["tcp://broker.example:1883"],
  "mqttTlsUris": ["ssl://broker.example:8883"],
  "mqttWsUris": ["ws://broker.example:8000"],
  "mqttWssUris": ["wss://broker.example:8443"],
  "managementHostnames": ["mgr.example"],
  "managementPassword": "mgmt-password",
  "managementUsername": "mgmt-user",
  "activeManagementHostname": "mgr.example"
}"#
    .to_string()
}

/// Wrap a credentials record in a one-service services map under `key`
pub fn services_manifest_json(key: &str, name: Option<&str>, credentials: &str) -> String {
    match name {
        Some(name) => format!(
            r#"{{"{}": [{{"name": "{}", "label": "solace-pubsub", "credentials": {}}}]}}"#,
            key, name, credentials
        ),
        None => format!(
            r#"{{"{}": [{{"label": "solace-pubsub", "credentials": {}}}]}}"#,
            key, credentials
        ),
    }
}

/// A `tracing` event recorded by [`captured_events`]
#[derive(Debug, Clone)]
pub struct CapturedEvent {
    /// Event level
    pub level: Level,
    /// Formatted message plus any other fields as `name=value`
    pub message: String,
}

#[derive(Clone, Default)]
struct CaptureLayer {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

struct MessageVisitor(String);

impl Visit for MessageVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        if !self.0.is_empty() {
            self.0.push(' ');
        }
        if field.name() == "message" {
            self.0.push_str(&format!("{:?}", value));
        } else {
            self.0.push_str(&format!("{}={:?}", field.name(), value));
        }
    }
}

impl<S: Subscriber> Layer<S> for CaptureLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = MessageVisitor(String::new());
        event.record(&mut visitor);
        self.events
            .lock()
            .expect("capture lock poisoned")
            .push(CapturedEvent {
                level: *event.metadata().level(),
                message: visitor.0,
            });
    }
}

/// Run `f` with a subscriber that records every event emitted on this thread
pub fn captured_events<R>(f: impl FnOnce() -> R) -> (R, Vec<CapturedEvent>) {
    let layer = CaptureLayer::default();
    let events = layer.events.clone();
    let subscriber = tracing_subscriber::registry().with(layer);
    let result = tracing::subscriber::with_default(subscriber, f);
    let events = events.lock().expect("capture lock poisoned").clone();
    (result, events)
}
