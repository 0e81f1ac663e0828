//! Process-scoped properties
//!
//! A process-wide key/value store for settings supplied when the application
//! is launched, distinct from OS environment variables. Applications
//! typically populate it once at startup, either directly with
//! [`set_property`] or from `-DKEY=VALUE` launch arguments with
//! [`load_defines`]. The manifest locator reads it through
//! [`crate::environment::SystemEnvironment`].
//!
//! # Example
//!
//! ```
//! use solace_services::properties;
//!
//! properties::set_property("SOLCAP_SERVICES_DOC_EXAMPLE", "{}");
//! assert_eq!(
//!     properties::property("SOLCAP_SERVICES_DOC_EXAMPLE").as_deref(),
//!     Some("{}")
//! );
//! properties::clear_property("SOLCAP_SERVICES_DOC_EXAMPLE");
//! ```

use std::collections::HashMap;
use std::sync::{OnceLock, RwLock, RwLockReadGuard, RwLockWriteGuard};

const DEFINE_PREFIX: &str = "-D";

fn store() -> &'static RwLock<HashMap<String, String>> {
    static PROPERTIES: OnceLock<RwLock<HashMap<String, String>>> = OnceLock::new();
    PROPERTIES.get_or_init(|| RwLock::new(HashMap::new()))
}

// A panic while holding the lock cannot leave the map half-updated, so a
// poisoned lock is still safe to use.
fn read() -> RwLockReadGuard<'static, HashMap<String, String>> {
    store().read().unwrap_or_else(|e| e.into_inner())
}

fn write() -> RwLockWriteGuard<'static, HashMap<String, String>> {
    store().write().unwrap_or_else(|e| e.into_inner())
}

/// Returns the value of a process property, if set.
pub fn property(key: &str) -> Option<String> {
    read().get(key).cloned()
}

/// Sets a process property, returning the previous value.
pub fn set_property(key: impl Into<String>, value: impl Into<String>) -> Option<String> {
    write().insert(key.into(), value.into())
}

/// Removes a process property, returning the previous value.
pub fn clear_property(key: &str) -> Option<String> {
    write().remove(key)
}

/// Stores every `-DKEY=VALUE` argument as a process property.
///
/// Arguments without the `-D` prefix, without `=`, or with an empty key are
/// ignored. Returns the number of properties stored.
///
/// # Example
///
/// ```
/// use solace_services::properties;
///
/// let stored = properties::load_defines([
///     "-DSOLACE_DEFINES_DOC_EXAMPLE=/opt/solace",
///     "--verbose",
/// ]);
/// assert_eq!(stored, 1);
/// assert_eq!(
///     properties::property("SOLACE_DEFINES_DOC_EXAMPLE").as_deref(),
///     Some("/opt/solace")
/// );
/// properties::clear_property("SOLACE_DEFINES_DOC_EXAMPLE");
/// ```
pub fn load_defines<I, S>(args: I) -> usize
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut stored = 0;
    for arg in args {
        if let Some((key, value)) = parse_define(arg.as_ref()) {
            tracing::debug!(key = %key, "Loaded process property from launch argument");
            set_property(key, value);
            stored += 1;
        }
    }
    stored
}

fn parse_define(arg: &str) -> Option<(&str, &str)> {
    let (key, value) = arg.strip_prefix(DEFINE_PREFIX)?.split_once('=')?;
    if key.is_empty() {
        None
    } else {
        Some((key, value))
    }
}
