//! Credentials exchange hook
//!
//! A manifest found under the `SOLACE_CREDENTIALS` key holds platform
//! credentials rather than a service manifest. Before it can be used it must be
//! exchanged for the real manifest, which is what [`CredentialsExchange`]
//! does. No exchange endpoint is wired up yet: the default [`NoopExchange`]
//! returns an empty string, which the locator treats as "no match" and moves
//! on to the next query.

/// Turns raw platform credentials into a services manifest.
#[cfg_attr(test, mockall::automock)]
pub trait CredentialsExchange: Send + Sync {
    /// Exchanges `raw` for a manifest. An empty return value means no
    /// manifest is available.
    fn exchange(&self, raw: &str) -> String;
}

/// Exchange that never produces a manifest.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopExchange;

impl CredentialsExchange for NoopExchange {
    fn exchange(&self, _raw: &str) -> String {
        String::new()
    }
}

/// Any `Fn(&str) -> String` closure can serve as an exchange.
///
/// # Examples
///
/// ```
/// use solace_services::exchange::CredentialsExchange;
///
/// let exchange = |raw: &str| format!("[{}]", raw);
/// assert_eq!(exchange.exchange("{}"), "[{}]");
/// ```
impl<F> CredentialsExchange for F
where
    F: Fn(&str) -> String + Send + Sync,
{
    fn exchange(&self, raw: &str) -> String {
        self(raw)
    }
}
