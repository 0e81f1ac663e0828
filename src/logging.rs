//! Logging setup for applications using the loader
//!
//! The loader itself only emits `tracing` events. Applications that do not
//! already install a subscriber can call [`init_logging`] to get JSON or
//! human-readable output on STDOUT, optionally mirrored to a file.

use crate::config::LoggingConfig;
use anyhow::Result;
use std::fs::OpenOptions;
use std::sync::Arc;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize logging based on configuration.
///
/// `RUST_LOG`, when set, takes precedence over the configured level.
///
/// # Errors
///
/// Returns an error if the level is not a valid filter, the log file cannot
/// be opened, or a global subscriber is already installed.
///
/// # Examples
///
/// ```no_run
/// use solace_services::config::LoggingConfig;
/// use solace_services::logging::init_logging;
///
/// let config = LoggingConfig {
///     level: "debug".to_string(),
///     json_format: true,
///     file_path: None,
/// };
///
/// init_logging(&config).unwrap();
/// ```
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let env_filter = build_filter(&config.level)?;
    let registry = tracing_subscriber::registry().with(env_filter);

    let file = match &config.file_path {
        Some(path) => Some(Arc::new(
            OpenOptions::new().create(true).append(true).open(path)?,
        )),
        None => None,
    };

    if config.json_format {
        let stdout_layer = fmt::layer().json().with_current_span(true);
        let file_layer = file.map(|file| {
            fmt::layer()
                .json()
                .with_current_span(true)
                .with_writer(file)
        });
        registry.with(stdout_layer).with(file_layer).try_init()?;
    } else {
        let stdout_layer = fmt::layer().with_target(true).with_level(true);
        let file_layer = file.map(|file| {
            fmt::layer()
                .with_target(true)
                .with_level(true)
                .with_ansi(false)
                .with_writer(file)
        });
        registry.with(stdout_layer).with(file_layer).try_init()?;
    }

    Ok(())
}

fn build_filter(level: &str) -> Result<EnvFilter> {
    Ok(EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(level))?)
}
