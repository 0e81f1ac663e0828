//! Configuration management for the Solace services loader
//!
//! This module handles loading the loader configuration from a YAML file,
//! applying environment variable overrides, and validation.
//!
//! # Example
//!
//! ```yaml
//! manifest_file_name: .solaceservices
//! search:
//!   - source: env_var
//!     key: SOLCAP_SERVICES
//!   - source: file
//!     key: SOLACE_SERVICES_HOME
//! logging:
//!   level: debug
//!   json_format: true
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, ServicesError};
use crate::locator::{SearchQuery, MANIFEST_FILE_NAME};

const VALID_LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Main configuration structure for the loader
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoaderConfig {
    /// Ordered manifest search queries
    #[serde(default = "SearchQuery::defaults")]
    pub search: Vec<SearchQuery>,

    /// Name of the manifest file looked up by `file` queries
    #[serde(default = "default_manifest_file_name")]
    pub manifest_file_name: String,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_manifest_file_name() -> String {
    MANIFEST_FILE_NAME.to_string()
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON instead of human-readable lines
    #[serde(default)]
    pub json_format: bool,

    /// Also append log output to this file
    #[serde(default)]
    pub file_path: Option<PathBuf>,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json_format: false,
            file_path: None,
        }
    }
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            search: SearchQuery::defaults(),
            manifest_file_name: default_manifest_file_name(),
            logging: LoggingConfig::default(),
        }
    }
}

impl LoaderConfig {
    /// Load configuration from file with environment overrides
    ///
    /// A missing file is not an error: defaults are used instead.
    ///
    /// # Errors
    ///
    /// Returns error if the file exists but cannot be read or parsed
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut config = if path.exists() {
            Self::from_file(path)?
        } else {
            tracing::warn!("Config file not found at {}, using defaults", path.display());
            Self::default()
        };

        config.apply_env_vars();

        Ok(config)
    }

    fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ServicesError::Config(format!("Failed to read config file: {}", e)))?;
        Self::from_yaml(&contents)
    }

    /// Parse configuration from a YAML string
    pub fn from_yaml(contents: &str) -> Result<Self> {
        serde_yaml::from_str(contents)
            .map_err(|e| ServicesError::Config(format!("Failed to parse config: {}", e)))
    }

    fn apply_env_vars(&mut self) {
        if let Ok(level) = std::env::var("SOLACE_LOADER_LOG_LEVEL") {
            let level = level.to_lowercase();
            if VALID_LOG_LEVELS.contains(&level.as_str()) {
                tracing::debug!(level = %level, "Env override: SOLACE_LOADER_LOG_LEVEL");
                self.logging.level = level;
            } else {
                tracing::warn!("Invalid SOLACE_LOADER_LOG_LEVEL: {}", level);
            }
        }

        if let Ok(json_logs) = std::env::var("SOLACE_LOADER_JSON_LOGS") {
            match json_logs.parse::<bool>() {
                Ok(v) => {
                    self.logging.json_format = v;
                    tracing::debug!(json_logs = v, "Env override: SOLACE_LOADER_JSON_LOGS");
                }
                Err(_) => {
                    tracing::warn!("Invalid value for SOLACE_LOADER_JSON_LOGS: {}", json_logs);
                }
            }
        }

        if let Ok(log_file) = std::env::var("SOLACE_LOADER_LOG_FILE") {
            tracing::debug!(log_file = %log_file, "Env override: SOLACE_LOADER_LOG_FILE");
            self.logging.file_path = Some(PathBuf::from(log_file));
        }

        if let Ok(file_name) = std::env::var("SOLACE_LOADER_MANIFEST_FILE") {
            tracing::debug!(file_name = %file_name, "Env override: SOLACE_LOADER_MANIFEST_FILE");
            self.manifest_file_name = file_name;
        }
    }

    /// Validate configuration
    ///
    /// # Errors
    ///
    /// Returns error if any validation check fails
    pub fn validate(&self) -> Result<()> {
        if let Some(query) = self.search.iter().find(|q| q.key.is_empty()) {
            return Err(ServicesError::Config(format!(
                "Search query key cannot be empty (source: {})",
                query.source
            )));
        }

        if self.manifest_file_name.is_empty() {
            return Err(ServicesError::Config(
                "manifest_file_name cannot be empty".to_string(),
            ));
        }

        if self.manifest_file_name.contains(['/', '\\']) {
            return Err(ServicesError::Config(format!(
                "manifest_file_name must be a file name, not a path: {}",
                self.manifest_file_name
            )));
        }

        if !VALID_LOG_LEVELS.contains(&self.logging.level.as_str()) {
            return Err(ServicesError::Config(format!(
                "Invalid log level: {}. Must be one of: {}",
                self.logging.level,
                VALID_LOG_LEVELS.join(", ")
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locator::ManifestSource;
    use crate::test_utils::{assert_error_contains, temp_dir};
    use serial_test::serial;
    use std::env;

    fn clear_env() {
        env::remove_var("SOLACE_LOADER_LOG_LEVEL");
        env::remove_var("SOLACE_LOADER_JSON_LOGS");
        env::remove_var("SOLACE_LOADER_LOG_FILE");
        env::remove_var("SOLACE_LOADER_MANIFEST_FILE");
    }

    #[test]
    fn test_default_config() {
        let config = LoaderConfig::default();
        assert_eq!(config.search, SearchQuery::defaults());
        assert_eq!(config.manifest_file_name, ".solaceservices");
        assert_eq!(config.logging.level, "info");
        assert!(!config.logging.json_format);
        assert!(config.logging.file_path.is_none());
    }

    #[test]
    fn test_config_validation_success() {
        assert!(LoaderConfig::default().validate().is_ok());
    }

    #[test]
    fn test_config_validation_empty_key() {
        let mut config = LoaderConfig::default();
        config.search.push(SearchQuery::new(ManifestSource::EnvVar, ""));
        assert_error_contains(config.validate(), "key cannot be empty (source: env_var)");
    }

    #[test]
    fn test_config_validation_empty_manifest_file_name() {
        let config = LoaderConfig {
            manifest_file_name: String::new(),
            ..LoaderConfig::default()
        };
        assert_error_contains(config.validate(), "manifest_file_name cannot be empty");
    }

    #[test]
    fn test_config_validation_manifest_file_name_is_path() {
        let config = LoaderConfig {
            manifest_file_name: "conf/.solaceservices".to_string(),
            ..LoaderConfig::default()
        };
        assert_error_contains(config.validate(), "not a path");
    }

    #[test]
    fn test_config_validation_invalid_log_level() {
        let mut config = LoaderConfig::default();
        config.logging.level = "loud".to_string();
        assert_error_contains(config.validate(), "Invalid log level: loud");
    }

    #[test]
    fn test_config_from_yaml() {
        let yaml = r#"
manifest_file_name: services.json
search:
  - source: process_property
    key: SOLCAP_SERVICES
  - source: file
    key: APP_HOME
logging:
  level: debug
  json_format: true
"#;
        let config = LoaderConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.manifest_file_name, "services.json");
        assert_eq!(
            config.search,
            vec![
                SearchQuery::new(ManifestSource::ProcessProperty, "SOLCAP_SERVICES"),
                SearchQuery::new(ManifestSource::File, "APP_HOME"),
            ]
        );
        assert_eq!(config.logging.level, "debug");
        assert!(config.logging.json_format);
    }

    #[test]
    fn test_config_from_yaml_fills_defaults() {
        let config = LoaderConfig::from_yaml("logging:\n  level: warn\n").unwrap();
        assert_eq!(config.search, SearchQuery::defaults());
        assert_eq!(config.manifest_file_name, MANIFEST_FILE_NAME);
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_config_from_yaml_unknown_source_fails() {
        let yaml = "search:\n  - source: registry\n    key: X\n";
        assert_error_contains(LoaderConfig::from_yaml(yaml), "Failed to parse config");
    }

    #[test]
    #[serial]
    fn test_load_missing_file_uses_defaults() {
        clear_env();
        let dir = temp_dir();
        let config = LoaderConfig::load(dir.path().join("missing.yaml")).unwrap();
        assert_eq!(config, LoaderConfig::default());
    }

    #[test]
    #[serial]
    fn test_load_reads_file() {
        clear_env();
        let dir = temp_dir();
        let path = dir.path().join("loader.yaml");
        std::fs::write(&path, "manifest_file_name: creds.json\n").unwrap();

        let config = LoaderConfig::load(&path).unwrap();
        assert_eq!(config.manifest_file_name, "creds.json");
    }

    #[test]
    #[serial]
    fn test_load_invalid_file_fails() {
        clear_env();
        let dir = temp_dir();
        let path = dir.path().join("loader.yaml");
        std::fs::write(&path, "search: [unterminated").unwrap();

        assert_error_contains(LoaderConfig::load(&path), "Failed to parse config");
    }

    #[test]
    #[serial]
    fn test_apply_env_vars_overrides() {
        clear_env();
        env::set_var("SOLACE_LOADER_LOG_LEVEL", "DEBUG");
        env::set_var("SOLACE_LOADER_JSON_LOGS", "true");
        env::set_var("SOLACE_LOADER_LOG_FILE", "/tmp/solace-loader.log");
        env::set_var("SOLACE_LOADER_MANIFEST_FILE", "override.json");

        let mut config = LoaderConfig::default();
        config.apply_env_vars();

        assert_eq!(config.logging.level, "debug");
        assert!(config.logging.json_format);
        assert_eq!(
            config.logging.file_path,
            Some(PathBuf::from("/tmp/solace-loader.log"))
        );
        assert_eq!(config.manifest_file_name, "override.json");

        clear_env();
    }

    #[test]
    #[serial]
    fn test_apply_env_vars_ignores_invalid_values() {
        clear_env();
        env::set_var("SOLACE_LOADER_LOG_LEVEL", "chatty");
        env::set_var("SOLACE_LOADER_JSON_LOGS", "maybe");

        let mut config = LoaderConfig::default();
        config.apply_env_vars();

        assert_eq!(config.logging.level, "info");
        assert!(!config.logging.json_format);

        clear_env();
    }
}
