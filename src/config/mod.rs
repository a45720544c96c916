//! Configuration module for serverdeck
//!
//! Provides layered configuration loading from files, environment variables, and defaults.
//!
//! # Configuration Precedence
//!
//! 1. CLI arguments (highest priority)
//! 2. Environment variables (`SERVERDECK_*`)
//! 3. Configuration file (TOML)
//! 4. Default values (lowest priority)
//!
//! # Example
//!
//! ```rust
//! use serverdeck::config::ServerdeckConfig;
//!
//! // Load defaults
//! let config = ServerdeckConfig::default();
//! assert_eq!(config.api.base_url, "http://localhost:8080");
//!
//! // Parse from TOML
//! let toml = r#"
//! [api]
//! base_url = "http://registry.lan:9000"
//! "#;
//! let config: ServerdeckConfig = toml::from_str(toml).unwrap();
//! assert_eq!(config.api.base_url, "http://registry.lan:9000");
//! ```

pub mod api;
pub mod error;
pub mod logging;
pub mod refresh;

pub use api::ApiConfig;
pub use error::ConfigError;
pub use logging::{LogFormat, LoggingConfig};
pub use refresh::RefreshConfig;

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Unified configuration for the serverdeck client.
///
/// Aggregates the registry API connection, background refresh, and
/// logging sections.
///
/// # Example
///
/// ```rust
/// use serverdeck::config::ServerdeckConfig;
///
/// let config = ServerdeckConfig::default();
/// assert_eq!(config.api.timeout_seconds, 10);
/// assert!(config.refresh.enabled);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ServerdeckConfig {
    /// Registry API connection settings
    pub api: ApiConfig,
    /// Background refresh configuration
    pub refresh: RefreshConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

impl ServerdeckConfig {
    /// Load configuration from a TOML file
    ///
    /// If path is None, returns default configuration.
    /// If path doesn't exist, returns NotFound error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => {
                if !p.exists() {
                    return Err(ConfigError::NotFound(p.to_path_buf()));
                }
                let content = std::fs::read_to_string(p)?;
                toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
            }
            None => Ok(Self::default()),
        }
    }

    /// Apply environment variable overrides
    ///
    /// Supports SERVERDECK_* environment variables for common settings.
    /// Invalid values are silently ignored (defaults are kept).
    pub fn with_env_overrides(mut self) -> Self {
        // API settings
        if let Ok(url) = std::env::var("SERVERDECK_API_URL") {
            self.api.base_url = url;
        }
        if let Ok(timeout) = std::env::var("SERVERDECK_API_TIMEOUT") {
            if let Ok(t) = timeout.parse() {
                self.api.timeout_seconds = t;
            }
        }

        // Logging settings
        if let Ok(level) = std::env::var("SERVERDECK_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("SERVERDECK_LOG_FORMAT") {
            if let Ok(f) = format.parse() {
                self.logging.format = f;
            }
        }

        // Background refresh
        if let Ok(refresh) = std::env::var("SERVERDECK_REFRESH") {
            self.refresh.enabled = refresh.to_lowercase() == "true";
        }

        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api.base_url.is_empty() {
            return Err(ConfigError::Validation {
                field: "api.base_url".to_string(),
                message: "base URL cannot be empty".to_string(),
            });
        }
        if self.api.timeout_seconds == 0 {
            return Err(ConfigError::Validation {
                field: "api.timeout_seconds".to_string(),
                message: "timeout must be non-zero".to_string(),
            });
        }
        if self.refresh.enabled && self.refresh.interval_seconds == 0 {
            return Err(ConfigError::Validation {
                field: "refresh.interval_seconds".to_string(),
                message: "interval must be non-zero when refresh is enabled".to_string(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_serverdeck_config_defaults() {
        let config = ServerdeckConfig::default();
        assert_eq!(config.api.base_url, "http://localhost:8080");
        assert_eq!(config.api.timeout_seconds, 10);
        assert!(config.refresh.enabled);
        assert_eq!(config.refresh.interval_seconds, 30);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_config_parse_minimal_toml() {
        let toml = r#"
        [api]
        base_url = "http://registry.lan:9000"
        "#;

        let config: ServerdeckConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.api.base_url, "http://registry.lan:9000");
        assert_eq!(config.api.timeout_seconds, 10); // Default
    }

    #[test]
    fn test_config_parse_full_toml() {
        let toml = include_str!("../../serverdeck.example.toml");
        let config: ServerdeckConfig = toml::from_str(toml).unwrap();
        assert!(!config.api.base_url.is_empty());
        assert!(config.refresh.interval_seconds > 0);
    }

    #[test]
    fn test_config_load_from_file() {
        let temp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(temp.path(), "[api]\ntimeout_seconds = 5").unwrap();

        let config = ServerdeckConfig::load(Some(temp.path())).unwrap();
        assert_eq!(config.api.timeout_seconds, 5);
    }

    #[test]
    fn test_config_missing_file_error() {
        let result = ServerdeckConfig::load(Some(Path::new("/nonexistent/config.toml")));
        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_config_invalid_toml_error() {
        let temp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(temp.path(), "not valid toml [").unwrap();

        let result = ServerdeckConfig::load(Some(temp.path()));
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_config_env_override_api_url() {
        std::env::set_var("SERVERDECK_API_URL", "http://10.1.1.1:8080");
        let config = ServerdeckConfig::default().with_env_overrides();
        std::env::remove_var("SERVERDECK_API_URL");

        assert_eq!(config.api.base_url, "http://10.1.1.1:8080");
    }

    #[test]
    fn test_config_env_override_timeout() {
        std::env::set_var("SERVERDECK_API_TIMEOUT", "30");
        let config = ServerdeckConfig::default().with_env_overrides();
        assert_eq!(config.api.timeout_seconds, 30);

        // Invalid values keep the default
        std::env::set_var("SERVERDECK_API_TIMEOUT", "not-a-number");
        let config = ServerdeckConfig::default().with_env_overrides();
        std::env::remove_var("SERVERDECK_API_TIMEOUT");
        assert_eq!(config.api.timeout_seconds, 10);
    }

    #[test]
    fn test_config_env_override_log_level() {
        std::env::set_var("SERVERDECK_LOG_LEVEL", "debug");
        let config = ServerdeckConfig::default().with_env_overrides();
        std::env::remove_var("SERVERDECK_LOG_LEVEL");

        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_config_env_override_log_format() {
        std::env::set_var("SERVERDECK_LOG_FORMAT", "json");
        let config = ServerdeckConfig::default().with_env_overrides();
        assert_eq!(config.logging.format, LogFormat::Json);

        // Invalid format keeps default
        std::env::set_var("SERVERDECK_LOG_FORMAT", "xml");
        let config = ServerdeckConfig::default().with_env_overrides();
        std::env::remove_var("SERVERDECK_LOG_FORMAT");
        assert_eq!(config.logging.format, LogFormat::Pretty);
    }

    #[test]
    fn test_config_env_override_refresh() {
        std::env::set_var("SERVERDECK_REFRESH", "false");
        let config = ServerdeckConfig::default().with_env_overrides();
        std::env::remove_var("SERVERDECK_REFRESH");

        assert!(!config.refresh.enabled);
    }

    #[test]
    fn test_config_validation_empty_base_url() {
        let mut config = ServerdeckConfig::default();
        config.api.base_url = String::new();

        let result = config.validate();
        assert!(matches!(
            result,
            Err(ConfigError::Validation { ref field, .. }) if field == "api.base_url"
        ));
    }

    #[test]
    fn test_config_validation_zero_timeout() {
        let mut config = ServerdeckConfig::default();
        config.api.timeout_seconds = 0;

        let result = config.validate();
        assert!(matches!(
            result,
            Err(ConfigError::Validation { ref field, .. }) if field == "api.timeout_seconds"
        ));
    }

    #[test]
    fn test_config_validation_zero_refresh_interval() {
        let mut config = ServerdeckConfig::default();
        config.refresh.interval_seconds = 0;

        let result = config.validate();
        assert!(matches!(
            result,
            Err(ConfigError::Validation { ref field, .. }) if field == "refresh.interval_seconds"
        ));

        // A zero interval is fine while refresh is disabled
        config.refresh.enabled = false;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_load_none_returns_defaults() {
        let config = ServerdeckConfig::load(None).unwrap();
        assert_eq!(config.api.base_url, "http://localhost:8080");
        assert!(config.validate().is_ok());
    }
}
