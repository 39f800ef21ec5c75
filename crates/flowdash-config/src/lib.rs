//! Configuration management for flowdash
//!
//! This module handles loading, validation, and management of
//! flowdash configuration from YAML files.

pub mod error;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub use error::ConfigError;

// ==================== Configuration Types ====================

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ServerConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,
    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8081
}

/// Upstream backend configuration
///
/// One base URL serves both the HTTP endpoints (login/logout) and the
/// streaming transaction feed.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UpstreamConfig {
    /// Base URL of the backend API and feed
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_base_url() -> String {
    "http://localhost:4000".to_string()
}

/// Session gate configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SessionConfig {
    /// Shared secret used to verify the session token
    #[serde(default)]
    pub secret: String,
    /// Name of the cookie carrying the token
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
}

fn default_cookie_name() -> String {
    "token".to_string()
}

/// Transaction feed timing configuration
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FeedConfig {
    /// How long to wait for the initial snapshot before rendering empty
    #[serde(default = "default_startup_timeout_ms")]
    pub startup_timeout_ms: u64,
    /// Pause between receiving an incremental batch and applying it
    #[serde(default = "default_settle_delay_ms")]
    pub settle_delay_ms: u64,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            startup_timeout_ms: default_startup_timeout_ms(),
            settle_delay_ms: default_settle_delay_ms(),
        }
    }
}

fn default_startup_timeout_ms() -> u64 {
    5000
}

fn default_settle_delay_ms() -> u64 {
    100
}

/// Currency and number formatting
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrencyConfig {
    /// Display currency for the balance summary card
    #[serde(default = "default_currency")]
    pub code: String,
    /// Number of decimal places
    #[serde(default = "default_decimal_places")]
    pub decimal_places: u32,
}

impl Default for CurrencyConfig {
    fn default() -> Self {
        Self {
            code: "NGN".to_string(),
            decimal_places: 2,
        }
    }
}

fn default_currency() -> String {
    "NGN".to_string()
}

fn default_decimal_places() -> u32 {
    2
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LoggingConfig {
    /// Log level: debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Server settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Upstream backend settings
    #[serde(default)]
    pub upstream: UpstreamConfig,
    /// Session gate settings
    #[serde(default)]
    pub session: SessionConfig,
    /// Feed timing settings
    #[serde(default)]
    pub feed: FeedConfig,
    /// Currency settings
    #[serde(default)]
    pub currency: CurrencyConfig,
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a YAML file
    pub fn load(path: PathBuf) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(&path)
            .map_err(|_| ConfigError::IoError)?;

        let config: Config = serde_yaml::from_str(&content)
            .map_err(|_| ConfigError::InvalidYaml)?;

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::InvalidValue {
                field: "server.port".to_string(),
                reason: "Port must be greater than 0".to_string(),
            });
        }

        if self.upstream.base_url.is_empty() {
            return Err(ConfigError::MissingField {
                field: "upstream.base_url".to_string(),
            });
        }

        if self.session.secret.is_empty() {
            return Err(ConfigError::MissingField {
                field: "session.secret".to_string(),
            });
        }

        if self.currency.decimal_places > 10 {
            return Err(ConfigError::InvalidValue {
                field: "currency.decimal_places".to_string(),
                reason: "Decimal places must be between 0 and 10".to_string(),
            });
        }

        Ok(())
    }

    /// Generate a default configuration file
    pub fn generate_default() -> &'static str {
        include_str!("../templates/default_config.yaml")
    }

    /// Full URL of the upstream login endpoint
    pub fn login_url(&self) -> String {
        format!("{}/api/v1/users/login", self.upstream.base_url.trim_end_matches('/'))
    }

    /// Full URL of the upstream logout endpoint
    pub fn logout_url(&self) -> String {
        format!("{}/api/v1/users/logout", self.upstream.base_url.trim_end_matches('/'))
    }
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> Config {
        let mut config = Config::default();
        config.session.secret = "shh".to_string();
        config
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.server.port, 8081);
        assert_eq!(config.session.cookie_name, "token");
        assert_eq!(config.feed.startup_timeout_ms, 5000);
        assert_eq!(config.feed.settle_delay_ms, 100);
        assert_eq!(config.currency.code, "NGN");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_validate_requires_secret() {
        let config = Config::default();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::MissingField { .. })
        ));

        assert!(valid_config().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_port() {
        let mut config = valid_config();
        config.server.port = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_endpoint_urls_trim_trailing_slash() {
        let mut config = valid_config();
        config.upstream.base_url = "http://api.example.com/".to_string();
        assert_eq!(config.login_url(), "http://api.example.com/api/v1/users/login");
        assert_eq!(config.logout_url(), "http://api.example.com/api/v1/users/logout");
    }

    #[test]
    fn test_parse_partial_yaml() {
        let yaml = r#"
session:
  secret: "abc"
server:
  port: 9000
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.session.secret, "abc");
        assert!(config.validate().is_ok());
    }
}
