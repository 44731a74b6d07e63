//! Server configuration: defaults, TOML file, validation

use crate::logging::LoggingConfig;
use lab_common::SecurityLevel;
use lab_engine::PingConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_HTTP_PORT: u16 = 4280;
pub const DEFAULT_CONTENT_ROOT: &str = "./content";

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Top-level configuration for the lab server
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LabConfig {
    pub bind_address: String,
    pub http_port: u16,
    /// Directory holding `vulnerabilities/<id>/{help,source}`
    pub content_root: PathBuf,
    /// Level used when a request carries no `security` parameter
    pub default_security: SecurityLevel,
    pub default_locale: String,
    /// syntect theme for source listings
    pub highlight_theme: String,
    pub ping: PingConfig,
    pub logging: LoggingConfig,
}

impl Default for LabConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1".to_string(),
            http_port: DEFAULT_HTTP_PORT,
            content_root: PathBuf::from(DEFAULT_CONTENT_ROOT),
            default_security: SecurityLevel::default(),
            default_locale: lab_engine::disclosure::DEFAULT_LOCALE.to_string(),
            highlight_theme: lab_engine::highlight::DEFAULT_THEME.to_string(),
            ping: PingConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl LabConfig {
    /// Load from a TOML file; missing keys keep their defaults
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(raw)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.http_port == 0 {
            return Err(ConfigError::Invalid("http_port must be non-zero".to_string()));
        }
        if self.ping.count == 0 {
            return Err(ConfigError::Invalid("ping.count must be at least 1".to_string()));
        }
        if self.ping.timeout_secs == 0 {
            return Err(ConfigError::Invalid("ping.timeout_secs must be at least 1".to_string()));
        }
        if self.ping.program.trim().is_empty() {
            return Err(ConfigError::Invalid("ping.program must not be empty".to_string()));
        }
        if self.default_locale.is_empty() {
            return Err(ConfigError::Invalid("default_locale must not be empty".to_string()));
        }
        if !crate::logging::levels::is_valid_level(&self.logging.level) {
            return Err(ConfigError::Invalid(format!(
                "unknown log level '{}', expected one of {:?}",
                self.logging.level,
                crate::logging::levels::valid_levels()
            )));
        }
        Ok(())
    }

    /// `bind_address:http_port`
    pub fn listen_address(&self) -> String {
        format!("{}:{}", self.bind_address, self.http_port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = LabConfig::default();
        assert_eq!(config.http_port, 4280);
        assert_eq!(config.content_root, PathBuf::from("./content"));
        assert_eq!(config.default_security, SecurityLevel::Low);
        assert_eq!(config.default_locale, "en");
        assert_eq!(config.ping.count, 4);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = LabConfig::from_toml_str(
            r#"
            http_port = 8080
            default_security = "high"

            [ping]
            program = "/usr/bin/ping"
            count = 2
            timeout_secs = 10
            "#,
        )
        .unwrap();

        assert_eq!(config.http_port, 8080);
        assert_eq!(config.default_security, SecurityLevel::High);
        assert_eq!(config.ping.program, "/usr/bin/ping");
        assert_eq!(config.bind_address, "127.0.0.1");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_unknown_level_in_toml_is_parse_error() {
        assert!(LabConfig::from_toml_str("default_security = \"extreme\"").is_err());
    }

    #[test]
    fn test_validation_rejects_zero_values() {
        let mut config = LabConfig::default();
        config.http_port = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = LabConfig::default();
        config.ping.count = 0;
        assert!(config.validate().is_err());

        let mut config = LabConfig::default();
        config.ping.timeout_secs = 0;
        assert!(config.validate().is_err());

        let mut config = LabConfig::default();
        config.logging.level = "loud".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_example_config_parses() {
        let config = LabConfig::from_toml_str(include_str!("../../vulnlab.example.toml")).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.logging.module_levels.len(), 3);
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vulnlab.toml");
        std::fs::write(&path, "bind_address = \"0.0.0.0\"\n").unwrap();

        let config = LabConfig::from_file(&path).unwrap();
        assert_eq!(config.listen_address(), "0.0.0.0:4280");

        let missing = LabConfig::from_file(&dir.path().join("missing.toml"));
        assert!(matches!(missing, Err(ConfigError::Read { .. })));
    }
}
