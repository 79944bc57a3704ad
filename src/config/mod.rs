#[cfg(feature = "cli")]
pub mod cli;

use crate::adapters::settings_store::DEFAULT_SETTINGS_KEY;
use crate::utils::error::{CarrierConfigError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_path, validate_range, validate_storage_key, validate_url,
    Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const SANDBOX_URL: &str = "https://ct.soa-gw.canadapost.ca";
pub const PRODUCTION_URL: &str = "https://soa-gw.canadapost.ca";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 10;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub carrier: CarrierConfig,
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarrierConfig {
    pub sandbox_url: String,
    pub production_url: String,
    pub timeout_seconds: u64,
    pub origin_country: Option<String>,
}

impl Default for CarrierConfig {
    fn default() -> Self {
        Self {
            sandbox_url: SANDBOX_URL.to_string(),
            production_url: PRODUCTION_URL.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            origin_country: None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageKind {
    #[default]
    File,
    Memory,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: StorageKind,
    pub path: String,
    pub settings_key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageKind::File,
            path: "./settings".to_string(),
            settings_key: DEFAULT_SETTINGS_KEY.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub format: LogFormat,
}

impl AppConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(CarrierConfigError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| CarrierConfigError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unknown variables are left as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| CarrierConfigError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        validate_url("carrier.sandbox_url", &self.carrier.sandbox_url)?;
        validate_url("carrier.production_url", &self.carrier.production_url)?;
        validate_range("carrier.timeout_seconds", self.carrier.timeout_seconds, 1, 120)?;

        if let Some(country) = &self.carrier.origin_country {
            validate_non_empty_string("carrier.origin_country", country)?;
            if country.len() != 2 || !country.chars().all(|c| c.is_ascii_uppercase()) {
                return Err(CarrierConfigError::InvalidConfigValueError {
                    field: "carrier.origin_country".to_string(),
                    value: country.clone(),
                    reason: "Expected a two-letter ISO country code such as CA".to_string(),
                });
            }
        }

        if self.storage.backend == StorageKind::File {
            validate_path("storage.path", &self.storage.path)?;
        }
        validate_storage_key("storage.settings_key", &self.storage.settings_key)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.carrier.sandbox_url, SANDBOX_URL);
        assert_eq!(config.carrier.production_url, PRODUCTION_URL);
        assert_eq!(config.storage.settings_key, DEFAULT_SETTINGS_KEY);
        assert_eq!(config.logging.format, LogFormat::Compact);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = AppConfig::from_toml_str(
            r#"
[carrier]
timeout_seconds = 5
origin_country = "CA"

[storage]
backend = "memory"
"#,
        )
        .unwrap();

        assert_eq!(config.carrier.timeout_seconds, 5);
        assert_eq!(config.carrier.origin_country.as_deref(), Some("CA"));
        assert_eq!(config.carrier.sandbox_url, SANDBOX_URL);
        assert_eq!(config.storage.backend, StorageKind::Memory);
        assert_eq!(config.storage.path, "./settings");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_substitution() {
        std::env::set_var("CARRIER_CONFIG_TEST_SETTINGS_DIR", "/var/lib/carrier");
        let config = AppConfig::from_toml_str(
            r#"
[storage]
path = "${CARRIER_CONFIG_TEST_SETTINGS_DIR}/settings"
settings_key = "${CARRIER_CONFIG_TEST_UNSET_VARIABLE}"
"#,
        )
        .unwrap();

        assert_eq!(config.storage.path, "/var/lib/carrier/settings");
        assert_eq!(
            config.storage.settings_key,
            "${CARRIER_CONFIG_TEST_UNSET_VARIABLE}"
        );
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let mut config = AppConfig::default();
        config.carrier.production_url = "ftp://soa-gw.canadapost.ca".to_string();
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.carrier.timeout_seconds = 0;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.carrier.origin_country = Some("Canada".to_string());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_config_file_carries_recovery_suggestion() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let err = AppConfig::from_file(temp_dir.path().join("absent.toml")).unwrap_err();

        assert!(matches!(err, CarrierConfigError::IoError(_)));
        assert!(err.user_friendly_message().starts_with("File access failed"));
        assert_eq!(err.recovery_suggestion(), "Check file paths and permissions");
    }

    #[test]
    fn test_malformed_toml_is_config_error() {
        let err = AppConfig::from_toml_str("[carrier\nsandbox_url = 1").unwrap_err();
        assert!(matches!(err, CarrierConfigError::ConfigError { .. }));
    }
}
