// --- File: crates/flexwin_config/src/models.rs ---

use serde::{Deserialize, Serialize};

/// Production host of the Flexwin gateway.
pub const DEFAULT_BASE_URL: &str = "https://payment.architrade.com";

/// Default timeout applied by the HTTP transport, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

// --- Flexwin Config ---
// Holds the merchant settings shared by every gateway call.
// Secrets may be given as "secret_from_env" and are then read from
// FLEXWIN_SECRET_FLEXWIN_<KEY> or FLEXWIN_<KEY>.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct FlexwinConfig {
    #[serde(default)]
    pub test_mode: bool,
    #[serde(default)]
    pub merchant: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub md5_key1: Option<String>,
    #[serde(default)]
    pub md5_key2: Option<String>,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for FlexwinConfig {
    fn default() -> Self {
        Self {
            test_mode: false,
            merchant: None,
            username: None,
            password: None,
            md5_key1: None,
            md5_key2: None,
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl FlexwinConfig {
    /// Returns the checksum key pair when both halves are configured and non-empty.
    pub fn checksum_keys(&self) -> Option<(&str, &str)> {
        match (self.md5_key1.as_deref(), self.md5_key2.as_deref()) {
            (Some(k1), Some(k2)) if !k1.is_empty() && !k2.is_empty() => Some((k1, k2)),
            _ => None,
        }
    }
}

// --- Logging Config ---
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct LoggingConfig {
    /// Filter directive such as "info" or "debug".
    #[serde(default)]
    pub level: Option<String>,
}

// --- Unified App Configuration ---
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub flexwin: FlexwinConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_keys(k1: Option<&str>, k2: Option<&str>) -> FlexwinConfig {
        FlexwinConfig {
            md5_key1: k1.map(str::to_string),
            md5_key2: k2.map(str::to_string),
            ..FlexwinConfig::default()
        }
    }

    #[test]
    fn test_checksum_keys_require_both_halves() {
        assert_eq!(
            config_with_keys(Some("a"), Some("b")).checksum_keys(),
            Some(("a", "b"))
        );
        assert_eq!(config_with_keys(Some("a"), None).checksum_keys(), None);
        assert_eq!(config_with_keys(None, Some("b")).checksum_keys(), None);
        assert_eq!(config_with_keys(Some(""), Some("b")).checksum_keys(), None);
    }

    #[test]
    fn test_defaults_from_empty_json() {
        let config: AppConfig = serde_json::from_str("{}").unwrap();
        assert!(!config.flexwin.test_mode);
        assert_eq!(config.flexwin.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.flexwin.timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert!(config.logging.level.is_none());
    }
}
