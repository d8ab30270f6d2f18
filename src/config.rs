//! Application configuration
//!
//! Loaded from a TOML file (default `~/.config/night-out-checkout/config.toml`).
//! Every section and key is optional; missing values fall back to defaults.
//!
//! ```toml
//! [server]
//! api_host = "0.0.0.0"
//! api_port = 8080
//!
//! [logging]
//! level = "info"
//! format = "json"
//!
//! [checkout]
//! layout = "single_page"
//! min_lead_days = 4
//! payment_delay_ms = 2000
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::application::{CheckoutRules, CheckoutSettings};
use crate::domain::checkout::Layout;
use crate::shared::errors::ConfigError;

/// Environment variable naming an alternative config file.
pub const CONFIG_ENV: &str = "CHECKOUT_CONFIG";

const APP_DIR: &str = "night-out-checkout";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub checkout: CheckoutConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub api_host: String,
    pub api_port: u16,
    /// Seconds to wait for in-flight work on shutdown
    pub shutdown_timeout: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            api_host: "0.0.0.0".to_string(),
            api_port: 8080,
            shutdown_timeout: 30,
        }
    }
}

impl ServerConfig {
    pub fn address(&self) -> String {
        format!("{}:{}", self.api_host, self.api_port)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, e.g. `info` or `night_out_checkout=debug`
    pub level: String,
    /// `pretty` or `json`
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckoutConfig {
    pub layout: Layout,
    pub min_lead_days: u32,
    pub group_size_min: u8,
    pub group_size_max: u8,
    pub max_interests: usize,
    /// How long the simulated gateway takes to approve
    pub payment_delay_ms: u64,
    /// Sessions idle longer than this are dropped
    pub session_ttl_secs: u64,
    pub sweep_interval_secs: u64,
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        let rules = CheckoutRules::default();
        Self {
            layout: Layout::default(),
            min_lead_days: rules.min_lead_days,
            group_size_min: rules.group_size_min,
            group_size_max: rules.group_size_max,
            max_interests: rules.max_interests,
            payment_delay_ms: 2000,
            session_ttl_secs: 3600,
            sweep_interval_secs: 60,
        }
    }
}

impl CheckoutConfig {
    pub fn rules(&self) -> CheckoutRules {
        CheckoutRules {
            min_lead_days: self.min_lead_days,
            group_size_min: self.group_size_min,
            group_size_max: self.group_size_max,
            max_interests: self.max_interests,
        }
    }

    pub fn settings(&self) -> CheckoutSettings {
        CheckoutSettings {
            layout: self.layout,
            rules: self.rules(),
        }
    }

    pub fn payment_delay(&self) -> Duration {
        Duration::from_millis(self.payment_delay_ms)
    }
}

impl AppConfig {
    /// Read and validate the config at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&raw)
    }

    pub fn from_toml(raw: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let c = &self.checkout;
        if c.group_size_min == 0 || c.group_size_min > c.group_size_max {
            return Err(ConfigError::Invalid(format!(
                "checkout.group_size_min ({}) must be between 1 and group_size_max ({})",
                c.group_size_min, c.group_size_max
            )));
        }
        if c.max_interests == 0 {
            return Err(ConfigError::Invalid(
                "checkout.max_interests must be at least 1".to_string(),
            ));
        }
        if c.sweep_interval_secs == 0 || c.session_ttl_secs == 0 {
            return Err(ConfigError::Invalid(
                "checkout.session_ttl_secs and sweep_interval_secs must be positive".to_string(),
            ));
        }
        match self.logging.format.to_lowercase().as_str() {
            "pretty" | "json" => Ok(()),
            other => Err(ConfigError::Invalid(format!(
                "logging.format must be 'pretty' or 'json', got '{other}'"
            ))),
        }
    }
}

/// `$CHECKOUT_CONFIG` if set, otherwise the platform config dir.
pub fn default_config_path() -> PathBuf {
    if let Ok(path) = std::env::var(CONFIG_ENV) {
        return PathBuf::from(path);
    }
    dirs_next::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
        .join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_yields_defaults() {
        let config = AppConfig::from_toml("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.checkout.min_lead_days, 4);
        assert_eq!(config.checkout.payment_delay(), Duration::from_millis(2000));
        assert_eq!(config.checkout.layout, Layout::Wizard);
    }

    #[test]
    fn partial_sections_merge_with_defaults() {
        let config = AppConfig::from_toml(
            r#"
            [server]
            api_port = 9090

            [checkout]
            layout = "single_page"
            group_size_max = 12
            "#,
        )
        .unwrap();
        assert_eq!(config.server.api_port, 9090);
        assert_eq!(config.server.api_host, "0.0.0.0");
        assert_eq!(config.checkout.layout, Layout::SinglePage);
        assert_eq!(config.checkout.rules().group_size_max, 12);
        assert_eq!(config.checkout.rules().group_size_min, 2);
    }

    #[test]
    fn inverted_group_range_is_rejected() {
        let err = AppConfig::from_toml("[checkout]\ngroup_size_min = 9\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn unknown_log_format_is_rejected() {
        let err = AppConfig::from_toml("[logging]\nformat = \"xml\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let err = AppConfig::from_toml("[server\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = AppConfig::load("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn default_path_ends_in_app_dir() {
        if std::env::var(CONFIG_ENV).is_err() {
            let path = default_config_path();
            assert!(path.ends_with("night-out-checkout/config.toml"));
        }
    }
}
