//! Dashboard settings

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use url::Url;

use crate::errors::DashboardError;
use crate::logs::LogLevel;

/// Overrides `api.base_url` when set
pub const ENV_API_BASE_URL: &str = "SHIPIT_API_BASE_URL";

/// Overrides `log_level` when set
pub const ENV_LOG_LEVEL: &str = "SHIPIT_LOG_LEVEL";

/// Dashboard settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,

    /// Emit logs as JSON lines
    #[serde(default)]
    pub json_logs: bool,

    /// Releases API configuration
    #[serde(default)]
    pub api: ApiSettings,

    /// Keep fetched resources per release for the whole session
    #[serde(default)]
    pub cache_resources: bool,

    /// Releases whose resources the session cache holds
    #[serde(default = "default_cache_capacity")]
    pub resource_cache_capacity: usize,
}

fn default_cache_capacity() -> usize {
    64
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_level: LogLevel::Info,
            json_logs: false,
            api: ApiSettings::default(),
            cache_resources: false,
            resource_cache_capacity: default_cache_capacity(),
        }
    }
}

impl Settings {
    /// Parse settings from a JSON document; absent fields take their defaults
    pub fn from_json(contents: &str) -> Result<Self, DashboardError> {
        let settings: Settings = serde_json::from_str(contents)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Apply `SHIPIT_*` environment overrides
    pub fn with_env_overrides(self) -> Result<Self, DashboardError> {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary lookup, e.g. a map in tests
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self, DashboardError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(base_url) = lookup(ENV_API_BASE_URL) {
            debug!("Overriding API base URL from {}", ENV_API_BASE_URL);
            self.api.base_url = base_url;
        }

        if let Some(level) = lookup(ENV_LOG_LEVEL) {
            match level.parse() {
                Ok(level) => self.log_level = level,
                Err(e) => warn!("Ignoring {}: {}", ENV_LOG_LEVEL, e),
            }
        }

        self.validate()?;
        Ok(self)
    }

    /// Check that the base URL is an absolute http(s) address
    pub fn validate(&self) -> Result<(), DashboardError> {
        let url = Url::parse(&self.api.base_url)?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(DashboardError::ConfigError(format!(
                "Unsupported API scheme: {}",
                url.scheme()
            )));
        }
        if self.api.timeout_secs == 0 {
            return Err(DashboardError::ConfigError(
                "API timeout must be at least one second".to_string(),
            ));
        }
        Ok(())
    }
}

/// Releases API settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiSettings {
    /// Base URL; releases live at `{base_url}/releases`
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:8080/api".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ApiSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
