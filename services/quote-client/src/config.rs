//! Client configuration
//!
//! Defaults, overridden by environment variables or a YAML file. Every
//! loader validates the result before handing it back.

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use types::errors::ConfigError;

pub const DEFAULT_QUOTE_URL: &str = "wss://openapi-quote.longportapp.com/v2";
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_LOG_LEVEL: &str = "info";

pub const ENV_QUOTE_URL: &str = "LONGBRIDGE_QUOTE_URL";
pub const ENV_TIMEOUT: &str = "LONGBRIDGE_TIMEOUT";
pub const ENV_LOG_LEVEL: &str = "LONGBRIDGE_LOG_LEVEL";

const LOG_LEVELS: [&str; 6] = ["trace", "debug", "info", "warn", "error", "off"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteConfig {
    /// Quote endpoint, handed to the transport that owns the connection.
    pub quote_url: String,
    /// Bound on every request/response call.
    pub request_timeout: Duration,
    pub log_level: String,
}

impl Default for QuoteConfig {
    fn default() -> Self {
        Self {
            quote_url: DEFAULT_QUOTE_URL.to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

/// Partial config as read from YAML. Absent keys keep their defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct QuoteConfigPatch {
    pub quote_url: Option<String>,
    /// Seconds.
    pub request_timeout: Option<u64>,
    pub log_level: Option<String>,
}

impl QuoteConfig {
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn apply_patch(mut self, patch: QuoteConfigPatch) -> Self {
        if let Some(v) = patch.quote_url {
            self.quote_url = v;
        }
        if let Some(v) = patch.request_timeout {
            self.request_timeout = Duration::from_secs(v);
        }
        if let Some(v) = patch.log_level {
            self.log_level = v;
        }
        self
    }

    /// Load from `LONGBRIDGE_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using `lookup` in place of the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut patch = QuoteConfigPatch {
            quote_url: lookup(ENV_QUOTE_URL),
            log_level: lookup(ENV_LOG_LEVEL),
            ..Default::default()
        };
        if let Some(raw) = lookup(ENV_TIMEOUT) {
            let secs = raw.trim().parse::<u64>().map_err(|e| ConfigError::InvalidValue {
                key: ENV_TIMEOUT.to_string(),
                value: raw.clone(),
                reason: e.to_string(),
            })?;
            patch.request_timeout = Some(secs);
        }

        let config = Self::default().apply_patch(patch);
        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let patch: QuoteConfigPatch = serde_yaml::from_str(yaml).map_err(|e| ConfigError::Parse {
            reason: e.to_string(),
        })?;
        let config = Self::default().apply_patch(patch);
        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::from_yaml_str(&raw)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.quote_url.trim().is_empty() {
            return Err(ConfigError::MissingValue {
                key: "quote_url".to_string(),
            });
        }
        if self.request_timeout.is_zero() {
            return Err(ConfigError::InvalidValue {
                key: "request_timeout".to_string(),
                value: "0".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }
        if !LOG_LEVELS.contains(&self.log_level.to_ascii_lowercase().as_str()) {
            return Err(ConfigError::InvalidValue {
                key: "log_level".to_string(),
                value: self.log_level.clone(),
                reason: format!("expected one of {}", LOG_LEVELS.join(", ")),
            });
        }
        Ok(())
    }
}
