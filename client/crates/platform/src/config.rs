//! Client Configuration
//!
//! Where the remote service lives and how the transport talks to it.

use std::time::Duration;

use thiserror::Error;

use crate::http::normalize_base_url;

/// Service URL used when nothing else is configured
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";

/// Environment variable overriding the service URL
pub const API_URL_ENV: &str = "POKECOLLECT_API_URL";

/// Environment variable setting a request timeout in seconds
pub const TIMEOUT_ENV: &str = "POKECOLLECT_TIMEOUT_SECS";

/// Configuration loading errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Service URL cannot be empty")]
    EmptyApiUrl,

    #[error("Invalid timeout '{value}': expected a positive number of seconds")]
    InvalidTimeout { value: String },
}

/// Remote service client configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Normalized base URL (scheme present, no trailing slash)
    pub api_url: String,
    /// Per-request timeout; `None` keeps the transport default (no timeout)
    pub request_timeout: Option<Duration>,
    /// User-Agent header sent with every request
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            request_timeout: None,
            user_agent: format!("pokecollect/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ClientConfig {
    /// Create config for a given service URL
    pub fn new(api_url: impl AsRef<str>) -> Result<Self, ConfigError> {
        let raw = api_url.as_ref().trim();
        if raw.is_empty() {
            return Err(ConfigError::EmptyApiUrl);
        }
        Ok(Self {
            api_url: normalize_base_url(raw),
            ..Default::default()
        })
    }

    /// Create config for development (local service, bounded waits)
    pub fn development() -> Self {
        Self {
            request_timeout: Some(Duration::from_secs(30)),
            ..Default::default()
        }
    }

    /// Load from process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary key lookup
    ///
    /// Unset keys fall back to [`ClientConfig::default`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match lookup(API_URL_ENV) {
            Some(url) => Self::new(url)?,
            None => Self::default(),
        };

        if let Some(raw) = lookup(TIMEOUT_ENV) {
            config.request_timeout = Some(parse_timeout(&raw)?);
        }

        Ok(config)
    }

    /// Override the service URL
    pub fn with_api_url(mut self, api_url: impl AsRef<str>) -> Result<Self, ConfigError> {
        let raw = api_url.as_ref().trim();
        if raw.is_empty() {
            return Err(ConfigError::EmptyApiUrl);
        }
        self.api_url = normalize_base_url(raw);
        Ok(self)
    }

    /// Override the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Get request timeout in milliseconds (for logging)
    pub fn timeout_ms(&self) -> Option<u64> {
        self.request_timeout.map(|t| t.as_millis() as u64)
    }
}

fn parse_timeout(raw: &str) -> Result<Duration, ConfigError> {
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(ConfigError::InvalidTimeout {
            value: raw.to_string(),
        }),
    }
}
