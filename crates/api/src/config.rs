//! API endpoint configuration.
//!
//! Read from the environment:
//!
//! - `SHOPFRONT_API_ORIGIN`: server origin (default `http://localhost:3000`);
//!   the API lives under `/api/weblarek` and images under `/content/weblarek`
//! - `SHOPFRONT_API_URL`, `SHOPFRONT_CDN_URL`: override either full URL
//! - `SHOPFRONT_HTTP_TIMEOUT_SECS`: request timeout (default 10)

use std::time::Duration;

use thiserror::Error;

pub const DEFAULT_ORIGIN: &str = "http://localhost:3000";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

const API_PATH: &str = "/api/weblarek";
const CDN_PATH: &str = "/content/weblarek";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("SHOPFRONT_HTTP_TIMEOUT_SECS must be a positive integer, got {0:?}")]
    InvalidTimeout(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Base URL of the JSON API (no trailing slash).
    pub api_url: String,
    /// Base URL product image paths are resolved against.
    pub cdn_url: String,
    pub timeout: Duration,
}

impl ApiConfig {
    /// Endpoints derived from a server origin.
    pub fn new(origin: &str) -> Self {
        let origin = origin.trim_end_matches('/');
        Self {
            api_url: format!("{origin}{API_PATH}"),
            cdn_url: format!("{origin}{CDN_PATH}"),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ApiConfig::from_env`] with an explicit variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let origin = lookup("SHOPFRONT_API_ORIGIN").unwrap_or_else(|| DEFAULT_ORIGIN.to_string());
        let mut config = Self::new(&origin);

        if let Some(api_url) = lookup("SHOPFRONT_API_URL") {
            config.api_url = api_url.trim_end_matches('/').to_string();
        }
        if let Some(cdn_url) = lookup("SHOPFRONT_CDN_URL") {
            config.cdn_url = cdn_url.trim_end_matches('/').to_string();
        }
        if let Some(raw) = lookup("SHOPFRONT_HTTP_TIMEOUT_SECS") {
            let secs: u64 = raw
                .trim()
                .parse()
                .ok()
                .filter(|s| *s > 0)
                .ok_or_else(|| ConfigError::InvalidTimeout(raw.clone()))?;
            config.timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new(DEFAULT_ORIGIN)
    }
}
