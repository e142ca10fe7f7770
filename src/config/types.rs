use crate::crawler::RetryPolicy;
use serde::Deserialize;
use std::time::Duration;

/// Main configuration structure for pho
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub gallery: GalleryConfig,
    pub retry: RetryConfig,
}

impl Config {
    /// The gallery base address, if one has been configured
    pub fn address(&self) -> Option<&str> {
        self.gallery.url.as_deref()
    }

    /// Per-request timeout for the HTTP client
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.gallery.timeout_secs)
    }

    /// Backoff policy applied to transport failures
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            initial_interval: Duration::from_millis(self.retry.initial_interval_ms),
            multiplier: self.retry.multiplier,
            max_interval: Duration::from_millis(self.retry.max_interval_ms),
        }
    }
}

/// Gallery server configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GalleryConfig {
    /// Base address of the gallery server (scheme, host and port)
    pub url: Option<String>,

    /// Server-side path under which all albums live
    #[serde(rename = "album-prefix")]
    pub album_prefix: String,

    /// Timeout for each HTTP request (seconds)
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            url: None,
            album_prefix: "/var/albums".to_string(),
            timeout_secs: 15,
        }
    }
}

/// Retry policy for transport failures
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    /// First wait after a failed attempt (milliseconds)
    #[serde(rename = "initial-interval-ms")]
    pub initial_interval_ms: u64,

    /// Growth factor applied to the wait after each failure
    pub multiplier: f64,

    /// Upper bound for a single wait (milliseconds)
    #[serde(rename = "max-interval-ms")]
    pub max_interval_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            initial_interval_ms: 500,
            multiplier: 1.5,
            max_interval_ms: 60_000,
        }
    }
}
