//! Runtime configuration for the backend API client and proxy.

use std::env;
use std::time::Duration;

use log::debug;

use crate::cache::{DEFAULT_CAPACITY, DEFAULT_TTL};
use crate::http::RetryPolicy;

/// Production backend, used when no override is configured.
pub const DEFAULT_API_URL: &str = "https://api.meridian-instruments.com/api/v1";

/// Environment variable that overrides the backend base URL.
pub const API_URL_ENV: &str = "PHARMGATE_API_URL";

/// Deadline for strict reads and for writes.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Shorter deadline for decorative reads that degrade to empty content.
pub const DECORATIVE_TIMEOUT: Duration = Duration::from_secs(10);

/// Settings shared by the API client and the proxy.
#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: String,
    pub timeout: Duration,
    pub decorative_timeout: Duration,
    pub cache_ttl: Duration,
    pub cache_capacity: usize,
    pub retry: RetryPolicy,
}

impl Config {
    /// Configuration pointing at `base_url` with default limits.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: DEFAULT_TIMEOUT,
            decorative_timeout: DECORATIVE_TIMEOUT,
            cache_ttl: DEFAULT_TTL,
            cache_capacity: DEFAULT_CAPACITY,
            retry: RetryPolicy::default(),
        }
    }

    /// Reads the base URL from `PHARMGATE_API_URL`, falling back to the
    /// production backend.
    pub fn from_env() -> Self {
        let base_url = match env::var(API_URL_ENV) {
            Ok(url) if !url.trim().is_empty() => {
                debug!("Using backend URL from {}: {}", API_URL_ENV, url);
                url
            }
            _ => DEFAULT_API_URL.to_string(),
        };

        Self::new(base_url)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_cache_limits(mut self, ttl: Duration, capacity: usize) -> Self {
        self.cache_ttl = ttl;
        self.cache_capacity = capacity;
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}
