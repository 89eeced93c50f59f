//! Typed facade over the backend REST API.
//!
//! Strict reads go through the response cache and the retry policy.
//! Decorative reads degrade to empty content instead of failing. Writes
//! bypass the cache and are never retried.

mod careers;
mod company;
mod content;
mod leads;
mod products;
mod types;

pub use types::*;

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use log::warn;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::cache::{ResponseCache, cache_key};
use crate::config::Config;
use crate::http::{ApiError, HttpClient};

/// A successfully fetched value and whether it was served from the cache.
#[derive(Debug, Clone, PartialEq)]
pub struct Fetched<T> {
    pub data: T,
    pub from_cache: bool,
}

/// A decorative read that degrades to its default instead of failing.
/// The captured failure, if any, ends up in `error`.
#[derive(Debug, Clone, PartialEq)]
pub struct BestEffort<T> {
    pub data: T,
    pub from_cache: bool,
    pub error: Option<String>,
}

/// Client for the backend API, grouped into per-resource methods.
pub struct ApiClient {
    http: HttpClient,
    cache: Arc<ResponseCache>,
    decorative_timeout: Duration,
}

impl ApiClient {
    /// Builds a client with its own private cache.
    pub fn new(config: &Config) -> Result<Self> {
        let cache = Arc::new(ResponseCache::with_limits(
            config.cache_ttl,
            config.cache_capacity,
        ));
        Self::with_cache(config, cache)
    }

    /// Builds a client around a shared cache, so several clients (or a
    /// test) can observe and invalidate the same entries.
    pub fn with_cache(config: &Config, cache: Arc<ResponseCache>) -> Result<Self> {
        let http = HttpClient::new(&config.base_url, config.timeout, config.retry)?;
        Ok(Self {
            http,
            cache,
            decorative_timeout: config.decorative_timeout,
        })
    }

    pub fn cache(&self) -> &ResponseCache {
        &self.cache
    }

    /// Drops cached entries whose key contains `pattern`, or everything
    /// when no pattern is given.
    pub fn invalidate(&self, pattern: Option<&str>) {
        self.cache.clear(pattern);
    }

    /// Rejects an empty identifier before any network traffic happens.
    fn require_identifier(resource: &'static str, identifier: &str) -> Result<()> {
        if identifier.trim().is_empty() {
            return Err(ApiError::Validation(format!(
                "{} identifier must not be empty",
                resource
            ))
            .into());
        }
        Ok(())
    }

    /// Strict cached read. A fresh cache entry short-circuits the network;
    /// a miss performs a retry-wrapped GET and stores the raw payload only
    /// after it decoded successfully.
    async fn fetch_cached<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
        timeout_override: Option<Duration>,
    ) -> Result<Fetched<T>> {
        let key = cache_key(path, query);

        if let Some(payload) = self.cache.get(&key) {
            let data = serde_json::from_value(payload)
                .context("Cached payload no longer matches the expected shape")?;
            return Ok(Fetched {
                data,
                from_cache: true,
            });
        }

        let payload: Value = self.http.get_json(path, query, timeout_override).await?;
        let data = serde_json::from_value(payload.clone())
            .context("Failed to decode response from backend")?;
        self.cache.insert(key, payload);

        Ok(Fetched {
            data,
            from_cache: false,
        })
    }

    /// Fallback-tolerant read for decorative page content. Every failure
    /// class is swallowed into the `error` field and the default payload
    /// served instead, under the shorter decorative timeout.
    async fn fetch_cached_or_default<T>(&self, path: &str, query: &[(&str, &str)]) -> BestEffort<T>
    where
        T: DeserializeOwned + Default,
    {
        match self
            .fetch_cached(path, query, Some(self.decorative_timeout))
            .await
        {
            Ok(Fetched { data, from_cache }) => BestEffort {
                data,
                from_cache,
                error: None,
            },
            Err(e) => {
                warn!(
                    "Decorative read of {} failed, serving empty content: {}",
                    path, e
                );
                BestEffort {
                    data: T::default(),
                    from_cache: false,
                    error: Some(e.to_string()),
                }
            }
        }
    }
}
