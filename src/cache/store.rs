//! In-memory TTL cache for backend API responses.

use std::time::{Duration, Instant};

use dashmap::DashMap;
use log::{debug, warn};
use serde_json::Value;

/// How long a cached response stays fresh.
pub const DEFAULT_TTL: Duration = Duration::from_secs(600);

/// Upper bound on resident entries.
pub const DEFAULT_CAPACITY: usize = 512;

/// A cached response body and the instant it was stored.
#[derive(Debug, Clone)]
struct CacheEntry {
    payload: Value,
    stored_at: Instant,
}

impl CacheEntry {
    fn new(payload: Value) -> Self {
        Self {
            payload,
            stored_at: Instant::now(),
        }
    }

    #[inline]
    fn is_expired(&self, ttl: Duration) -> bool {
        self.stored_at.elapsed() >= ttl
    }
}

/// Process-local response cache with TTL expiry and bounded capacity.
///
/// Expiry is lazy: an entry past its TTL is dropped by the read that
/// discovers it. The capacity bound is enforced on insert by clearing
/// expired entries first, then evicting the oldest entry if that was
/// not enough. Only public GET responses belong here; write paths and
/// anything authenticated must never be inserted.
pub struct ResponseCache {
    store: DashMap<String, CacheEntry>,
    ttl: Duration,
    capacity: usize,
}

impl ResponseCache {
    pub fn new() -> Self {
        Self::with_limits(DEFAULT_TTL, DEFAULT_CAPACITY)
    }

    pub fn with_limits(ttl: Duration, capacity: usize) -> Self {
        Self {
            store: DashMap::new(),
            ttl,
            capacity,
        }
    }

    /// Returns the fresh payload stored under `key`, if any.
    /// An expired entry is removed and reported as a miss.
    pub fn get(&self, key: &str) -> Option<Value> {
        let entry = self.store.get(key)?;
        if entry.is_expired(self.ttl) {
            // Release the read guard before removing.
            drop(entry);
            self.store.remove(key);
            debug!("Cache entry for '{}' expired", key);
            return None;
        }

        debug!("Cache hit for '{}'", key);
        Some(entry.payload.clone())
    }

    /// Stores `payload` under `key`, overwriting any previous entry.
    pub fn insert(&self, key: String, payload: Value) {
        if !self.store.contains_key(&key) {
            self.make_room();
        }
        debug!("Caching response for '{}'", key);
        self.store.insert(key, CacheEntry::new(payload));
    }

    /// Drops entries whose key contains `pattern`, or every entry when no
    /// pattern is given.
    pub fn clear(&self, pattern: Option<&str>) {
        match pattern {
            None => {
                let count = self.store.len();
                self.store.clear();
                debug!("Cleared all {} cached responses", count);
            }
            Some(pattern) => {
                let keys: Vec<String> = self
                    .store
                    .iter()
                    .filter(|entry| entry.key().contains(pattern))
                    .map(|entry| entry.key().clone())
                    .collect();
                let count = keys.len();
                for key in keys {
                    self.store.remove(&key);
                }
                debug!("Cleared {} cached responses matching '{}'", count, pattern);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Makes space for one more entry when the cache is full.
    fn make_room(&self) {
        if self.store.len() < self.capacity {
            return;
        }

        self.store.retain(|_, entry| !entry.is_expired(self.ttl));

        while self.store.len() >= self.capacity {
            let oldest = self
                .store
                .iter()
                .min_by_key(|entry| entry.value().stored_at)
                .map(|entry| entry.key().clone());
            match oldest {
                Some(key) => {
                    warn!("Cache full, evicting oldest entry '{}'", key);
                    self.store.remove(&key);
                }
                None => break,
            }
        }
    }
}

impl Default for ResponseCache {
    fn default() -> Self {
        Self::new()
    }
}
