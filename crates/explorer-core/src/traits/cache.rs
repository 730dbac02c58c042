//! Cache provider trait for time-bounded caching backends.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::result::AppResult;

/// Snapshot of cache occupancy, used by health reporting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheStats {
    /// Entries currently stored, expired or not.
    pub total: usize,
    /// Entries whose expiry is still in the future.
    pub active: usize,
    /// Entries that have expired but not yet been evicted.
    pub expired: usize,
}

/// Trait for cache backends.
///
/// All values are stored as strings (JSON). Every entry carries its own
/// absolute expiry; reads never return an expired value.
#[async_trait]
pub trait CacheProvider: Send + Sync + std::fmt::Debug + 'static {
    /// Get a value by key. Returns `None` if the key does not exist or has
    /// expired; an expired entry is removed as a side effect.
    async fn get(&self, key: &str) -> AppResult<Option<String>>;

    /// Set a value that expires after `ttl`.
    async fn set(&self, key: &str, value: &str, ttl: Duration) -> AppResult<()>;

    /// Set a value with the default TTL.
    async fn set_default(&self, key: &str, value: &str) -> AppResult<()>;

    /// Delete a key. Returns `true` if an entry was removed.
    async fn delete(&self, key: &str) -> AppResult<bool>;

    /// Check whether an unexpired entry exists for the key.
    async fn exists(&self, key: &str) -> AppResult<bool>;

    /// Delete all keys matching a trailing-wildcard pattern (e.g. `"search:*"`).
    async fn delete_pattern(&self, pattern: &str) -> AppResult<u64>;

    /// Remove every expired entry. Returns how many were removed.
    async fn purge_expired(&self) -> AppResult<u64>;

    /// Occupancy counters.
    async fn stats(&self) -> AppResult<CacheStats>;

    /// Flush all entries from the cache.
    async fn flush_all(&self) -> AppResult<()>;

    /// Get a typed value by deserializing from JSON.
    async fn get_json<T: serde::de::DeserializeOwned + Send>(
        &self,
        key: &str,
    ) -> AppResult<Option<T>>
    where
        Self: Sized,
    {
        match self.get(key).await? {
            Some(value) => {
                let parsed = serde_json::from_str(&value)?;
                Ok(Some(parsed))
            }
            None => Ok(None),
        }
    }

    /// Set a typed value by serializing to JSON.
    async fn set_json<T: serde::Serialize + Send + Sync>(
        &self,
        key: &str,
        value: &T,
        ttl: Duration,
    ) -> AppResult<()>
    where
        Self: Sized,
    {
        let json = serde_json::to_string(value)?;
        self.set(key, &json, ttl).await
    }
}
