//! In-memory cache implementation using a sharded concurrent map.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use dashmap::DashMap;
use tokio::time::Instant;
use tracing::debug;

use explorer_core::config::CacheConfig;
use explorer_core::result::AppResult;
use explorer_core::traits::cache::{CacheProvider, CacheStats};

#[derive(Debug, Clone)]
struct Entry {
    value: String,
    expires_at: Instant,
}

impl Entry {
    fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

/// In-memory cache provider with per-entry expiry.
///
/// Expired entries are dropped lazily when read and in bulk by
/// [`purge_expired`](CacheProvider::purge_expired), which the
/// [`CacheSweeper`](super::CacheSweeper) calls on an interval. Inserting a new
/// key into a full cache first purges expired entries, then evicts the entry
/// closest to expiry. A capacity of zero disables the bound.
#[derive(Debug, Clone)]
pub struct MemoryCacheProvider {
    /// Key to value and absolute expiry.
    entries: Arc<DashMap<String, Entry>>,
    /// Default TTL for entries.
    default_ttl: Duration,
    /// Maximum number of entries.
    max_capacity: usize,
}

impl MemoryCacheProvider {
    /// Create a new in-memory cache from configuration.
    pub fn new(config: &CacheConfig) -> Self {
        Self {
            entries: Arc::new(DashMap::new()),
            default_ttl: config.default_ttl(),
            max_capacity: config.max_capacity,
        }
    }

    fn purge_expired_at(&self, now: Instant) -> u64 {
        let mut removed = 0u64;
        self.entries.retain(|_, entry| {
            let keep = !entry.is_expired(now);
            if !keep {
                removed += 1;
            }
            keep
        });
        removed
    }

    /// Free a slot for a new key when the cache is full.
    fn make_room(&self, now: Instant) {
        if self.max_capacity == 0 || self.entries.len() < self.max_capacity {
            return;
        }

        let purged = self.purge_expired_at(now);
        if self.entries.len() < self.max_capacity {
            debug!(purged, "Cache full, purged expired entries");
            return;
        }

        let victim = self
            .entries
            .iter()
            .min_by_key(|entry| entry.value().expires_at)
            .map(|entry| entry.key().clone());

        if let Some(key) = victim {
            self.entries.remove(&key);
            debug!(key = %key, "Cache full, evicted entry closest to expiry");
        }
    }
}

#[async_trait]
impl CacheProvider for MemoryCacheProvider {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        let now = Instant::now();

        match self.entries.get(key) {
            Some(entry) if !entry.is_expired(now) => return Ok(Some(entry.value.clone())),
            Some(_) => {}
            None => return Ok(None),
        }

        self.entries.remove_if(key, |_, entry| entry.is_expired(now));
        Ok(None)
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> AppResult<()> {
        let now = Instant::now();
        if !self.entries.contains_key(key) {
            self.make_room(now);
        }

        self.entries.insert(
            key.to_string(),
            Entry {
                value: value.to_string(),
                expires_at: now + ttl,
            },
        );
        Ok(())
    }

    async fn set_default(&self, key: &str, value: &str) -> AppResult<()> {
        self.set(key, value, self.default_ttl).await
    }

    async fn delete(&self, key: &str) -> AppResult<bool> {
        Ok(self.entries.remove(key).is_some())
    }

    async fn exists(&self, key: &str) -> AppResult<bool> {
        Ok(self.get(key).await?.is_some())
    }

    async fn delete_pattern(&self, pattern: &str) -> AppResult<u64> {
        let prefix = pattern.trim_end_matches('*');

        let keys_to_remove: Vec<String> = self
            .entries
            .iter()
            .filter(|entry| entry.key().starts_with(prefix))
            .map(|entry| entry.key().clone())
            .collect();

        let mut count = 0u64;
        for key in keys_to_remove {
            if self.entries.remove(&key).is_some() {
                count += 1;
            }
        }

        debug!(pattern, count, "Deleted keys matching pattern");
        Ok(count)
    }

    async fn purge_expired(&self) -> AppResult<u64> {
        Ok(self.purge_expired_at(Instant::now()))
    }

    async fn stats(&self) -> AppResult<CacheStats> {
        let now = Instant::now();
        let mut stats = CacheStats::default();
        for entry in self.entries.iter() {
            stats.total += 1;
            if entry.value().is_expired(now) {
                stats.expired += 1;
            } else {
                stats.active += 1;
            }
        }
        Ok(stats)
    }

    async fn flush_all(&self) -> AppResult<()> {
        self.entries.clear();
        Ok(())
    }
}
