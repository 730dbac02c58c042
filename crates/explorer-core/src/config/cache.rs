//! Cache configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// In-process TTL cache configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Default TTL for cached entries in seconds.
    #[serde(default = "default_ttl")]
    pub default_ttl_seconds: u64,
    /// Interval between background sweeps of expired entries.
    #[serde(default = "default_cleanup_interval")]
    pub cleanup_interval_seconds: u64,
    /// Maximum number of entries held at once.
    #[serde(default = "default_max_capacity")]
    pub max_capacity: usize,
}

impl CacheConfig {
    /// Default TTL as a [`Duration`].
    pub fn default_ttl(&self) -> Duration {
        Duration::from_secs(self.default_ttl_seconds)
    }

    /// TTL for search results: half the default.
    pub fn search_ttl(&self) -> Duration {
        Duration::from_millis(self.default_ttl_seconds * 1000 / 2)
    }

    /// Sweep interval as a [`Duration`].
    pub fn cleanup_interval(&self) -> Duration {
        Duration::from_secs(self.cleanup_interval_seconds)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            default_ttl_seconds: default_ttl(),
            cleanup_interval_seconds: default_cleanup_interval(),
            max_capacity: default_max_capacity(),
        }
    }
}

fn default_ttl() -> u64 {
    300
}

fn default_cleanup_interval() -> u64 {
    600
}

fn default_max_capacity() -> usize {
    10_000
}
