//! Background removal of expired cache entries.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};

use explorer_core::traits::cache::CacheProvider;

/// Periodically purges expired entries, independent of reads.
#[derive(Debug)]
pub struct CacheSweeper {
    /// Cache being swept.
    cache: Arc<dyn CacheProvider>,
    /// Time between sweeps.
    interval: Duration,
}

impl CacheSweeper {
    /// Create a sweeper for `cache` running every `interval`.
    pub fn new(cache: Arc<dyn CacheProvider>, interval: Duration) -> Self {
        Self { cache, interval }
    }

    /// Run the sweep loop until `cancel` flips to `true` or its sender drops.
    pub async fn run(&self, mut cancel: watch::Receiver<bool>) {
        tracing::info!(
            "Cache sweeper started, interval={}s",
            self.interval.as_secs()
        );

        let mut interval = time::interval_at(time::Instant::now() + self.interval, self.interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    match self.cache.purge_expired().await {
                        Ok(0) => tracing::trace!("Cache sweep found nothing to remove"),
                        Ok(removed) => tracing::debug!(removed, "Swept expired cache entries"),
                        Err(e) => tracing::error!("Cache sweep failed: {}", e),
                    }
                }
                changed = cancel.changed() => {
                    if changed.is_err() || *cancel.borrow() {
                        tracing::info!("Cache sweeper shutting down");
                        break;
                    }
                }
            }
        }
    }

    /// Spawn [`run`](Self::run) onto the runtime.
    pub fn spawn(self, cancel: watch::Receiver<bool>) -> JoinHandle<()> {
        tokio::spawn(async move { self.run(cancel).await })
    }
}
