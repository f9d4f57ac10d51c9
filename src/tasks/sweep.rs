//! Load Sweep Task
//!
//! One-shot task that evicts expired demo entries once the hosting session
//! has finished loading. Entries written afterwards are only evicted lazily,
//! when they are next read.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::DemoCache;

/// Spawns a task that waits `delay`, sweeps the cache once and finishes.
///
/// The handle resolves to the number of entries evicted.
///
/// # Example
/// ```ignore
/// let cache = Arc::new(RwLock::new(DemoCache::in_browser(MemoryStorage::new(), SystemClock)));
/// let evicted = spawn_load_sweep(cache.clone(), Duration::ZERO).await?;
/// ```
pub fn spawn_load_sweep(cache: Arc<RwLock<DemoCache>>, delay: Duration) -> JoinHandle<usize> {
    tokio::spawn(async move {
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        let evicted = {
            let mut cache_guard = cache.write().await;
            cache_guard.sweep_expired()
        };

        if evicted > 0 {
            info!("Load sweep: evicted {} expired entries", evicted);
        } else {
            debug!("Load sweep: no expired entries found");
        }
        evicted
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{ManualClock, MemoryStorage, DEMO_TTL_MS};

    fn shared_cache() -> (Arc<RwLock<DemoCache>>, ManualClock) {
        let clock = ManualClock::new(1_700_000_000_000);
        let cache = DemoCache::in_browser(MemoryStorage::new(), clock.clone());
        (Arc::new(RwLock::new(cache)), clock)
    }

    #[tokio::test]
    async fn test_sweep_removes_expired_entries() {
        let (cache, clock) = shared_cache();
        {
            let mut cache_guard = cache.write().await;
            cache_guard.set("stale", "value");
        }
        clock.advance(DEMO_TTL_MS);
        {
            let mut cache_guard = cache.write().await;
            cache_guard.set("fresh", "value");
        }

        let evicted = spawn_load_sweep(cache.clone(), Duration::ZERO).await.unwrap();

        assert_eq!(evicted, 1);
        assert_eq!(cache.read().await.list_keys(), vec!["fresh"]);
    }

    #[tokio::test]
    async fn test_sweep_waits_for_delay() {
        let (cache, clock) = shared_cache();
        {
            let mut cache_guard = cache.write().await;
            cache_guard.set("stale", "value");
        }
        clock.advance(DEMO_TTL_MS);

        let handle = spawn_load_sweep(cache.clone(), Duration::from_millis(200));
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(!handle.is_finished(), "Sweep should still be waiting");

        assert_eq!(handle.await.unwrap(), 1);
        assert!(cache.read().await.list_keys().is_empty());
    }

    #[tokio::test]
    async fn test_sweep_runs_once() {
        let (cache, _) = shared_cache();

        let handle = spawn_load_sweep(cache, Duration::ZERO);
        assert_eq!(handle.await.unwrap(), 0);
    }
}
