//! TTL Reaper Task
//!
//! Background task that periodically purges expired cache entries.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::{duration_ms, Clock, ExpiringLruCache, Resolver};
use crate::config::CacheConfig;

/// Spawns a background task that periodically purges expired cache entries.
///
/// The task runs in an infinite loop, sleeping for `interval` between passes.
/// A pass is skipped when a caller holds the cache lock (for example while a
/// slow resolver runs), so the task never blocks a runtime worker.
///
/// Lookups stay correct without the reaper; it only frees slots held by
/// entries nobody asks for again.
///
/// # Returns
/// A JoinHandle for the spawned task, which can be aborted during shutdown.
///
/// # Example
/// ```ignore
/// let cache = Arc::new(ExpiringLruCache::new(1000, Duration::from_secs(5), resolver)?);
/// let reaper = spawn_reaper_task(cache.clone(), Duration::from_secs(1));
/// // Later, during shutdown:
/// reaper.abort();
/// ```
pub fn spawn_reaper_task<R, C>(
    cache: Arc<ExpiringLruCache<R, C>>,
    interval: Duration,
) -> JoinHandle<()>
where
    R: Resolver + Send + Sync + 'static,
    R::Value: Send + 'static,
    C: Clock + 'static,
{
    tokio::spawn(async move {
        info!(interval_ms = duration_ms(interval), "starting TTL reaper task");

        loop {
            tokio::time::sleep(interval).await;

            match cache.try_purge_expired() {
                Some(removed) if removed > 0 => {
                    info!("TTL reaper: removed {} expired entries", removed)
                }
                Some(_) => debug!("TTL reaper: no expired entries found"),
                None => debug!("TTL reaper: cache busy, skipping pass"),
            }
        }
    })
}

/// Starts the reaper at the interval set in `config`.
///
/// Returns None when `reap_interval_secs` is 0 (the default), leaving expiry
/// purely lazy.
pub fn spawn_reaper_from_config<R, C>(
    cache: Arc<ExpiringLruCache<R, C>>,
    config: &CacheConfig,
) -> Option<JoinHandle<()>>
where
    R: Resolver + Send + Sync + 'static,
    R::Value: Send + 'static,
    C: Clock + 'static,
{
    match config.reap_interval() {
        Some(interval) => Some(spawn_reaper_task(cache, interval)),
        None => {
            debug!("TTL reaper disabled by configuration");
            None
        }
    }
}
