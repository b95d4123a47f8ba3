//! DNS Cache - A bounded name-resolution cache
//!
//! Sits in front of a slow or unreliable [`Resolver`], answering repeated
//! lookups from memory with TTL expiration and LRU eviction.
//!
//! ```ignore
//! let cache = ExpiringLruCache::new(3, Duration::from_secs(5), |name: &str| -> anyhow::Result<String> {
//!     upstream.lookup(name)
//! })?;
//! let ip = cache.resolve("example.com")?;
//! println!("hit rate: {:.1}%", cache.stats().hit_rate());
//! ```

pub mod cache;
pub mod config;
pub mod error;
pub mod logging;
pub mod tasks;

pub use cache::{CacheStats, Clock, ExpiringLruCache, ManualClock, Resolver, SystemClock};
pub use config::CacheConfig;
pub use error::{CacheError, Result};
pub use logging::init_tracing;
pub use tasks::{spawn_reaper_from_config, spawn_reaper_task};
