//! Cache Module
//!
//! Provides a resolve-through cache with TTL expiration and LRU eviction.

mod clock;
mod entry;
mod expiring;
mod lru;
mod resolver;
mod stats;
mod store;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use clock::{current_timestamp_ms, duration_ms, Clock, ManualClock, SystemClock};
pub use entry::CacheEntry;
pub use expiring::ExpiringLruCache;
pub use lru::LruTracker;
pub use resolver::Resolver;
pub use stats::CacheStats;
pub use store::CacheStore;
