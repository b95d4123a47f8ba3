//! Expiring LRU Cache
//!
//! Thread-safe resolve-through cache: answers from live entries, consults the
//! resolver on a miss, and keeps at most `capacity` entries.

use std::sync::{Mutex, MutexGuard, TryLockError};
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::cache::{duration_ms, CacheStats, CacheStore, Clock, Resolver, SystemClock};
use crate::config::CacheConfig;
use crate::error::{CacheError, Result};

// == Expiring LRU Cache ==
/// Bounded cache in front of a [`Resolver`].
///
/// Each `resolve` call runs its whole check-resolve-insert-evict sequence
/// under one lock, so concurrent callers never observe a half-applied update
/// and counters are never lost. The resolver is called while the lock is held.
pub struct ExpiringLruCache<R: Resolver, C: Clock = SystemClock> {
    store: Mutex<CacheStore<R::Value>>,
    resolver: R,
    clock: C,
}

impl<R: Resolver> ExpiringLruCache<R> {
    // == Constructor ==
    /// Creates a cache on the system clock.
    ///
    /// # Arguments
    /// * `capacity` - Maximum number of entries retained (0 = pass-through)
    /// * `ttl` - Lifetime of a resolved entry, positive (rounded up to 1ms)
    /// * `resolver` - Upstream consulted on every miss
    pub fn new(capacity: usize, ttl: Duration, resolver: R) -> Result<Self> {
        Self::with_clock(capacity, ttl, resolver, SystemClock)
    }

    /// Creates a cache from a validated [`CacheConfig`].
    pub fn from_config(config: &CacheConfig, resolver: R) -> Result<Self> {
        config.validate()?;
        Self::new(config.capacity, config.ttl(), resolver)
    }
}

impl<R: Resolver, C: Clock> ExpiringLruCache<R, C> {
    /// Creates a cache that reads time from `clock`.
    pub fn with_clock(capacity: usize, ttl: Duration, resolver: R, clock: C) -> Result<Self> {
        let store = CacheStore::new(capacity, ttl)?;
        info!(capacity, ttl_ms = duration_ms(ttl), "resolve cache initialized");

        Ok(Self {
            store: Mutex::new(store),
            resolver,
            clock,
        })
    }

    // == Resolve ==
    /// Returns the value for `key`, from cache when live, else from the resolver.
    ///
    /// A failed resolution is returned as [`CacheError::ResolutionFailure`],
    /// still counts as a miss, and leaves nothing cached for `key`.
    pub fn resolve(&self, key: &str) -> Result<R::Value> {
        let mut store = self.lock();

        if let Some(value) = store.lookup(key, self.clock.now_ms()) {
            debug!(key, "cache hit");
            return Ok(value);
        }

        debug!(key, "cache miss, querying resolver");
        let value = self.resolver.resolve(key).map_err(|source| {
            warn!(key, error = %source, "resolution failed");
            CacheError::resolution(key, source)
        })?;

        // Expiry counts from when the upstream answered
        if let Some(evicted) = store.insert(key, value.clone(), self.clock.now_ms()) {
            debug!(key, evicted = %evicted, "evicted least recently used entry");
        }

        Ok(value)
    }

    // == Stats ==
    /// Returns a snapshot of the cache statistics.
    pub fn stats(&self) -> CacheStats {
        self.lock().stats()
    }

    /// Returns the live value for `key` without counting a lookup or promoting it.
    pub fn peek(&self, key: &str) -> Option<R::Value> {
        let now = self.clock.now_ms();
        self.lock().peek(key, now).cloned()
    }

    /// Drops `key` from the cache. Returns false if it was not stored.
    pub fn invalidate(&self, key: &str) -> bool {
        self.lock().invalidate(key)
    }

    /// Drops every entry, keeping the counters.
    pub fn clear(&self) {
        self.lock().clear();
    }

    // == Purge Expired ==
    /// Removes every expired entry and returns how many were dropped.
    pub fn purge_expired(&self) -> usize {
        let now = self.clock.now_ms();
        self.lock().purge_expired(now)
    }

    /// Like [`purge_expired`](Self::purge_expired), but gives up with `None`
    /// instead of waiting when another caller holds the lock.
    pub fn try_purge_expired(&self) -> Option<usize> {
        let now = self.clock.now_ms();
        match self.store.try_lock() {
            Ok(mut store) => Some(store.purge_expired(now)),
            Err(TryLockError::Poisoned(poisoned)) => Some(poisoned.into_inner().purge_expired(now)),
            Err(TryLockError::WouldBlock) => None,
        }
    }

    /// Keys from most to least recently used.
    pub fn keys_by_recency(&self) -> Vec<String> {
        self.lock().keys_by_recency()
    }

    /// Whether `key` is physically stored, even if already expired.
    pub fn contains(&self, key: &str) -> bool {
        self.lock().contains(key)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.lock().capacity()
    }

    pub fn ttl(&self) -> Duration {
        self.lock().ttl()
    }

    /// Acquires the store, recovering from a resolver that panicked mid-call.
    ///
    /// The resolver only runs between a completed lookup and the insert, so a
    /// poisoned store still satisfies its invariants.
    fn lock(&self) -> MutexGuard<'_, CacheStore<R::Value>> {
        self.store.lock().unwrap_or_else(|poisoned| {
            warn!("cache lock poisoned by a panicking resolver, recovering");
            poisoned.into_inner()
        })
    }
}

impl<R: Resolver, C: Clock> std::fmt::Debug for ExpiringLruCache<R, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let store = self.lock();
        f.debug_struct("ExpiringLruCache")
            .field("capacity", &store.capacity())
            .field("len", &store.len())
            .field("stats", &store.stats())
            .finish()
    }
}
