//! Cache Store Module
//!
//! Unsynchronized cache engine combining HashMap storage with LRU tracking and
//! lazy TTL expiration. `ExpiringLruCache` wraps it behind a lock.

use std::collections::HashMap;
use std::time::Duration;

use crate::cache::{duration_ms, CacheEntry, CacheStats, LruTracker};
use crate::error::{CacheError, Result};

// == Cache Store ==
/// Bounded storage with LRU eviction and TTL support.
///
/// Every key in `entries` is tracked exactly once by `lru`, and after each
/// `insert` the entry count is at most `capacity`.
#[derive(Debug)]
pub struct CacheStore<V> {
    /// Key-value storage
    entries: HashMap<String, CacheEntry<V>>,
    /// LRU access tracker
    lru: LruTracker,
    /// Performance statistics
    stats: CacheStats,
    /// Maximum number of entries retained
    capacity: usize,
    /// TTL applied to every inserted entry, in milliseconds
    ttl_ms: u64,
}

impl<V: Clone> CacheStore<V> {
    // == Constructor ==
    /// Creates a new CacheStore with the given capacity and TTL.
    ///
    /// A capacity of 0 retains nothing. The TTL must be positive; anything
    /// below one millisecond is rounded up to 1ms.
    pub fn new(capacity: usize, ttl: Duration) -> Result<Self> {
        if ttl.is_zero() {
            return Err(CacheError::InvalidConfiguration(
                "ttl must be positive".to_string(),
            ));
        }
        let ttl_ms = duration_ms(ttl).max(1);

        Ok(Self {
            entries: HashMap::new(),
            lru: LruTracker::new(),
            stats: CacheStats::new(),
            capacity,
            ttl_ms,
        })
    }

    // == Lookup ==
    /// Returns the live value for `key`, recording a hit or a miss.
    ///
    /// A hit promotes the key to most recently used; its expiry is untouched.
    /// An expired entry is dropped before the miss is recorded.
    pub fn lookup(&mut self, key: &str, now_ms: u64) -> Option<V> {
        match self.entries.get(key) {
            Some(entry) if !entry.is_expired(now_ms) => {
                let value = entry.value.clone();
                self.stats.record_hit();
                self.lru.touch(key);
                Some(value)
            }
            Some(_) => {
                self.remove_entry(key);
                self.stats.record_expirations(1);
                self.stats.record_miss();
                None
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    // == Insert ==
    /// Stores a freshly resolved value as the most recently used entry.
    ///
    /// If the store grows past capacity the least recently used key is
    /// evicted and returned.
    pub fn insert(&mut self, key: &str, value: V, now_ms: u64) -> Option<String> {
        self.entries
            .insert(key.to_string(), CacheEntry::new(value, now_ms, self.ttl_ms));
        self.lru.touch(key);
        debug_assert_eq!(self.entries.len(), self.lru.len());

        let evicted = if self.entries.len() > self.capacity {
            self.lru.evict_oldest().map(|oldest| {
                self.entries.remove(&oldest);
                self.stats.record_eviction();
                oldest
            })
        } else {
            None
        };

        self.stats.set_total_entries(self.entries.len());
        evicted
    }

    // == Peek ==
    /// Returns the live value for `key` without touching stats or recency.
    pub fn peek(&self, key: &str, now_ms: u64) -> Option<&V> {
        self.entries
            .get(key)
            .filter(|entry| !entry.is_expired(now_ms))
            .map(|entry| &entry.value)
    }

    // == Invalidate ==
    /// Removes an entry regardless of its state. Returns false if absent.
    pub fn invalidate(&mut self, key: &str) -> bool {
        self.remove_entry(key)
    }

    // == Clear ==
    /// Drops every entry. Counters are kept.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.lru.clear();
        self.stats.set_total_entries(0);
    }

    // == Purge Expired ==
    /// Removes all expired entries from the store.
    ///
    /// Returns the number of entries removed.
    pub fn purge_expired(&mut self, now_ms: u64) -> usize {
        let expired_keys: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired(now_ms))
            .map(|(key, _)| key.clone())
            .collect();

        for key in &expired_keys {
            self.remove_entry(key);
        }

        self.stats.record_expirations(expired_keys.len());
        expired_keys.len()
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    /// Keys from most to least recently used.
    pub fn keys_by_recency(&self) -> Vec<String> {
        self.lru.iter().map(str::to_string).collect()
    }

    /// Whether `key` is physically stored, live or not.
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn ttl(&self) -> Duration {
        Duration::from_millis(self.ttl_ms)
    }

    /// Number of keys in the recency order (always equal to `len`).
    #[cfg(test)]
    pub(crate) fn tracked_len(&self) -> usize {
        self.lru.len()
    }

    fn remove_entry(&mut self, key: &str) -> bool {
        let removed = self.entries.remove(key).is_some();
        if removed {
            self.lru.remove(key);
            self.stats.set_total_entries(self.entries.len());
        }
        removed
    }
}
