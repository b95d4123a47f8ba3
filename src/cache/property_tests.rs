//! Property-Based Tests for Cache Module
//!
//! Uses proptest to check the capacity, recency and accounting properties of
//! the store and the resolve-through cache.

use proptest::prelude::*;
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::cache::{CacheStore, ExpiringLruCache, ManualClock};

// == Test Configuration ==
const TEST_TTL: Duration = Duration::from_secs(5);

// == Strategies ==
/// Generates domain-like keys from a small alphabet so keys repeat often
fn key_strategy() -> impl Strategy<Value = String> {
    "[a-f]{1,2}\\.com"
}

/// Generates a sequence of cache operations for testing
#[derive(Debug, Clone)]
enum CacheOp {
    Resolve { key: String },
    Advance { millis: u64 },
    Invalidate { key: String },
    Purge,
}

fn cache_op_strategy() -> impl Strategy<Value = CacheOp> {
    prop_oneof![
        6 => key_strategy().prop_map(|key| CacheOp::Resolve { key }),
        2 => (0u64..4_000).prop_map(|millis| CacheOp::Advance { millis }),
        1 => key_strategy().prop_map(|key| CacheOp::Invalidate { key }),
        1 => Just(CacheOp::Purge),
    ]
}

fn echo(key: &str) -> anyhow::Result<String> {
    Ok(format!("ip-{}", key))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // *For any* sequence of operations, the store never holds more than
    // `capacity` entries and every stored key is tracked exactly once.
    #[test]
    fn prop_capacity_and_bijection(
        capacity in 0usize..6,
        ops in prop::collection::vec(cache_op_strategy(), 1..80)
    ) {
        let mut store: CacheStore<String> = CacheStore::new(capacity, TEST_TTL).unwrap();
        let mut now = 0u64;

        for op in ops {
            match op {
                CacheOp::Resolve { key } => {
                    if store.lookup(&key, now).is_none() {
                        store.insert(&key, format!("ip-{}", key), now);
                    }
                }
                CacheOp::Advance { millis } => now += millis,
                CacheOp::Invalidate { key } => {
                    store.invalidate(&key);
                }
                CacheOp::Purge => {
                    store.purge_expired(now);
                }
            }

            prop_assert!(
                store.len() <= capacity,
                "Store size {} exceeds capacity {}",
                store.len(),
                capacity
            );
            prop_assert_eq!(store.len(), store.tracked_len(), "Recency order out of sync");

            let ordered = store.keys_by_recency();
            let unique: HashSet<&String> = ordered.iter().collect();
            prop_assert_eq!(unique.len(), ordered.len(), "Duplicate key in recency order");
            for key in &ordered {
                prop_assert!(store.contains(key), "Tracked key '{}' missing from store", key);
            }
        }
    }

    // *For any* sequence of resolves, hits + misses equals the number of
    // calls and misses equals the number of resolver invocations.
    #[test]
    fn prop_statistics_accuracy(
        capacity in 0usize..6,
        ops in prop::collection::vec(cache_op_strategy(), 1..80)
    ) {
        let clock = Arc::new(ManualClock::new(0));
        let calls = AtomicUsize::new(0);
        let cache = ExpiringLruCache::with_clock(
            capacity,
            TEST_TTL,
            |key: &str| -> anyhow::Result<String> {
                calls.fetch_add(1, Ordering::SeqCst);
                echo(key)
            },
            Arc::clone(&clock),
        )
        .unwrap();
        let mut resolves: u64 = 0;

        for op in ops {
            match op {
                CacheOp::Resolve { key } => {
                    prop_assert_eq!(cache.resolve(&key).unwrap(), format!("ip-{}", key));
                    resolves += 1;
                }
                CacheOp::Advance { millis } => clock.advance(Duration::from_millis(millis)),
                CacheOp::Invalidate { key } => {
                    cache.invalidate(&key);
                }
                CacheOp::Purge => {
                    cache.purge_expired();
                }
            }
        }

        let stats = cache.stats();
        prop_assert_eq!(stats.total_lookups(), resolves, "Lookups mismatch");
        prop_assert_eq!(stats.misses, calls.load(Ordering::SeqCst) as u64, "Misses mismatch");
        prop_assert_eq!(stats.total_entries, cache.len(), "Total entries mismatch");
        if capacity == 0 {
            prop_assert_eq!(stats.hits, 0, "Zero capacity must never hit");
        }
    }

    // *For any* key resolved N times within its TTL, exactly one resolve is a
    // miss and the hit rate is (N - 1) / N * 100.
    #[test]
    fn prop_repeated_key_hit_rate(key in key_strategy(), n in 1u64..50) {
        let cache = ExpiringLruCache::new(4, Duration::from_secs(3600), echo).unwrap();

        for _ in 0..n {
            cache.resolve(&key).unwrap();
        }

        let stats = cache.stats();
        prop_assert_eq!(stats.misses, 1);
        prop_assert_eq!(stats.hits, n - 1);
        let expected = (n - 1) as f64 / n as f64 * 100.0;
        prop_assert!((stats.hit_rate() - expected).abs() < 1e-9);
    }

    // *For any* full store, inserting a new key evicts the key that was
    // accessed least recently.
    #[test]
    fn prop_lru_eviction_order(
        initial_keys in prop::collection::hash_set(key_strategy(), 2..8),
        promoted in any::<prop::sample::Index>(),
        new_key in key_strategy()
    ) {
        prop_assume!(!initial_keys.contains(&new_key));

        let keys: Vec<String> = initial_keys.into_iter().collect();
        let capacity = keys.len();
        let mut store: CacheStore<String> = CacheStore::new(capacity, TEST_TTL).unwrap();

        for key in &keys {
            store.insert(key, format!("ip-{}", key), 0);
        }

        // Touch one key; the oldest of the rest becomes the eviction candidate
        let promoted = promoted.index(capacity);
        prop_assert!(store.lookup(&keys[promoted], 0).is_some());
        let expected_victim = if promoted == 0 { &keys[1] } else { &keys[0] };

        let evicted = store.insert(&new_key, "ip-new".to_string(), 0);
        prop_assert_eq!(evicted.as_ref(), Some(expected_victim));
        prop_assert_eq!(store.len(), capacity, "Store should remain at capacity");
        prop_assert!(store.contains(&keys[promoted]), "Promoted key must survive");
        prop_assert!(store.contains(&new_key), "New key must be stored");
    }
}
