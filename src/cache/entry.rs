//! Cache Entry Module
//!
//! Defines the structure for individual resolved entries with TTL support.

// == Cache Entry ==
/// A resolved value and the instant it goes stale.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The resolved value
    pub value: V,
    /// Expiration timestamp (Unix milliseconds)
    pub expires_at: u64,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates an entry resolved at `now_ms` that lives for `ttl_ms`.
    pub fn new(value: V, now_ms: u64, ttl_ms: u64) -> Self {
        Self {
            value,
            expires_at: now_ms.saturating_add(ttl_ms),
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired at `now_ms`.
    ///
    /// An entry exactly at its expiry boundary is expired: it is live only
    /// while `expires_at > now_ms`.
    pub fn is_expired(&self, now_ms: u64) -> bool {
        now_ms >= self.expires_at
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_creation() {
        let entry = CacheEntry::new("93.184.216.34".to_string(), 1_000, 5_000);

        assert_eq!(entry.value, "93.184.216.34");
        assert_eq!(entry.expires_at, 6_000);
        assert!(!entry.is_expired(1_000));
    }

    #[test]
    fn test_entry_expiration() {
        let entry = CacheEntry::new(1u32, 0, 5_000);

        assert!(!entry.is_expired(4_999));
        assert!(entry.is_expired(6_000));
    }

    #[test]
    fn test_expiration_boundary_condition() {
        let entry = CacheEntry::new(1u32, 0, 5_000);

        // Live strictly before expires_at, expired at it
        assert!(entry.is_expired(5_000), "Entry should be expired at boundary");
    }

    #[test]
    fn test_expiry_saturates() {
        let entry = CacheEntry::new((), u64::MAX - 1, 10);
        assert_eq!(entry.expires_at, u64::MAX);
    }
}
