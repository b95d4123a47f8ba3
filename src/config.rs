//! Configuration Module
//!
//! Handles loading and validating cache configuration from environment variables.

use std::env;
use std::time::Duration;

use crate::error::{CacheError, Result};

/// Default maximum number of cached names
pub const DEFAULT_CAPACITY: usize = 1000;

/// Default time-to-live in seconds
pub const DEFAULT_TTL_SECS: u64 = 5;

/// Cache configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    /// Maximum number of entries the cache can hold (0 = pass-through)
    pub capacity: usize,
    /// Time-to-live in seconds applied to every resolved entry
    pub ttl_secs: u64,
    /// Background reaper interval in seconds (0 = disabled)
    pub reap_interval_secs: u64,
}

impl CacheConfig {
    /// Creates a new CacheConfig by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `DNS_CACHE_CAPACITY` - Maximum cache entries (default: 1000)
    /// - `DNS_CACHE_TTL_SECS` - Entry TTL in seconds (default: 5)
    /// - `DNS_CACHE_REAP_INTERVAL_SECS` - Reaper frequency in seconds (default: 0, disabled)
    pub fn from_env() -> Self {
        Self {
            capacity: parse_var("DNS_CACHE_CAPACITY").unwrap_or(DEFAULT_CAPACITY),
            ttl_secs: parse_var("DNS_CACHE_TTL_SECS").unwrap_or(DEFAULT_TTL_SECS),
            reap_interval_secs: parse_var("DNS_CACHE_REAP_INTERVAL_SECS").unwrap_or(0),
        }
    }

    /// Rejects configurations the cache cannot honor.
    pub fn validate(&self) -> Result<()> {
        if self.ttl_secs == 0 {
            return Err(CacheError::InvalidConfiguration(
                "ttl must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Entry time-to-live as a Duration.
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }

    /// Reaper interval, or None when the reaper is disabled.
    pub fn reap_interval(&self) -> Option<Duration> {
        (self.reap_interval_secs > 0).then(|| Duration::from_secs(self.reap_interval_secs))
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            ttl_secs: DEFAULT_TTL_SECS,
            reap_interval_secs: 0,
        }
    }
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}
