//! Error types for the resolve cache
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the resolve cache.
#[derive(Error, Debug)]
pub enum CacheError {
    /// The upstream resolver could not produce a value for the key
    #[error("Resolution failed for '{key}': {source}")]
    ResolutionFailure {
        key: String,
        #[source]
        source: anyhow::Error,
    },

    /// Rejected construction parameters
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

impl CacheError {
    /// Wraps a resolver error for `key`.
    pub fn resolution(key: impl Into<String>, source: anyhow::Error) -> Self {
        CacheError::ResolutionFailure {
            key: key.into(),
            source,
        }
    }
}

// == Result Type Alias ==
/// Convenience Result type for the resolve cache.
pub type Result<T> = std::result::Result<T, CacheError>;
