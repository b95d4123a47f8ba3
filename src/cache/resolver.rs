//! Resolver Module
//!
//! The upstream capability consulted on a cache miss.

// == Resolver Trait ==
/// Produces a value for a key the cache does not hold.
///
/// Implementations may be slow or fail; the cache calls `resolve` at most once
/// per miss and never retries.
pub trait Resolver {
    /// The resolved payload, handed out by clone on every hit.
    type Value: Clone;

    fn resolve(&self, key: &str) -> anyhow::Result<Self::Value>;
}

impl<F, V> Resolver for F
where
    F: Fn(&str) -> anyhow::Result<V>,
    V: Clone,
{
    type Value = V;

    fn resolve(&self, key: &str) -> anyhow::Result<V> {
        self(key)
    }
}
