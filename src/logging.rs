//! Logging setup
//!
//! Installs a tracing subscriber for binaries and tests that embed the cache.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Installs a global fmt subscriber filtered by `RUST_LOG`.
///
/// Falls back to `default_directive` (e.g. `"dns_cache=info"`) when `RUST_LOG`
/// is unset or invalid. Returns false if a global subscriber already exists.
pub fn init_tracing(default_directive: &str) -> bool {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_directive.into()))
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .is_ok()
}
