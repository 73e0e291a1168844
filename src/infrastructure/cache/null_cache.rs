//! No-op cache implementation for disabled caching.

use super::service::CacheService;
use async_trait::async_trait;
use tracing::debug;

/// A cache that stores nothing and reports itself unavailable.
///
/// Used when no cache backend is configured or Redis was unreachable at
/// startup, so every resolution goes to the durable store.
pub struct NullCache;

impl NullCache {
    /// Creates a new NullCache instance.
    pub fn new() -> Self {
        debug!("Using NullCache (caching disabled)");
        Self
    }
}

impl Default for NullCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CacheService for NullCache {
    async fn get(&self, _key: &str) -> Option<String> {
        None
    }

    async fn set_with_ttl(&self, _key: &str, _value: &str, _ttl_seconds: u64) {}

    async fn is_available(&self) -> bool {
        false
    }
}
