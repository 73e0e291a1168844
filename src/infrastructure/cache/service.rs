//! Cache service trait and error types.

use async_trait::async_trait;

/// Errors that can occur inside cache backends.
///
/// These are logged by the backend and never reach the resolution path.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("cache connection error: {0}")]
    ConnectionError(String),

    #[error("cache operation error: {0}")]
    OperationError(String),

    #[error("cache operation timed out after {0}ms")]
    Timeout(u64),
}

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Best-effort key/value cache with per-entry TTL.
///
/// Keys are short codes, or long URLs for the write-time re-shorten entry.
/// Implementations must be thread-safe and fail open: a backend failure is a
/// miss on read and a logged no-op on write, never an error to the caller.
///
/// # Implementations
///
/// - [`crate::infrastructure::cache::RedisCache`] - Redis-backed cache with TTL support
/// - [`crate::infrastructure::cache::MemoryCache`] - In-process cache with TTL support
/// - [`crate::infrastructure::cache::NullCache`] - Disabled cache, always unavailable
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CacheService: Send + Sync {
    /// Returns the cached value for `key`, or `None` on a miss or backend error.
    async fn get(&self, key: &str) -> Option<String>;

    /// Stores `value` under `key` for `ttl_seconds`. Failures are logged and dropped.
    async fn set_with_ttl(&self, key: &str, value: &str, ttl_seconds: u64);

    /// Liveness probe. When `false`, callers skip the cache entirely.
    async fn is_available(&self) -> bool;
}
