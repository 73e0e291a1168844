//! Redis-backed cache implementation.

use super::service::{CacheError, CacheResult, CacheService};
use crate::config::mask_connection_string;
use async_trait::async_trait;
use redis::{AsyncCommands, Client, RedisResult, aio::ConnectionManager};
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Redis cache for short code and long URL mappings.
///
/// Uses a multiplexed `ConnectionManager` shared by all requests; every command
/// is bounded by `timeout`. All operations are fail-open: errors are logged but
/// don't propagate to callers.
pub struct RedisCache {
    client: ConnectionManager,
    timeout: Duration,
    key_prefix: String,
    /// Outcome of the last availability probe.
    available: AtomicBool,
}

/// Change in reachability between two consecutive probes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Availability {
    Unchanged,
    Lost,
    Restored,
}

/// Stores `up` and reports whether it differs from the previous probe.
fn record_availability(last: &AtomicBool, up: bool) -> Availability {
    match (last.swap(up, Ordering::Relaxed), up) {
        (true, false) => Availability::Lost,
        (false, true) => Availability::Restored,
        _ => Availability::Unchanged,
    }
}

impl RedisCache {
    /// Connects to Redis and validates the connection with a PING.
    ///
    /// # Arguments
    ///
    /// - `redis_url` - Redis connection string (e.g., `"redis://localhost:6379/0"`)
    /// - `timeout` - Bound applied to the connect and to every later command
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::ConnectionError`] if the URL is invalid, the connection cannot
    /// be established, or the PING health check fails.
    pub async fn connect(redis_url: &str, timeout: Duration) -> CacheResult<Self> {
        info!("Connecting to Redis at {}", mask_connection_string(redis_url));

        let client = Client::open(redis_url).map_err(|e| {
            CacheError::ConnectionError(format!("Failed to create Redis client: {}", e))
        })?;

        let manager = tokio::time::timeout(timeout, ConnectionManager::new(client))
            .await
            .map_err(|_| CacheError::Timeout(timeout.as_millis() as u64))?
            .map_err(|e| {
                CacheError::ConnectionError(format!("Failed to connect to Redis: {}", e))
            })?;

        let cache = Self {
            client: manager,
            timeout,
            key_prefix: "pocketurl:".to_string(),
            available: AtomicBool::new(true),
        };

        let mut test_conn = cache.client.clone();
        cache
            .bounded(test_conn.ping::<()>())
            .await
            .map_err(|e| CacheError::ConnectionError(format!("Redis PING failed: {}", e)))?;

        info!("Connected to Redis");

        Ok(cache)
    }

    /// Constructs the full Redis key with namespace prefix.
    fn build_key(&self, key: &str) -> String {
        format!("{}{}", self.key_prefix, key)
    }

    /// Runs a Redis command under the configured timeout.
    async fn bounded<T>(&self, op: impl Future<Output = RedisResult<T>>) -> CacheResult<T> {
        match tokio::time::timeout(self.timeout, op).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => Err(CacheError::OperationError(e.to_string())),
            Err(_) => Err(CacheError::Timeout(self.timeout.as_millis() as u64)),
        }
    }
}

#[async_trait]
impl CacheService for RedisCache {
    async fn get(&self, key: &str) -> Option<String> {
        let full_key = self.build_key(key);
        let mut conn = self.client.clone();

        match self.bounded(conn.get::<_, Option<String>>(&full_key)).await {
            Ok(Some(value)) => {
                debug!("Cache HIT: {}", key);
                Some(value)
            }
            Ok(None) => {
                debug!("Cache MISS: {}", key);
                None
            }
            Err(e) => {
                error!("Redis GET error for {}: {}", key, e);
                None
            }
        }
    }

    async fn set_with_ttl(&self, key: &str, value: &str, ttl_seconds: u64) {
        let full_key = self.build_key(key);
        let mut conn = self.client.clone();

        match self
            .bounded(conn.set_ex::<_, _, ()>(&full_key, value, ttl_seconds))
            .await
        {
            Ok(()) => debug!("Cache SET: {} (TTL: {}s)", key, ttl_seconds),
            Err(e) => warn!("Redis SET error for {}: {}", key, e),
        }
    }

    /// Probes Redis with a PING.
    ///
    /// Runs on every request, so only changes in reachability are logged
    /// above `debug`.
    async fn is_available(&self) -> bool {
        let mut conn = self.client.clone();
        let probe = self.bounded(conn.ping::<()>()).await;
        let up = probe.is_ok();

        match (record_availability(&self.available, up), probe) {
            (Availability::Lost, Err(e)) => warn!("Redis became unavailable: {}", e),
            (Availability::Restored, _) => info!("Redis is available again"),
            (_, Err(e)) => debug!("Redis PING failed: {}", e),
            (_, Ok(())) => {}
        }

        up
    }
}
