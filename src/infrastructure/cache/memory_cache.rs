//! In-process cache with per-entry expiry.

use super::service::CacheService;
use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Mutex;
use std::time::Duration;
use tokio::time::Instant;
use tracing::debug;

/// Minimum time between two full sweeps of expired entries.
const SWEEP_INTERVAL: Duration = Duration::from_secs(60);

#[derive(Debug, Clone)]
struct Entry {
    value: String,
    ttl_seconds: u64,
    expires_at: Instant,
}

impl Entry {
    fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

/// Cache kept in a sharded concurrent map inside the process.
///
/// Suitable for single-instance deployments without Redis. Expired entries are
/// dropped when read, and writes sweep the whole map at most once a minute,
/// so keys that are never read again do not accumulate.
#[derive(Debug)]
pub struct MemoryCache {
    entries: DashMap<String, Entry>,
    last_sweep: Mutex<Instant>,
}

impl MemoryCache {
    pub fn new() -> Self {
        debug!("Using MemoryCache (in-process)");
        Self {
            entries: DashMap::new(),
            last_sweep: Mutex::new(Instant::now()),
        }
    }

    /// Drops every expired entry and returns how many were removed.
    pub fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let before = self.entries.len();
        self.entries.retain(|_, e| !e.is_expired(now));
        before.saturating_sub(self.entries.len())
    }

    fn sweep_if_due(&self, now: Instant) {
        // A concurrent writer already sweeping is good enough.
        let Ok(mut last) = self.last_sweep.try_lock() else {
            return;
        };
        if now.duration_since(*last) < SWEEP_INTERVAL {
            return;
        }
        *last = now;
        drop(last);

        let removed = self.purge_expired();
        if removed > 0 {
            debug!("Cache SWEEP: removed {} expired entries", removed);
        }
    }

    /// TTL the live entry under `key` was written with.
    pub fn ttl_seconds(&self, key: &str) -> Option<u64> {
        let now = Instant::now();
        self.entries
            .get(key)
            .filter(|e| !e.is_expired(now))
            .map(|e| e.ttl_seconds)
    }

    /// Number of stored entries, including expired ones not yet evicted.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for MemoryCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CacheService for MemoryCache {
    async fn get(&self, key: &str) -> Option<String> {
        let now = Instant::now();
        let hit = self.entries.get(key).map(|e| e.value().clone());

        match hit {
            Some(entry) if !entry.is_expired(now) => {
                debug!("Cache HIT: {}", key);
                Some(entry.value)
            }
            Some(_) => {
                self.entries.remove_if(key, |_, e| e.is_expired(now));
                debug!("Cache EXPIRED: {}", key);
                None
            }
            None => {
                debug!("Cache MISS: {}", key);
                None
            }
        }
    }

    async fn set_with_ttl(&self, key: &str, value: &str, ttl_seconds: u64) {
        let now = Instant::now();
        self.sweep_if_due(now);

        let entry = Entry {
            value: value.to_string(),
            ttl_seconds,
            expires_at: now + Duration::from_secs(ttl_seconds),
        };
        self.entries.insert(key.to_string(), entry);
        debug!("Cache SET: {} (TTL: {}s)", key, ttl_seconds);
    }

    async fn is_available(&self) -> bool {
        true
    }
}
