//! In-process implementation of the URL repository.

use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use crate::domain::codec::Identifier;
use crate::domain::entities::{Fetched, UrlRecord};
use crate::domain::repositories::{StoreError, UrlRepository};

/// URL store held in memory.
///
/// Identifiers come from an atomic counter starting at 1, mirroring a
/// database sequence. Per-record updates take the shard lock, so concurrent
/// increments on one record are never lost.
#[derive(Debug)]
pub struct InMemoryUrlRepository {
    records: DashMap<Identifier, UrlRecord>,
    next_id: AtomicU64,
    online: AtomicBool,
}

impl InMemoryUrlRepository {
    pub fn new() -> Self {
        Self::starting_at(1)
    }

    /// Creates an empty store whose first allocated identifier is `next_id`.
    pub fn starting_at(next_id: Identifier) -> Self {
        Self {
            records: DashMap::new(),
            next_id: AtomicU64::new(next_id),
            online: AtomicBool::new(true),
        }
    }

    /// Simulates the backend going away (`false`) or coming back (`true`).
    pub fn set_online(&self, online: bool) {
        self.online.store(online, Ordering::SeqCst);
    }

    /// Returns a snapshot of the record with identifier `id`.
    pub fn get(&self, id: Identifier) -> Option<UrlRecord> {
        self.records.get(&id).map(|r| r.value().clone())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn ensure_online(&self) -> Result<(), StoreError> {
        if self.online.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(StoreError::Database(sqlx::Error::PoolClosed))
        }
    }
}

impl Default for InMemoryUrlRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UrlRepository for InMemoryUrlRepository {
    async fn allocate_and_store(&self, long_url: &str) -> Result<Identifier, StoreError> {
        self.ensure_online()?;

        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        self.records
            .insert(id, UrlRecord::new(id, long_url.to_string()));

        Ok(id)
    }

    async fn assign_short_code(&self, id: Identifier, short_code: &str) -> Result<(), StoreError> {
        self.ensure_online()?;

        let mut record = self.records.get_mut(&id).ok_or(StoreError::NotFound(id))?;
        record.short_code = Some(short_code.to_string());

        Ok(())
    }

    async fn fetch_and_increment(&self, id: Identifier) -> Result<Fetched, StoreError> {
        self.ensure_online()?;

        let mut record = self.records.get_mut(&id).ok_or(StoreError::NotFound(id))?;
        record.hit_count += 1;

        Ok(Fetched {
            long_url: record.long_url.clone(),
            hit_count: record.hit_count,
        })
    }

    async fn fetch_hit_count(&self, id: Identifier) -> Result<u64, StoreError> {
        self.ensure_online()?;

        self.records
            .get(&id)
            .map(|r| r.hit_count)
            .ok_or(StoreError::NotFound(id))
    }

    async fn ping(&self) -> bool {
        self.online.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_allocation_is_monotonic() {
        let repo = InMemoryUrlRepository::new();

        let a = repo.allocate_and_store("https://a.example").await.unwrap();
        let b = repo.allocate_and_store("https://b.example").await.unwrap();

        assert_eq!(a, 1);
        assert_eq!(b, 2);
        assert_eq!(repo.get(a).unwrap().hit_count, 0);
        assert!(repo.get(a).unwrap().short_code.is_none());
    }

    #[tokio::test]
    async fn test_assign_and_increment() {
        let repo = InMemoryUrlRepository::new();
        let id = repo.allocate_and_store("https://a.example").await.unwrap();

        repo.assign_short_code(id, "00000001").await.unwrap();
        let first = repo.fetch_and_increment(id).await.unwrap();
        let second = repo.fetch_and_increment(id).await.unwrap();

        assert_eq!(repo.get(id).unwrap().short_code.as_deref(), Some("00000001"));
        assert_eq!(first.hit_count, 1);
        assert_eq!(second.hit_count, 2);
        assert_eq!(second.long_url, "https://a.example");
        assert_eq!(repo.fetch_hit_count(id).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_missing_record() {
        let repo = InMemoryUrlRepository::new();

        assert!(matches!(
            repo.assign_short_code(9, "00000009").await,
            Err(StoreError::NotFound(9))
        ));
        assert!(matches!(
            repo.fetch_and_increment(9).await,
            Err(StoreError::NotFound(9))
        ));
        assert!(matches!(
            repo.fetch_hit_count(9).await,
            Err(StoreError::NotFound(9))
        ));
    }

    #[tokio::test]
    async fn test_offline_store_fails_and_ping_reports_it() {
        let repo = InMemoryUrlRepository::new();
        repo.set_online(false);

        assert!(!repo.ping().await);
        assert!(matches!(
            repo.allocate_and_store("https://a.example").await,
            Err(StoreError::Database(_))
        ));

        repo.set_online(true);
        assert!(repo.ping().await);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_increments_are_not_lost() {
        let repo = Arc::new(InMemoryUrlRepository::new());
        let id = repo.allocate_and_store("https://a.example").await.unwrap();

        let mut handles = Vec::new();
        for _ in 0..8 {
            let repo = repo.clone();
            handles.push(tokio::spawn(async move {
                for _ in 0..50 {
                    repo.fetch_and_increment(id).await.unwrap();
                }
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(repo.fetch_hit_count(id).await.unwrap(), 400);
    }
}
