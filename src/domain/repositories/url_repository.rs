//! Repository trait for the durable URL store.

use async_trait::async_trait;

use crate::domain::codec::Identifier;
use crate::domain::entities::Fetched;

/// Errors returned by [`UrlRepository`] implementations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// No record carries the requested identifier.
    #[error("no url record with id {0}")]
    NotFound(Identifier),

    /// The backing database failed or was unreachable.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A stored value could not be represented in the domain model.
    #[error("corrupt record: {0}")]
    Corrupt(String),
}

/// Durable, counter-indexed store of URL records.
///
/// Every method is a single all-or-nothing operation. The store owns
/// identifier allocation: identifiers are unique, increase monotonically and
/// are never reused, even if a caller fails between allocation and code
/// assignment.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgUrlRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::InMemoryUrlRepository`] - In-process implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UrlRepository: Send + Sync {
    /// Inserts a record for `long_url` with a fresh identifier, no short code
    /// and a zero hit count, returning the identifier.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Database`] on backend failures.
    async fn allocate_and_store(&self, long_url: &str) -> Result<Identifier, StoreError>;

    /// Sets the short code of the record with identifier `id`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no such record exists.
    async fn assign_short_code(&self, id: Identifier, short_code: &str) -> Result<(), StoreError>;

    /// Atomically increments the hit count of record `id` and returns its long
    /// URL with the post-increment count.
    ///
    /// Concurrent calls on the same record never lose increments.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no such record exists.
    async fn fetch_and_increment(&self, id: Identifier) -> Result<Fetched, StoreError>;

    /// Reads the hit count of record `id` without modifying it.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no such record exists.
    async fn fetch_hit_count(&self, id: Identifier) -> Result<u64, StoreError>;

    /// Liveness probe. Never fails; returns `false` on any error.
    async fn ping(&self) -> bool;
}
