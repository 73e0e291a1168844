//! PostgreSQL implementation of the URL repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;
use tracing::warn;

use crate::domain::codec::Identifier;
use crate::domain::entities::{Fetched, UrlRecord};
use crate::domain::repositories::{StoreError, UrlRepository};

/// PostgreSQL repository over the `urls` table.
///
/// Identifiers come from the `BIGSERIAL` sequence, which never hands out a
/// value twice even when the inserting transaction rolls back. Each method is a
/// single statement, so the pooled connection is returned on every path.
pub struct PgUrlRepository {
    pool: Arc<PgPool>,
}

#[derive(sqlx::FromRow)]
struct UrlRow {
    id: i64,
    long_url: String,
    short_code: Option<String>,
    hit_count: i64,
    created_at: DateTime<Utc>,
}

impl PgUrlRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    /// Loads a full record by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Database`] on database errors.
    pub async fn find(&self, id: Identifier) -> Result<Option<UrlRecord>, StoreError> {
        let Ok(key) = i64::try_from(id) else {
            return Ok(None);
        };

        let row = sqlx::query_as::<_, UrlRow>(
            r#"
            SELECT id, long_url, short_code, hit_count, created_at
            FROM urls
            WHERE id = $1
            "#,
        )
        .bind(key)
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.map(|r| {
            Ok(UrlRecord {
                id: to_identifier(r.id)?,
                long_url: r.long_url,
                short_code: r.short_code,
                hit_count: to_count(r.hit_count)?,
                created_at: r.created_at,
            })
        })
        .transpose()
    }
}

fn to_identifier(id: i64) -> Result<Identifier, StoreError> {
    Identifier::try_from(id).map_err(|_| StoreError::Corrupt(format!("negative id {}", id)))
}

fn to_count(hits: i64) -> Result<u64, StoreError> {
    u64::try_from(hits).map_err(|_| StoreError::Corrupt(format!("negative hit count {}", hits)))
}

/// Identifiers beyond `i64::MAX` cannot exist in a `BIGSERIAL` column.
fn to_key(id: Identifier) -> Result<i64, StoreError> {
    i64::try_from(id).map_err(|_| StoreError::NotFound(id))
}

#[async_trait]
impl UrlRepository for PgUrlRepository {
    async fn allocate_and_store(&self, long_url: &str) -> Result<Identifier, StoreError> {
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO urls (long_url)
            VALUES ($1)
            RETURNING id
            "#,
        )
        .bind(long_url)
        .fetch_one(self.pool.as_ref())
        .await?;

        to_identifier(id)
    }

    async fn assign_short_code(&self, id: Identifier, short_code: &str) -> Result<(), StoreError> {
        let result = sqlx::query("UPDATE urls SET short_code = $1 WHERE id = $2")
            .bind(short_code)
            .bind(to_key(id)?)
            .execute(self.pool.as_ref())
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(id));
        }

        Ok(())
    }

    async fn fetch_and_increment(&self, id: Identifier) -> Result<Fetched, StoreError> {
        // Single UPDATE ... RETURNING: the row lock serialises concurrent increments.
        let row = sqlx::query_as::<_, (String, i64)>(
            r#"
            UPDATE urls
            SET hit_count = hit_count + 1
            WHERE id = $1
            RETURNING long_url, hit_count
            "#,
        )
        .bind(to_key(id)?)
        .fetch_optional(self.pool.as_ref())
        .await?;

        let (long_url, hit_count) = row.ok_or(StoreError::NotFound(id))?;

        Ok(Fetched {
            long_url,
            hit_count: to_count(hit_count)?,
        })
    }

    async fn fetch_hit_count(&self, id: Identifier) -> Result<u64, StoreError> {
        let hits = sqlx::query_scalar::<_, i64>("SELECT hit_count FROM urls WHERE id = $1")
            .bind(to_key(id)?)
            .fetch_optional(self.pool.as_ref())
            .await?
            .ok_or(StoreError::NotFound(id))?;

        to_count(hits)
    }

    async fn ping(&self) -> bool {
        match sqlx::query("SELECT 1").execute(self.pool.as_ref()).await {
            Ok(_) => true,
            Err(e) => {
                warn!("Database ping failed: {}", e);
                false
            }
        }
    }
}
