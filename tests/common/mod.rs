#![allow(dead_code)]

use pocketurl::application::services::UrlService;
use pocketurl::domain::codec;
use pocketurl::infrastructure::cache::{CacheService, MemoryCache, NullCache};
use pocketurl::infrastructure::persistence::{InMemoryUrlRepository, PgUrlRepository};
use pocketurl::state::AppState;
use sqlx::PgPool;
use std::sync::Arc;

pub const TEST_BASE_URL: &str = "http://localhost:5000";
pub const TEST_POD_NAME: &str = "test-pod";

/// Inserts a stored URL with its short code assigned and returns the code.
pub async fn create_test_url(pool: &PgPool, long_url: &str, hit_count: i64) -> String {
    let id: i64 =
        sqlx::query_scalar("INSERT INTO urls (long_url, hit_count) VALUES ($1, $2) RETURNING id")
            .bind(long_url)
            .bind(hit_count)
            .fetch_one(pool)
            .await
            .unwrap();

    let code = codec::encode(id as u64).unwrap();

    sqlx::query("UPDATE urls SET short_code = $1 WHERE id = $2")
        .bind(&code)
        .bind(id)
        .execute(pool)
        .await
        .unwrap();

    code
}

pub async fn fetch_hit_count(pool: &PgPool, code: &str) -> i64 {
    sqlx::query_scalar("SELECT hit_count FROM urls WHERE short_code = $1")
        .bind(code)
        .fetch_one(pool)
        .await
        .unwrap()
}

/// State backed by PostgreSQL with caching disabled.
pub fn create_test_state(pool: PgPool) -> AppState {
    create_test_state_with_cache(pool, Arc::new(NullCache::new()))
}

pub fn create_test_state_with_cache(pool: PgPool, cache: Arc<dyn CacheService>) -> AppState {
    let store = Arc::new(PgUrlRepository::new(Arc::new(pool)));
    let url_service = Arc::new(UrlService::new(store, cache));

    AppState::new(
        url_service,
        TEST_BASE_URL.to_string(),
        TEST_POD_NAME.to_string(),
    )
}

/// Fully in-process state; handles to the store and cache are returned for assertions.
pub fn create_memory_state() -> (AppState, Arc<InMemoryUrlRepository>, Arc<MemoryCache>) {
    let store = Arc::new(InMemoryUrlRepository::new());
    let cache = Arc::new(MemoryCache::new());
    let url_service = Arc::new(UrlService::new(store.clone(), cache.clone()));

    let state = AppState::new(
        url_service,
        TEST_BASE_URL.to_string(),
        TEST_POD_NAME.to_string(),
    );

    (state, store, cache)
}
