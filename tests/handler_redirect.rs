mod common;

use axum::{Router, http::StatusCode, routing::get};
use axum_test::TestServer;
use pocketurl::api::handlers::redirect_handler;
use pocketurl::domain::codec;
use pocketurl::infrastructure::cache::{CacheService, MemoryCache};
use sqlx::PgPool;
use std::sync::Arc;

fn redirect_app(state: pocketurl::AppState) -> Router {
    Router::new()
        .route("/{code}", get(redirect_handler))
        .with_state(state)
}

#[sqlx::test]
async fn test_redirect_success(pool: PgPool) {
    let code = common::create_test_url(&pool, "https://example.com/target", 0).await;

    let state = common::create_test_state(pool.clone());
    let server = TestServer::new(redirect_app(state)).unwrap();

    let response = server.get(&format!("/{}", code)).await;

    response.assert_status(StatusCode::FOUND);
    assert_eq!(response.header("location"), "https://example.com/target");
}

#[sqlx::test]
async fn test_redirect_counts_store_hits(pool: PgPool) {
    let code = common::create_test_url(&pool, "https://example.com", 0).await;

    let state = common::create_test_state(pool.clone());
    let server = TestServer::new(redirect_app(state)).unwrap();

    for _ in 0..3 {
        server
            .get(&format!("/{}", code))
            .await
            .assert_status(StatusCode::FOUND);
    }

    assert_eq!(common::fetch_hit_count(&pool, &code).await, 3);
}

#[sqlx::test]
async fn test_redirect_not_found(pool: PgPool) {
    let state = common::create_test_state(pool);
    let server = TestServer::new(redirect_app(state)).unwrap();

    let response = server.get("/zzzzzzzz").await;

    response.assert_status_not_found();
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"], "URL not found");
}

#[sqlx::test]
async fn test_redirect_malformed_code(pool: PgPool) {
    let state = common::create_test_state(pool);
    let server = TestServer::new(redirect_app(state)).unwrap();

    for code in ["short", "toolongcode", "abc-defg", "favicon.ico"] {
        let response = server.get(&format!("/{}", code)).await;
        response.assert_status_not_found();
    }
}

#[sqlx::test]
async fn test_redirect_served_from_cache_skips_counter(pool: PgPool) {
    let code = common::create_test_url(&pool, "https://example.com/cached", 0).await;

    let cache = Arc::new(MemoryCache::new());
    let state = common::create_test_state_with_cache(pool.clone(), cache.clone());
    let server = TestServer::new(redirect_app(state)).unwrap();

    // First request misses, is counted and populates the cache
    server
        .get(&format!("/{}", code))
        .await
        .assert_status(StatusCode::FOUND);
    assert!(cache.get(&code).await.is_some());
    assert_eq!(cache.ttl_seconds(&code), Some(300));

    let response = server.get(&format!("/{}", code)).await;

    response.assert_status(StatusCode::FOUND);
    assert_eq!(response.header("location"), "https://example.com/cached");
    assert_eq!(common::fetch_hit_count(&pool, &code).await, 1);
}

#[sqlx::test]
async fn test_redirect_popular_url_cached_longer(pool: PgPool) {
    let code = common::create_test_url(&pool, "https://example.com/popular", 5_000).await;

    let cache = Arc::new(MemoryCache::new());
    let state = common::create_test_state_with_cache(pool, cache.clone());
    let server = TestServer::new(redirect_app(state)).unwrap();

    server
        .get(&format!("/{}", code))
        .await
        .assert_status(StatusCode::FOUND);

    assert_eq!(cache.ttl_seconds(&code), Some(86_400));
}

#[sqlx::test]
async fn test_redirect_database_down(pool: PgPool) {
    let code = codec::encode(1).unwrap();

    let state = common::create_test_state(pool.clone());
    let server = TestServer::new(redirect_app(state)).unwrap();

    pool.close().await;

    let response = server.get(&format!("/{}", code)).await;

    response.assert_status_internal_server_error();
}
