//! Short URL creation and resolution service.

use std::sync::Arc;

use metrics::counter;
use tracing::{debug, error, info, warn};

use crate::domain::cache_policy::{CREATION_TTL_SECS, ttl_for_hits};
use crate::domain::codec::ShortCode;
use crate::domain::entities::{CachedUrl, Resolution, ResolutionSource};
use crate::domain::repositories::{StoreError, UrlRepository};
use crate::error::AppError;
use crate::infrastructure::cache::CacheService;
use crate::utils::url_validator::validate_long_url;

/// Orchestrates the durable store and the cache-aside layer.
///
/// The store is the source of truth; the cache only accelerates reads and is
/// bypassed whenever it reports itself unavailable. Cache hits do not touch
/// the durable hit counter, so reported hit counts are a lower bound on real
/// traffic.
pub struct UrlService {
    store: Arc<dyn UrlRepository>,
    cache: Arc<dyn CacheService>,
}

impl UrlService {
    /// Creates a new service over the given collaborators.
    pub fn new(store: Arc<dyn UrlRepository>, cache: Arc<dyn CacheService>) -> Self {
        Self { store, cache }
    }

    /// Stores `long_url` under a fresh identifier and returns its short code.
    ///
    /// # Flow
    ///
    /// 1. Validate the URL (http/https only)
    /// 2. Allocate an identifier in the store
    /// 3. Encode it and assign the code to the record
    /// 4. If the cache is up, write `long_url -> code` and `code -> long_url`
    ///    with the creation TTL
    ///
    /// Nothing is retried here.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for an invalid URL, before the store
    /// is touched.
    ///
    /// Returns [`AppError::Storage`] if a store call fails or the identifier
    /// no longer fits in a short code.
    pub async fn create_short_url(&self, long_url: &str) -> Result<ShortCode, AppError> {
        validate_long_url(long_url).map_err(|e| AppError::bad_request(e.to_string()))?;

        let id = self.store.allocate_and_store(long_url).await?;

        let code = ShortCode::encode(id).map_err(|e| {
            error!("Short code space exhausted: {}", e);
            AppError::storage("Short code capacity exhausted")
        })?;

        self.store.assign_short_code(id, code.as_str()).await?;
        counter!("pocketurl_urls_created_total").increment(1);
        info!("Created short code {} for id {}", code, id);

        if self.cache.is_available().await {
            debug!("Adding {} to cache", code);
            self.cache
                .set_with_ttl(long_url, code.as_str(), CREATION_TTL_SECS)
                .await;
            self.cache_target(&code, long_url, 0, CREATION_TTL_SECS)
                .await;
        }

        Ok(code)
    }

    /// Resolves a short code to its long URL.
    ///
    /// Malformed and unknown codes both yield [`Resolution::NotFound`]. A
    /// cache hit returns immediately without counting the hit; a miss goes to
    /// the store, which atomically counts it, and re-caches the mapping with a
    /// TTL chosen by [`ttl_for_hits`].
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] if the store fails. Cache failures are
    /// never returned.
    pub async fn resolve_short_url(&self, code: &str) -> Result<Resolution, AppError> {
        let code = match ShortCode::parse(code) {
            Ok(code) => code,
            Err(e) => {
                debug!("Rejecting short code {:?}: {}", code, e);
                counter!("pocketurl_resolve_not_found_total").increment(1);
                return Ok(Resolution::NotFound);
            }
        };

        let cache_available = self.cache.is_available().await;

        if cache_available {
            if let Some(cached) = self.cached_target(&code).await {
                debug!("Cache hit for {}", code);
                counter!("pocketurl_cache_hits_total").increment(1);
                return Ok(Resolution::Found {
                    long_url: cached.long_url,
                    hit_count: cached.hit_count,
                    source: ResolutionSource::Cache,
                });
            }
            counter!("pocketurl_cache_misses_total").increment(1);
        }

        let fetched = match self.store.fetch_and_increment(code.identifier()).await {
            Ok(fetched) => fetched,
            Err(StoreError::NotFound(id)) => {
                debug!("No record for {} (id {})", code, id);
                counter!("pocketurl_resolve_not_found_total").increment(1);
                return Ok(Resolution::NotFound);
            }
            Err(e) => return Err(e.into()),
        };

        if cache_available {
            let ttl = ttl_for_hits(fetched.hit_count);
            self.cache_target(&code, &fetched.long_url, fetched.hit_count, ttl)
                .await;
        }

        Ok(Resolution::Found {
            long_url: fetched.long_url,
            hit_count: fetched.hit_count,
            source: ResolutionSource::Store,
        })
    }

    /// Returns the durable hit count for `code` without counting a hit.
    ///
    /// Returns `Ok(None)` for malformed or unknown codes.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] if the store fails.
    pub async fn hit_count(&self, code: &str) -> Result<Option<u64>, AppError> {
        let Ok(code) = ShortCode::parse(code) else {
            return Ok(None);
        };

        match self.store.fetch_hit_count(code.identifier()).await {
            Ok(hits) => Ok(Some(hits)),
            Err(StoreError::NotFound(_)) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Whether the durable store answers a ping.
    pub async fn store_available(&self) -> bool {
        self.store.ping().await
    }

    /// Whether the cache backend is reachable.
    pub async fn cache_available(&self) -> bool {
        self.cache.is_available().await
    }

    async fn cached_target(&self, code: &ShortCode) -> Option<CachedUrl> {
        let raw = self.cache.get(code.as_str()).await?;

        match serde_json::from_str::<CachedUrl>(&raw) {
            Ok(cached) => Some(cached),
            Err(e) => {
                warn!("Ignoring unreadable cache entry for {}: {}", code, e);
                None
            }
        }
    }

    async fn cache_target(&self, code: &ShortCode, long_url: &str, hit_count: u64, ttl: u64) {
        let value = CachedUrl {
            long_url: long_url.to_string(),
            hit_count,
        };

        match serde_json::to_string(&value) {
            Ok(json) => self.cache.set_with_ttl(code.as_str(), &json, ttl).await,
            Err(e) => warn!("Failed to encode cache entry for {}: {}", code, e),
        }
    }
}
