//! Domain layer: short code scheme, cache policy, entities and storage contracts.
//!
//! Nothing here depends on the HTTP layer or on a concrete database or cache.
//!
//! # Architecture
//!
//! - [`codec`] - Fixed-width base-62 identifier <-> short code bijection
//! - [`cache_policy`] - Popularity-adaptive cache TTLs
//! - [`entities`] - Stored records and resolution outcomes
//! - [`repositories`] - Durable store trait implemented by infrastructure
//!
//! # Resolution Flow
//!
//! 1. The short code is parsed; malformed codes resolve to "not found"
//! 2. The cache is consulted by short code
//! 3. On a miss the code is decoded to its identifier and the store is hit
//!    with an atomic fetch-and-increment
//! 4. The result is cached with a TTL from [`cache_policy::ttl_for_hits`]

pub mod cache_policy;
pub mod codec;
pub mod entities;
pub mod repositories;
