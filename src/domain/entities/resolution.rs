//! Outcome of resolving a short code.

use serde::{Deserialize, Serialize};

/// Where a resolved URL came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionSource {
    /// Served from the cache; the durable hit counter was not touched.
    Cache,
    /// Served from the durable store; the hit counter was incremented.
    Store,
}

/// Result of `resolve_short_url`.
///
/// Absence is a normal outcome and is kept apart from faults, which travel in
/// the surrounding `Result`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Found {
        long_url: String,
        /// Hit count as last seen by the store; a lower bound on real traffic.
        hit_count: u64,
        source: ResolutionSource,
    },
    NotFound,
}

impl Resolution {
    pub fn is_found(&self) -> bool {
        matches!(self, Resolution::Found { .. })
    }

    /// Returns the target URL if resolution succeeded.
    pub fn long_url(&self) -> Option<&str> {
        match self {
            Resolution::Found { long_url, .. } => Some(long_url),
            Resolution::NotFound => None,
        }
    }
}

/// Cache value stored under a short-code key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachedUrl {
    pub long_url: String,
    pub hit_count: u64,
}
