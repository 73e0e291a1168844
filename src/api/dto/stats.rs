//! DTOs for hit count statistics.

use serde::Serialize;

/// Durable hit count for a short code.
///
/// Cache hits are not counted, so this is a lower bound on real traffic.
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub code: String,
    pub hit_count: u64,
}
