//! Cache lifetime policy for URL mappings.
//!
//! Lifetimes grow with observed popularity: hot mappings stay cached for a day,
//! cold ones expire after five minutes.

/// TTL for the entries written when a short URL is created (hit count is 0).
pub const CREATION_TTL_SECS: u64 = 300;

const COLD_TTL_SECS: u64 = 300;
const WARM_TTL_SECS: u64 = 3_600;
const HOT_TTL_SECS: u64 = 86_400;

const WARM_THRESHOLD: u64 = 100;
const HOT_THRESHOLD: u64 = 1_000;

/// Returns the cache TTL in seconds for a mapping observed with `hit_count` hits.
///
/// | hit_count     | TTL     |
/// |---------------|---------|
/// | `> 1000`      | 86400 s |
/// | `101..=1000`  | 3600 s  |
/// | `<= 100`      | 300 s   |
pub fn ttl_for_hits(hit_count: u64) -> u64 {
    if hit_count > HOT_THRESHOLD {
        HOT_TTL_SECS
    } else if hit_count > WARM_THRESHOLD {
        WARM_TTL_SECS
    } else {
        COLD_TTL_SECS
    }
}
