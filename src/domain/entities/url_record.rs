//! Stored URL mapping.

use chrono::{DateTime, Utc};

use crate::domain::codec::Identifier;

/// A row of the durable URL table.
///
/// `short_code` is `None` only in the window between identifier allocation and
/// code assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlRecord {
    pub id: Identifier,
    pub long_url: String,
    pub short_code: Option<String>,
    pub hit_count: u64,
    pub created_at: DateTime<Utc>,
}

impl UrlRecord {
    /// Creates a freshly allocated record with no code and zero hits.
    pub fn new(id: Identifier, long_url: String) -> Self {
        Self {
            id,
            long_url,
            short_code: None,
            hit_count: 0,
            created_at: Utc::now(),
        }
    }
}

/// Result of a successful fetch-and-increment on the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fetched {
    pub long_url: String,
    /// Hit count after this fetch was counted.
    pub hit_count: u64,
}
