//! Cache keys derived from search parameters

use std::fmt;

use crate::data::SearchParams;

/// Deterministic key for one search
///
/// Built from the ordered tuple (query, cuisine, maxReadyTime) joined with `-`.
/// Absent fields and empty strings produce the same key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    /// Builds a key from the three search fields
    pub fn new(query: Option<&str>, cuisine: Option<&str>, max_ready_time: Option<&str>) -> Self {
        Self(format!(
            "{}-{}-{}",
            query.unwrap_or_default(),
            cuisine.unwrap_or_default(),
            max_ready_time.unwrap_or_default()
        ))
    }

    /// Returns the key as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&SearchParams> for CacheKey {
    fn from(params: &SearchParams) -> Self {
        Self::new(
            params.query.as_deref(),
            params.cuisine.as_deref(),
            params.max_ready_time.as_deref(),
        )
    }
}

impl From<&str> for CacheKey {
    fn from(raw: &str) -> Self {
        Self(raw.to_string())
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
