//! Duplicate-query response cache
//!
//! Maps normalized query text to the full response previously produced for
//! it, so repeated questions are answered without contacting the upstream
//! service. In-memory and process-lifetime only; unbounded by design (see
//! DESIGN.md for the open question on eviction).

use std::collections::HashMap;

/// Normalize user input into a cache key: lower-cased and trimmed
pub fn normalize_query(text: &str) -> String {
    text.trim().to_lowercase()
}

/// In-memory cache of full responses keyed by normalized query
///
/// Last write wins: re-answering a query overwrites the previous entry.
#[derive(Debug, Default)]
pub struct ResponseCache {
    entries: HashMap<String, String>,
}

impl ResponseCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up the cached response for a query (normalizes internally)
    pub fn get(&self, query: &str) -> Option<&str> {
        self.entries.get(&normalize_query(query)).map(String::as_str)
    }

    /// Store a response under the normalized form of `query`
    pub fn insert(&mut self, query: &str, response: String) {
        self.entries.insert(normalize_query(query), response);
    }

    /// Number of cached entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if nothing has been cached yet
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
