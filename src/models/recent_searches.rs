use serde::{Deserialize, Serialize};

/// Maximum number of remembered queries
pub const RECENT_SEARCHES_LIMIT: usize = 7;

/// Submitted queries, most recent first, without repeats
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct RecentSearches {
    queries: Vec<String>,
}

impl RecentSearches {
    pub fn new() -> Self {
        Self {
            queries: Vec::new(),
        }
    }

    /// Rebuilds history from persisted records, enforcing uniqueness and the cap
    pub fn from_queries(queries: Vec<String>) -> Self {
        let mut recent = Self::new();
        for query in queries {
            if !recent.queries.contains(&query) {
                recent.queries.push(query);
            }
        }
        recent.queries.truncate(RECENT_SEARCHES_LIMIT);
        recent
    }

    /// Moves `query` to the front, evicting the oldest entry past the cap
    pub fn push(&mut self, query: &str) {
        self.queries.retain(|q| q != query);
        self.queries.insert(0, query.to_string());
        self.queries.truncate(RECENT_SEARCHES_LIMIT);
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.queries.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.queries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queries.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.queries
    }
}
