//! Case-insensitive literal prefix matching.
//!
//! # Responsibility
//! - Match item names that start with a caller-provided query string.
//!
//! # Invariants
//! - The query is always treated as literal text; regex metacharacters in
//!   the query never act as wildcards.
//! - An empty query matches every name.

use regex::{Regex, RegexBuilder};

pub type SearchResult<T> = Result<T, SearchError>;

/// Search-layer error for matcher construction.
#[derive(Debug)]
pub enum SearchError {
    InvalidQuery { query: String, message: String },
}

impl std::fmt::Display for SearchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidQuery { query, message } => {
                write!(f, "invalid search query `{query}`: {message}")
            }
        }
    }
}

impl std::error::Error for SearchError {}

/// Compiled case-insensitive literal-prefix matcher.
///
/// Compiled once per query so a scan over the collection does not rebuild
/// the pattern per item.
#[derive(Debug)]
pub struct PrefixMatcher {
    regex: Regex,
}

impl PrefixMatcher {
    /// Builds a matcher for the given literal query.
    pub fn new(query: &str) -> SearchResult<Self> {
        let pattern = format!("^{}", regex::escape(query));
        let regex = RegexBuilder::new(&pattern)
            .case_insensitive(true)
            .build()
            .map_err(|err| SearchError::InvalidQuery {
                query: query.to_string(),
                message: err.to_string(),
            })?;
        Ok(Self { regex })
    }

    /// Whether `name` starts with the query, ignoring case.
    pub fn is_match(&self, name: &str) -> bool {
        self.regex.is_match(name)
    }
}
