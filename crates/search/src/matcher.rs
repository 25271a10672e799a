//! Per-item match decision.
//!
//! A query matches an item when it is a case-insensitive substring of the
//! title or author. Otherwise each query word is compared against the words
//! of the title and author, and a single word within the edit-distance
//! threshold is enough to include the item.

use crate::error::{Result, SearchError};
use crate::fuzzy::within_distance;
use crate::tokenize::token_pool;
use crate::Searchable;
use serde::{Deserialize, Serialize};

/// Edit-distance thresholds for the fuzzy fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchOptions {
    /// Queries with fewer characters than this use `short_threshold`
    pub short_query_len: usize,
    /// Maximum distance for short queries
    pub short_threshold: usize,
    /// Maximum distance for all other queries
    pub long_threshold: usize,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            short_query_len: 5,
            short_threshold: 1,
            long_threshold: 2,
        }
    }
}

impl MatchOptions {
    /// Build options, rejecting a short threshold above the long one.
    pub fn new(short_query_len: usize, short_threshold: usize, long_threshold: usize) -> Result<Self> {
        if short_threshold > long_threshold {
            return Err(SearchError::InvalidOptions(format!(
                "short threshold {short_threshold} exceeds long threshold {long_threshold}"
            )));
        }
        Ok(Self {
            short_query_len,
            short_threshold,
            long_threshold,
        })
    }

    /// Threshold for an already normalized query.
    #[inline]
    pub fn threshold_for(&self, normalized_query: &str) -> usize {
        if normalized_query.chars().count() < self.short_query_len {
            self.short_threshold
        } else {
            self.long_threshold
        }
    }
}

/// A query normalized once and reused across many items.
#[derive(Debug, Clone)]
pub struct QueryMatcher {
    query: String,
    threshold: usize,
}

impl QueryMatcher {
    /// Normalize `query` (trim + lower-case) and pick its threshold.
    pub fn new(query: &str, options: &MatchOptions) -> Self {
        let query = query.trim().to_lowercase();
        let threshold = options.threshold_for(&query);
        Self { query, threshold }
    }

    /// The normalized query text.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Maximum edit distance used by the fuzzy fallback.
    pub fn threshold(&self) -> usize {
        self.threshold
    }

    /// Whether the query places no restriction on items.
    pub fn is_empty(&self) -> bool {
        self.query.is_empty()
    }

    /// Decide whether `item` matches.
    pub fn is_match<T: Searchable + ?Sized>(&self, item: &T) -> bool {
        if self.query.is_empty() {
            return true;
        }

        let title = item.title();
        let author = item.author();

        if title.to_lowercase().contains(&self.query) || author.to_lowercase().contains(&self.query) {
            return true;
        }

        let pool = token_pool([title, author]);
        self.query.split_whitespace().any(|word| {
            pool.iter()
                .any(|candidate| within_distance(word, candidate, self.threshold))
        })
    }
}

/// Check whether `item` matches `query` with the default thresholds.
///
/// # Example
/// ```
/// use rimas_search::{matches, SearchItem};
///
/// let book = SearchItem::new(1, "Clean Code", "Robert Martin", "Tech");
/// assert!(matches(&book, "clean cade"));
/// assert!(!matches(&book, "zzzzz"));
/// ```
pub fn matches<T: Searchable + ?Sized>(item: &T, query: &str) -> bool {
    matches_with(item, query, &MatchOptions::default())
}

/// Check whether `item` matches `query` with explicit thresholds.
pub fn matches_with<T: Searchable + ?Sized>(item: &T, query: &str, options: &MatchOptions) -> bool {
    QueryMatcher::new(query, options).is_match(item)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SearchItem;
    use proptest::prelude::*;

    fn clean_code() -> SearchItem {
        SearchItem::new(1, "Clean Code", "Robert Martin", "Tech")
    }

    #[test]
    fn test_empty_query_matches() {
        assert!(matches(&clean_code(), ""));
        assert!(matches(&clean_code(), "   "));
    }

    #[test]
    fn test_substring_of_title() {
        assert!(matches(&clean_code(), "ean co"));
        assert!(matches(&clean_code(), "  CLEAN  "));
    }

    #[test]
    fn test_substring_of_author() {
        assert!(matches(&clean_code(), "martin"));
    }

    #[test]
    fn test_typo_falls_back_to_fuzzy() {
        assert!(matches(&clean_code(), "clean cade"));
        assert!(matches(&clean_code(), "cade"));
        assert!(matches(&clean_code(), "robret"));
    }

    #[test]
    fn test_far_query_excluded() {
        assert!(!matches(&clean_code(), "zzzzz"));
        assert!(!matches(&clean_code(), "history"));
    }

    #[test]
    fn test_short_query_threshold_is_one() {
        // "cxdx" is 2 edits from "code"; a 4-char query only tolerates 1.
        assert!(!matches(&clean_code(), "cxdx"));
        // The same two edits pass once the query is long enough.
        assert!(matches(&clean_code(), "rxbxrt"));
    }

    #[test]
    fn test_any_single_word_suffices() {
        assert!(matches(&clean_code(), "qqqqqq martn"));
    }

    #[test]
    fn test_threshold_counts_chars() {
        let options = MatchOptions::default();
        assert_eq!(options.threshold_for("كتاب"), 1);
        assert_eq!(options.threshold_for("clean"), 2);
    }

    #[test]
    fn test_options_reject_inverted_thresholds() {
        assert!(matches!(MatchOptions::new(5, 3, 2), Err(SearchError::InvalidOptions(_))));
        assert_eq!(MatchOptions::new(5, 1, 2).unwrap(), MatchOptions::default());
    }

    #[test]
    fn test_strict_options() {
        let exact_only = MatchOptions::new(5, 0, 0).unwrap();
        assert!(!matches_with(&clean_code(), "cade", &exact_only));
        assert!(matches_with(&clean_code(), "code", &exact_only));
    }

    #[test]
    fn test_query_matcher_normalizes() {
        let matcher = QueryMatcher::new("  Clean CADE ", &MatchOptions::default());
        assert_eq!(matcher.query(), "clean cade");
        assert_eq!(matcher.threshold(), 2);
        assert!(!matcher.is_empty());
    }

    proptest! {
        #[test]
        fn prop_title_substring_always_matches(start in 0usize..10, len in 1usize..10) {
            let title = "Clean Code";
            let end = (start + len).min(title.len());
            prop_assume!(start < end);
            let needle = title[start..end].to_uppercase();
            prop_assert!(matches(&clean_code(), &needle));
        }

        #[test]
        fn prop_author_substring_always_matches(start in 0usize..13, len in 1usize..13) {
            let author = "Robert Martin";
            let end = (start + len).min(author.len());
            prop_assume!(start < end);
            let needle = author[start..end].to_uppercase();
            prop_assert!(matches(&clean_code(), &needle));
        }
    }
}
