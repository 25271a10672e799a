//! Catalog search for the Rimas bookstore.
//!
//! This crate provides:
//! - Levenshtein edit distance
//! - Whitespace tokenization into word sets
//! - A two-tier match: substring first, per-word edit distance as fallback
//! - Stable category + text filtering, with optional memoization
//! - Autocomplete suggestions and highlight spans
//! - WASM bindings for browser usage
//!
//! # Example
//!
//! ```
//! use rimas_search::{filter, suggest, SearchItem, ALL_CATEGORIES};
//!
//! let books = vec![
//!     SearchItem::new(1, "Clean Code", "Robert Martin", "Tech"),
//!     SearchItem::new(2, "Refactoring", "Martin Fowler", "Tech"),
//! ];
//!
//! // "cade" is one edit away from "code"
//! let found = filter(&books, ALL_CATEGORIES, "clean cade");
//! assert_eq!(found.len(), 1);
//!
//! let universe = ["Clean Code", "Robert Martin", "Refactoring", "Martin Fowler"];
//! assert_eq!(suggest(&universe, "martin", 7).items.len(), 2);
//! ```

mod error;
pub mod filter;
mod fuzzy;
mod highlight;
mod matcher;
pub mod suggest;
mod tokenize;

#[cfg(feature = "wasm")]
mod wasm;

pub use error::{Result, SearchError};
pub use filter::{filter, filter_indices, filter_with, FilterMemo, FilterOptions, MemoStats, ALL_CATEGORIES};
pub use fuzzy::{levenshtein_distance, within_distance};
pub use highlight::{highlight_segments, highlight_spans, Segment};
pub use matcher::{matches, matches_with, MatchOptions, QueryMatcher};
pub use suggest::{build_universe, suggest, SuggestionBox, Suggestions, DEFAULT_SUGGESTION_CAP};
pub use tokenize::{token_pool, tokenize};

use serde::{Deserialize, Serialize};

/// Anything the search engine can match and filter.
pub trait Searchable {
    /// Title text, searched by substring and by word
    fn title(&self) -> &str;
    /// Author text, searched by substring and by word
    fn author(&self) -> &str;
    /// Category name, compared by equality
    fn category(&self) -> &str;
}

impl<T: Searchable + ?Sized> Searchable for &T {
    fn title(&self) -> &str {
        (**self).title()
    }

    fn author(&self) -> &str {
        (**self).author()
    }

    fn category(&self) -> &str {
        (**self).category()
    }
}

/// A minimal searchable record.
///
/// Fields other than the searchable ones are kept in `extra`, so records
/// decoded from JSON serialize back unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchItem {
    /// Stable identifier
    pub id: u64,
    /// Title
    pub title: String,
    /// Author
    pub author: String,
    /// Category name
    pub category: String,
    /// Remaining fields of the source record
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl SearchItem {
    /// Create an item with no extra fields.
    pub fn new(
        id: u64,
        title: impl Into<String>,
        author: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            author: author.into(),
            category: category.into(),
            extra: serde_json::Map::new(),
        }
    }
}

impl Searchable for SearchItem {
    fn title(&self) -> &str {
        &self.title
    }

    fn author(&self) -> &str {
        &self.author
    }

    fn category(&self) -> &str {
        &self.category
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_item_keeps_extra_fields() {
        let json = r#"{"id":7,"title":"Dune","author":"Frank Herbert","category":"Novels","price":12.5}"#;
        let item: SearchItem = serde_json::from_str(json).unwrap();

        assert_eq!(item.title(), "Dune");
        assert_eq!(item.extra["price"], 12.5);

        let back = serde_json::to_value(&item).unwrap();
        assert_eq!(back["price"], 12.5);
        assert_eq!(back["id"], 7);
    }

    #[test]
    fn test_reference_is_searchable() {
        let item = SearchItem::new(1, "Dune", "Frank Herbert", "Novels");
        let by_ref: Vec<&SearchItem> = vec![&item];
        assert_eq!(filter(&by_ref, "Novels", "dune").len(), 1);
    }
}
