//! Category + text filtering over the whole catalog.
//!
//! The filter is stable: kept items appear in their original relative order.
//! With the `parallel` feature, large inputs are evaluated with rayon, whose
//! indexed `collect` keeps that order.

use crate::matcher::{MatchOptions, QueryMatcher};
use crate::Searchable;
use serde::{Deserialize, Serialize};

/// Category value meaning "no category restriction".
pub const ALL_CATEGORIES: &str = "الكل";

/// Inputs shorter than this are filtered sequentially.
#[cfg(feature = "parallel")]
const PARALLEL_MIN_ITEMS: usize = 512;

/// Settings shared by every filter invocation in a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOptions {
    /// Sentinel category that disables category filtering
    pub all_category: String,
    /// Fuzzy fallback thresholds
    pub matching: MatchOptions,
}

impl Default for FilterOptions {
    fn default() -> Self {
        Self {
            all_category: ALL_CATEGORIES.to_string(),
            matching: MatchOptions::default(),
        }
    }
}

/// Keep the items in `category` (or all, for the sentinel) that match `query`.
///
/// # Example
/// ```
/// use rimas_search::{filter, SearchItem, ALL_CATEGORIES};
///
/// let books = vec![
///     SearchItem::new(1, "Clean Code", "Robert Martin", "Tech"),
///     SearchItem::new(2, "Dune", "Frank Herbert", "Novels"),
/// ];
///
/// assert_eq!(filter(&books, "Tech", "").len(), 1);
/// assert_eq!(filter(&books, ALL_CATEGORIES, "dune")[0].id, 2);
/// ```
pub fn filter<'a, T>(items: &'a [T], category: &str, query: &str) -> Vec<&'a T>
where
    T: Searchable + Sync,
{
    filter_with(items, category, query, &FilterOptions::default())
}

/// [`filter`] with explicit options.
pub fn filter_with<'a, T>(
    items: &'a [T],
    category: &str,
    query: &str,
    options: &FilterOptions,
) -> Vec<&'a T>
where
    T: Searchable + Sync,
{
    filter_indices(items, category, query, options)
        .into_iter()
        .map(|i| &items[i])
        .collect()
}

/// Positions of the kept items, in ascending order.
pub fn filter_indices<T>(items: &[T], category: &str, query: &str, options: &FilterOptions) -> Vec<usize>
where
    T: Searchable + Sync,
{
    let any_category = category == options.all_category;
    let matcher = QueryMatcher::new(query, &options.matching);
    let keep = |item: &T| (any_category || item.category() == category) && matcher.is_match(item);

    #[cfg(feature = "parallel")]
    {
        if items.len() >= PARALLEL_MIN_ITEMS {
            use rayon::prelude::*;
            return items
                .par_iter()
                .enumerate()
                .filter(|(_, item)| keep(item))
                .map(|(i, _)| i)
                .collect();
        }
    }

    items
        .iter()
        .enumerate()
        .filter(|(_, item)| keep(item))
        .map(|(i, _)| i)
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct MemoKey {
    revision: u64,
    category: String,
    query: String,
    options: FilterOptions,
}

/// Hit/miss counts of a [`FilterMemo`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MemoStats {
    /// Calls answered from the stored result
    pub hits: u64,
    /// Calls that recomputed
    pub misses: u64,
}

/// Remembers the last filter result and recomputes only when an input changes.
///
/// `revision` is a version number the owner of the items bumps on every
/// mutation; the memo never inspects the items to detect changes.
#[derive(Debug, Clone, Default)]
pub struct FilterMemo {
    key: Option<MemoKey>,
    indices: Vec<usize>,
    stats: MemoStats,
}

impl FilterMemo {
    /// Create an empty memo.
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter `items`, reusing the previous result when the inputs are unchanged.
    pub fn filter<'a, T>(
        &mut self,
        items: &'a [T],
        revision: u64,
        category: &str,
        query: &str,
        options: &FilterOptions,
    ) -> Vec<&'a T>
    where
        T: Searchable + Sync,
    {
        let fresh = self.key.as_ref().is_some_and(|key| {
            key.revision == revision
                && key.category == category
                && key.query == query
                && key.options == *options
        });

        if fresh {
            self.stats.hits += 1;
        } else {
            self.indices = filter_indices(items, category, query, options);
            self.key = Some(MemoKey {
                revision,
                category: category.to_string(),
                query: query.to_string(),
                options: options.clone(),
            });
            self.stats.misses += 1;
            tracing::debug!(
                revision,
                category,
                query,
                kept = self.indices.len(),
                total = items.len(),
                "Filter recomputed"
            );
        }

        self.indices.iter().filter_map(|&i| items.get(i)).collect()
    }

    /// Drop the stored result so the next call recomputes.
    pub fn invalidate(&mut self) {
        self.key = None;
        self.indices.clear();
    }

    /// Hit/miss counts since creation.
    pub fn stats(&self) -> MemoStats {
        self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SearchItem;
    use proptest::prelude::*;

    fn books() -> Vec<SearchItem> {
        vec![
            SearchItem::new(1, "Clean Code", "Robert Martin", "Tech"),
            SearchItem::new(2, "Dune", "Frank Herbert", "Novels"),
            SearchItem::new(3, "Clean Architecture", "Robert Martin", "Tech"),
            SearchItem::new(4, "The Muqaddimah", "Ibn Khaldun", "History"),
            SearchItem::new(5, "Atomic Habits", "James Clear", "Self-Help"),
        ]
    }

    fn ids(items: &[&SearchItem]) -> Vec<u64> {
        items.iter().map(|b| b.id).collect()
    }

    #[test]
    fn test_all_sentinel_keeps_every_category() {
        let books = books();
        assert_eq!(filter(&books, ALL_CATEGORIES, "").len(), books.len());
    }

    #[test]
    fn test_category_equality() {
        let books = books();
        assert_eq!(ids(&filter(&books, "Tech", "")), vec![1, 3]);
        assert_eq!(ids(&filter(&books, "History", "")), vec![4]);
    }

    #[test]
    fn test_unknown_category_matches_nothing() {
        let books = books();
        assert!(filter(&books, "Poetry", "").is_empty());
        assert!(filter(&books, "tech", "").is_empty());
    }

    #[test]
    fn test_category_then_query() {
        let books = books();
        assert_eq!(ids(&filter(&books, "Tech", "architecture")), vec![3]);
        assert!(filter(&books, "Novels", "martin").is_empty());
    }

    #[test]
    fn test_fuzzy_through_filter() {
        let books = books();
        assert_eq!(ids(&filter(&books, ALL_CATEGORIES, "clean cade")), vec![1, 3, 5]);
        assert_eq!(ids(&filter(&books, ALL_CATEGORIES, "khaldoun")), vec![4]);
    }

    #[test]
    fn test_idempotent() {
        let books = books();
        let first = filter(&books, ALL_CATEGORIES, "robert");
        let second = filter(&books, ALL_CATEGORIES, "robert");
        assert_eq!(first, second);
    }

    #[test]
    fn test_custom_sentinel() {
        let books = books();
        let options = FilterOptions {
            all_category: "All".to_string(),
            ..FilterOptions::default()
        };
        assert_eq!(filter_with(&books, "All", "", &options).len(), 5);
        assert!(filter_with(&books, ALL_CATEGORIES, "", &options).is_empty());
    }

    #[test]
    fn test_large_input_keeps_order() {
        let books: Vec<SearchItem> = (0..2000)
            .map(|i| {
                let category = if i % 3 == 0 { "Tech" } else { "Novels" };
                SearchItem::new(i, format!("Book {i}"), "Anon", category)
            })
            .collect();

        let kept = ids(&filter(&books, "Tech", ""));
        assert_eq!(kept.len(), 667);
        assert!(kept.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_memo_hits_until_inputs_change() {
        let books = books();
        let options = FilterOptions::default();
        let mut memo = FilterMemo::new();

        let first = ids(&memo.filter(&books, 0, "Tech", "clean", &options));
        let again = ids(&memo.filter(&books, 0, "Tech", "clean", &options));
        assert_eq!(first, again);
        assert_eq!(memo.stats(), MemoStats { hits: 1, misses: 1 });

        memo.filter(&books, 1, "Tech", "clean", &options);
        memo.filter(&books, 1, ALL_CATEGORIES, "clean", &options);
        memo.filter(&books, 1, ALL_CATEGORIES, "dune", &options);
        assert_eq!(memo.stats().misses, 4);

        memo.invalidate();
        memo.filter(&books, 1, ALL_CATEGORIES, "dune", &options);
        assert_eq!(memo.stats(), MemoStats { hits: 1, misses: 5 });
    }

    #[test]
    fn test_memo_matches_direct_filter() {
        let books = books();
        let options = FilterOptions::default();
        let mut memo = FilterMemo::new();
        assert_eq!(
            memo.filter(&books, 7, ALL_CATEGORIES, "martin", &options),
            filter(&books, ALL_CATEGORIES, "martin")
        );
    }

    proptest! {
        #[test]
        fn prop_filter_preserves_order(query in "[a-z ]{0,6}", pick in 0usize..5) {
            let books = books();
            let categories = ["Tech", "Novels", "History", "Self-Help", ALL_CATEGORIES];
            let kept = ids(&filter(&books, categories[pick], &query));
            prop_assert!(kept.windows(2).all(|w| w[0] < w[1]));
        }

        #[test]
        fn prop_sentinel_never_excludes_by_category(query in "[a-z ]{0,6}") {
            let books = books();
            let all = filter(&books, ALL_CATEGORIES, &query);
            let by_category: usize = ["Tech", "Novels", "History", "Self-Help"]
                .iter()
                .map(|c| filter(&books, c, &query).len())
                .sum();
            prop_assert_eq!(all.len(), by_category);
        }
    }
}
