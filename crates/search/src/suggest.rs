//! Autocomplete suggestions for the search box.
//!
//! Suggestions use a plain case-insensitive substring test, which is cheaper
//! and stricter than the catalog filter's fuzzy fallback.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Default maximum number of suggestions.
pub const DEFAULT_SUGGESTION_CAP: usize = 7;

/// Result of [`suggest`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestions {
    /// Matching universe entries, in universe order
    pub items: Vec<String>,
    /// Whether the list should be shown at all
    pub visible: bool,
}

/// Suggest up to `cap` entries of `universe` containing `query`.
///
/// A blank query yields no suggestions and `visible == false`.
///
/// # Example
/// ```
/// use rimas_search::suggest;
///
/// let universe = ["Clean Code", "Clean Architecture", "Refactoring"];
/// let suggestions = suggest(&universe, "clean", 7);
/// assert_eq!(suggestions.items, vec!["Clean Code", "Clean Architecture"]);
/// ```
pub fn suggest<S: AsRef<str>>(universe: &[S], query: &str, cap: usize) -> Suggestions {
    if query.trim().is_empty() {
        return Suggestions::default();
    }

    let needle = query.to_lowercase();
    let mut seen = HashSet::new();
    let items: Vec<String> = universe
        .iter()
        .map(AsRef::as_ref)
        .filter(|entry| entry.to_lowercase().contains(&needle))
        .filter(|entry| seen.insert(*entry))
        .take(cap)
        .map(str::to_string)
        .collect();

    let visible = !items.is_empty();
    Suggestions { items, visible }
}

/// Flatten searchable fields into a deduplicated universe, keeping first-seen order.
pub fn build_universe<'a, I>(fields: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen = HashSet::new();
    fields
        .into_iter()
        .filter(|field| !field.trim().is_empty())
        .filter(|field| seen.insert(*field))
        .map(str::to_string)
        .collect()
}

/// State of the suggestion dropdown under the search input.
///
/// The UI layer reports focus, typing, clicks outside the control and
/// choices; the box keeps the current query, the computed suggestions, and
/// whether they are shown.
#[derive(Debug, Clone)]
pub struct SuggestionBox {
    cap: usize,
    query: String,
    suggestions: Vec<String>,
    visible: bool,
}

impl Default for SuggestionBox {
    fn default() -> Self {
        Self::new(DEFAULT_SUGGESTION_CAP)
    }
}

impl SuggestionBox {
    /// Create an empty, hidden box showing at most `cap` suggestions.
    pub fn new(cap: usize) -> Self {
        Self {
            cap,
            query: String::new(),
            suggestions: Vec::new(),
            visible: false,
        }
    }

    /// The user typed: store the query, recompute, and show if anything matched.
    pub fn input<S: AsRef<str>>(&mut self, universe: &[S], query: &str) {
        self.query = query.to_string();
        let Suggestions { items, visible } = suggest(universe, query, self.cap);
        self.suggestions = items;
        self.visible = visible;
    }

    /// The search input regained focus.
    pub fn focus(&mut self) {
        self.visible = !self.query.trim().is_empty() && !self.suggestions.is_empty();
    }

    /// Explicit visibility signal, e.g. `false` on a click outside the control.
    ///
    /// Showing an empty list is a no-op.
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible && !self.suggestions.is_empty();
    }

    /// Pick the suggestion at `index`; it becomes the query verbatim and the list hides.
    ///
    /// Returns the new query, or `None` if the list is hidden or `index` is out of range.
    pub fn choose<S: AsRef<str>>(&mut self, universe: &[S], index: usize) -> Option<String> {
        let chosen = self.visible_suggestions().get(index)?.clone();
        self.input(universe, &chosen);
        self.visible = false;
        Some(chosen)
    }

    /// Current query text.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Whether the dropdown is shown.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Suggestions to render; empty while hidden.
    pub fn visible_suggestions(&self) -> &[String] {
        if self.visible {
            &self.suggestions
        } else {
            &[]
        }
    }
}
