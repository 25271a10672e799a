//! WASM bindings for the search crate.
//!
//! Collections cross the boundary as JSON strings, like the other browser
//! bindings in this workspace.

use crate::{filter, highlight_segments, levenshtein_distance, suggest, SearchError, SearchItem};
use wasm_bindgen::prelude::*;

fn to_js(err: SearchError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Calculate Levenshtein edit distance between two strings.
#[wasm_bindgen]
pub fn edit_distance(a: &str, b: &str) -> usize {
    levenshtein_distance(a, b)
}

/// Filter books by category and query.
///
/// # Arguments
/// * `items_json` - JSON array of books with `id`, `title`, `author`, `category`
/// * `category` - Category name or the all-categories sentinel
/// * `query` - Raw search box text
///
/// # Returns
/// JSON array of the kept books, in input order, with all their fields
#[wasm_bindgen]
pub fn filter_books(items_json: &str, category: &str, query: &str) -> Result<String, JsValue> {
    let items: Vec<SearchItem> = serde_json::from_str(items_json)
        .map_err(|e| to_js(SearchError::from(e)))?;

    let kept = filter(&items, category, query);

    serde_json::to_string(&kept).map_err(|e| to_js(SearchError::from(e)))
}

/// Suggest titles and authors containing the query.
///
/// # Arguments
/// * `universe_json` - JSON array of strings
/// * `query` - Raw search box text
/// * `cap` - Maximum number of suggestions
///
/// # Returns
/// JSON object `{ "items": [...], "visible": bool }`
#[wasm_bindgen]
pub fn suggest_titles(universe_json: &str, query: &str, cap: usize) -> Result<String, JsValue> {
    let universe: Vec<String> = serde_json::from_str(universe_json)
        .map_err(|e| to_js(SearchError::from(e)))?;

    serde_json::to_string(&suggest(&universe, query, cap)).map_err(|e| to_js(SearchError::from(e)))
}

/// Split a suggestion into plain and emphasized pieces.
///
/// Pieces are returned instead of offsets because Rust byte offsets do not
/// line up with JavaScript string indices.
///
/// # Returns
/// JSON array of `{ "text": string, "highlighted": bool }`
#[wasm_bindgen]
pub fn highlight(suggestion: &str, query: &str) -> String {
    let segments = highlight_segments(suggestion, query);
    serde_json::to_string(&segments).unwrap_or_else(|_| "[]".to_string())
}
