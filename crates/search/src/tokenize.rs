//! Whitespace tokenization of searchable text fields.

use std::collections::HashSet;

/// Lower-case `text` and split it into its set of unique words.
///
/// Whitespace-only input yields an empty set.
pub fn tokenize(text: &str) -> HashSet<String> {
    text.to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// Union of the token sets of several fields.
pub fn token_pool<'a, I>(fields: I) -> HashSet<String>
where
    I: IntoIterator<Item = &'a str>,
{
    fields.into_iter().flat_map(tokenize).collect()
}
