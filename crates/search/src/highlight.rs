//! Emphasis spans for rendered suggestions.
//!
//! Matching is done on the lower-cased text, but spans are reported as byte
//! offsets into the original string. Lower-casing can change byte lengths
//! (e.g. 'İ' becomes "i̇"), so each lower-cased byte is mapped back to the
//! source character it came from.

use serde::Serialize;

/// A piece of a suggestion, emphasized or not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Segment<'a> {
    /// Slice of the original suggestion
    pub text: &'a str,
    /// Whether this slice matched the query
    pub highlighted: bool,
}

struct LowercaseIndex {
    lowered: String,
    /// For every byte of `lowered`, the source character's byte range
    source: Vec<(usize, usize)>,
}

impl LowercaseIndex {
    fn build(text: &str) -> Self {
        let mut lowered = String::with_capacity(text.len());
        let mut source = Vec::with_capacity(text.len());

        for (start, ch) in text.char_indices() {
            let end = start + ch.len_utf8();
            let before = lowered.len();
            lowered.extend(ch.to_lowercase());
            source.extend(std::iter::repeat_n((start, end), lowered.len() - before));
        }

        Self { lowered, source }
    }

    fn source_range(&self, lower_start: usize, lower_end: usize) -> Option<(usize, usize)> {
        if lower_start >= lower_end {
            return None;
        }
        let start = self.source.get(lower_start)?.0;
        let end = self.source.get(lower_end - 1)?.1;
        (start < end).then_some((start, end))
    }
}

/// Byte ranges `(start, end)` of every case-insensitive occurrence of `query`.
///
/// Occurrences are found left to right and do not overlap. A blank query
/// yields no spans.
///
/// # Example
/// ```
/// use rimas_search::highlight_spans;
///
/// assert_eq!(highlight_spans("Clean Code", "clean"), vec![(0, 5)]);
/// assert_eq!(highlight_spans("Code Complete, code", "CODE"), vec![(0, 4), (15, 19)]);
/// ```
pub fn highlight_spans(suggestion: &str, query: &str) -> Vec<(usize, usize)> {
    if query.trim().is_empty() {
        return Vec::new();
    }

    let needle = query.to_lowercase();
    let index = LowercaseIndex::build(suggestion);
    let mut spans: Vec<(usize, usize)> = Vec::new();

    for (lower_start, matched) in index.lowered.match_indices(&needle) {
        let Some((start, end)) = index.source_range(lower_start, lower_start + matched.len()) else {
            continue;
        };
        // Two lower-cased matches can land inside one multi-byte source char.
        if spans.last().is_some_and(|&(_, last_end)| start < last_end) {
            continue;
        }
        spans.push((start, end));
    }

    spans
}

/// Cut `suggestion` into alternating plain and highlighted segments.
///
/// Concatenating the segment texts gives back `suggestion`.
pub fn highlight_segments<'a>(suggestion: &'a str, query: &str) -> Vec<Segment<'a>> {
    let mut segments = Vec::new();
    let mut cursor = 0;

    for (start, end) in highlight_spans(suggestion, query) {
        if start > cursor {
            segments.push(Segment {
                text: &suggestion[cursor..start],
                highlighted: false,
            });
        }
        segments.push(Segment {
            text: &suggestion[start..end],
            highlighted: true,
        });
        cursor = end;
    }

    if cursor < suggestion.len() {
        segments.push(Segment {
            text: &suggestion[cursor..],
            highlighted: false,
        });
    }

    segments
}
