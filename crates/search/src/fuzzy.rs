//! Edit distance between tokens.

/// Calculate Levenshtein edit distance between two strings.
///
/// Counts the minimum number of single-character insertions, deletions and
/// substitutions turning `a` into `b`. Characters are Unicode scalar values,
/// so "كتاب" has length 4 regardless of its UTF-8 byte length.
///
/// Only two rows of the DP table are kept, sized by the shorter input.
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();

    if a_chars.is_empty() {
        return b_chars.len();
    }
    if b_chars.is_empty() {
        return a_chars.len();
    }

    // Rows run over the longer string, columns over the shorter one.
    let (rows, cols) = if a_chars.len() >= b_chars.len() {
        (&a_chars, &b_chars)
    } else {
        (&b_chars, &a_chars)
    };

    let mut prev: Vec<usize> = (0..=cols.len()).collect();
    let mut curr = vec![0; cols.len() + 1];

    for (i, row_char) in rows.iter().enumerate() {
        curr[0] = i + 1;
        for (j, col_char) in cols.iter().enumerate() {
            let cost = usize::from(row_char != col_char);
            curr[j + 1] = (prev[j + 1] + 1) // deletion
                .min(curr[j] + 1) // insertion
                .min(prev[j] + cost); // substitution
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[cols.len()]
}

/// Check whether `a` and `b` are at most `max` edits apart.
///
/// The length difference is a lower bound on the distance, so pairs that
/// differ in length by more than `max` are rejected without running the DP.
pub fn within_distance(a: &str, b: &str, max: usize) -> bool {
    let a_len = a.chars().count();
    let b_len = b.chars().count();

    if a_len.abs_diff(b_len) > max {
        return false;
    }

    levenshtein_distance(a, b) <= max
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_levenshtein_same() {
        assert_eq!(levenshtein_distance("code", "code"), 0);
    }

    #[test]
    fn test_levenshtein_substitution() {
        assert_eq!(levenshtein_distance("cade", "code"), 1);
    }

    #[test]
    fn test_levenshtein_insert_and_delete() {
        assert_eq!(levenshtein_distance("clen", "clean"), 1);
        assert_eq!(levenshtein_distance("clean", "clen"), 1);
    }

    #[test]
    fn test_levenshtein_empty() {
        assert_eq!(levenshtein_distance("", "martin"), 6);
        assert_eq!(levenshtein_distance("martin", ""), 6);
        assert_eq!(levenshtein_distance("", ""), 0);
    }

    #[test]
    fn test_levenshtein_classic() {
        assert_eq!(levenshtein_distance("kitten", "sitting"), 3);
        assert_eq!(levenshtein_distance("zzzzz", "code"), 5);
    }

    #[test]
    fn test_levenshtein_counts_chars_not_bytes() {
        assert_eq!(levenshtein_distance("كتاب", "كتب"), 1);
        assert_eq!(levenshtein_distance("", "كتاب"), 4);
    }

    #[test]
    fn test_within_distance_length_gap() {
        assert!(!within_distance("a", "abcd", 2));
        assert!(within_distance("abc", "abcd", 1));
        assert!(within_distance("cade", "code", 1));
        assert!(!within_distance("zzzzz", "clean", 2));
    }

    proptest! {
        #[test]
        fn prop_symmetric(a in "\\PC{0,12}", b in "\\PC{0,12}") {
            prop_assert_eq!(levenshtein_distance(&a, &b), levenshtein_distance(&b, &a));
        }

        #[test]
        fn prop_identity(a in "\\PC{0,16}") {
            prop_assert_eq!(levenshtein_distance(&a, &a), 0);
        }

        #[test]
        fn prop_empty_is_length(s in "\\PC{0,16}") {
            prop_assert_eq!(levenshtein_distance("", &s), s.chars().count());
        }

        #[test]
        fn prop_within_agrees_with_distance(a in "[a-e]{0,8}", b in "[a-e]{0,8}", max in 0usize..4) {
            prop_assert_eq!(within_distance(&a, &b, max), levenshtein_distance(&a, &b) <= max);
        }
    }
}
