//! Character shingle extraction for similarity analysis.
//!
//! Shingles are the feature representation for all downstream similarity
//! math: fixed-length character n-grams over normalized text, collected into
//! a set so duplicates collapse.

use ahash::AHashSet;

/// A set of character k-grams extracted from one text field.
pub type ShingleSet = AHashSet<String>;

/// Extract the set of contiguous `k`-character shingles from `text`.
///
/// - Empty or whitespace-only text yields the empty set.
/// - Text shorter than `k` characters yields the singleton `{text}`.
/// - Otherwise every contiguous `k`-character substring is included once.
///
/// Shingling operates on Unicode scalar values, so multi-byte characters
/// count as one position.
pub fn shingle_set(text: &str, k: usize) -> ShingleSet {
    debug_assert!(k > 0, "shingle length must be positive");

    if text.trim().is_empty() {
        return ShingleSet::new();
    }

    let chars: Vec<char> = text.chars().collect();
    if chars.len() < k {
        let mut set = ShingleSet::with_capacity(1);
        set.insert(text.to_string());
        return set;
    }

    chars.windows(k).map(|w| w.iter().collect()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_empty_and_whitespace_text() {
        assert!(shingle_set("", 3).is_empty());
        assert!(shingle_set("   ", 3).is_empty());
        assert!(shingle_set("\t\n ", 3).is_empty());
    }

    #[test]
    fn test_short_text_is_singleton() {
        let set = shingle_set("ab", 3);
        assert_eq!(set.len(), 1);
        assert!(set.contains("ab"));
    }

    #[test]
    fn test_trigram_extraction() {
        let set = shingle_set("abcde", 3);
        let expected: ShingleSet = ["abc", "bcd", "cde"].iter().map(|s| s.to_string()).collect();
        assert_eq!(set, expected);
    }

    #[test]
    fn test_duplicate_shingles_collapse() {
        // "aaaa" has three trigram positions but only one distinct trigram
        let set = shingle_set("aaaa", 3);
        assert_eq!(set.len(), 1);
        assert!(set.contains("aaa"));
    }

    #[test]
    fn test_exact_length_text() {
        let set = shingle_set("abc", 3);
        assert_eq!(set.len(), 1);
        assert!(set.contains("abc"));
    }

    #[test]
    fn test_multibyte_characters() {
        let set = shingle_set("caffè", 3);
        assert!(set.contains("ffè"));
        assert_eq!(set.len(), 3);
    }

    proptest! {
        #[test]
        fn prop_shingles_are_substrings(text in "[a-z ]{0,40}") {
            let k = 3;
            let set = shingle_set(&text, k);

            if text.trim().is_empty() {
                prop_assert!(set.is_empty());
            } else if text.chars().count() < k {
                prop_assert_eq!(set.len(), 1);
                prop_assert!(set.contains(&text));
            } else {
                for shingle in &set {
                    prop_assert_eq!(shingle.chars().count(), k);
                    prop_assert!(text.contains(shingle.as_str()));
                }
            }
        }

        #[test]
        fn prop_shingling_is_deterministic(text in "[a-z0-9 ]{0,30}") {
            prop_assert_eq!(shingle_set(&text, 3), shingle_set(&text, 3));
        }
    }
}
