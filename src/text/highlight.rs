//! Word-level highlighting of a corrected text.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One space-delimited token of the corrected text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighlightedWord {
    pub word: String,
    /// True when this exact token appears nowhere in the original.
    pub changed: bool,
}

/// Mark each word of `corrected` that does not occur anywhere in `original`.
///
/// This is a membership test, not a diff: both texts are split on the single
/// space character and compared token by token, case and punctuation
/// included. Reordered words are never marked; a word repeated in the
/// correction is unmarked if it occurs once in the original.
pub fn highlight_changes(original: &str, corrected: &str) -> Vec<HighlightedWord> {
    let known: HashSet<&str> = original.split(' ').collect();
    corrected
        .split(' ')
        .map(|word| HighlightedWord {
            word: word.to_string(),
            changed: !known.contains(word),
        })
        .collect()
}

/// Whether a correction is worth showing: non-empty and different from the input.
pub fn has_corrections(original: &str, corrected: &str) -> bool {
    !corrected.is_empty() && corrected != original
}

#[cfg(test)]
mod tests {
    use super::*;

    fn changed(words: &[HighlightedWord]) -> Vec<&str> {
        words.iter().filter(|w| w.changed).map(|w| w.word.as_str()).collect()
    }

    #[test]
    fn test_marks_only_new_word() {
        let words = highlight_changes("the cat sat", "the dog sat");
        assert_eq!(words.len(), 3);
        assert_eq!(changed(&words), vec!["dog"]);
    }

    #[test]
    fn test_identical_marks_nothing() {
        let words = highlight_changes("I went home.", "I went home.");
        assert!(changed(&words).is_empty());
    }

    #[test]
    fn test_case_and_punctuation_sensitive() {
        let words = highlight_changes("i went home", "I went home.");
        assert_eq!(changed(&words), vec!["I", "home."]);
    }

    #[test]
    fn test_reordering_is_invisible() {
        let words = highlight_changes("home I went", "I went home");
        assert!(changed(&words).is_empty());
    }

    #[test]
    fn test_double_space_yields_empty_token() {
        let words = highlight_changes("a b", "a  b");
        assert_eq!(words.len(), 3);
        assert_eq!(changed(&words), vec![""]);
    }

    #[test]
    fn test_has_corrections() {
        assert!(!has_corrections("same", "same"));
        assert!(!has_corrections("text", ""));
        assert!(has_corrections("teh", "the"));
    }
}
