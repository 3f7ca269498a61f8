//! Period-based sentence splitting.

/// Split `text` on every `.` and return the trimmed, non-empty fragments in order.
///
/// `?`, `!`, abbreviations and decimal numbers are not special-cased.
///
/// ```
/// use lingualeap::text::split_sentences;
///
/// assert_eq!(split_sentences("A. B. C."), vec!["A", "B", "C"]);
/// assert_eq!(split_sentences("Pi is 3.14"), vec!["Pi is 3", "14"]);
/// assert!(split_sentences("").is_empty());
/// ```
pub fn split_sentences(text: &str) -> Vec<String> {
    text.split('.')
        .map(|fragment| fragment.trim_matches(is_trimmable))
        .filter(|fragment| !fragment.is_empty())
        .map(str::to_string)
        .collect()
}

/// Whitespace as browsers trim it: Unicode `White_Space` except NEL (U+0085),
/// plus the byte order mark (U+FEFF).
fn is_trimmable(c: char) -> bool {
    (c.is_whitespace() && c != '\u{0085}') || c == '\u{FEFF}'
}

/// Display label for the fragment at `index` (0-based): `"Sentence 1"`, ...
pub fn label(index: usize) -> String {
    format!("Sentence {}", index + 1)
}
