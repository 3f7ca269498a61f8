//! Caller-side text helpers: sentence splitting and correction highlighting.
//!
//! Both helpers are deliberately naive. Sentence numbering and highlighted
//! words shown to learners depend on their exact behavior, so quirks such as
//! splitting `3.14` into two fragments are kept.

pub mod highlight;
pub mod segment;

pub use highlight::{has_corrections, highlight_changes, HighlightedWord};
pub use segment::{label, split_sentences};
