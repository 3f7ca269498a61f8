//! Reading passages graded by CEFR level.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::{Error, ErrorContext, Result};

/// Common European Framework of Reference proficiency level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum CefrLevel {
    A1,
    A2,
    B1,
    #[default]
    B2,
    C1,
    C2,
}

impl CefrLevel {
    /// All levels, easiest first.
    pub const ALL: [CefrLevel; 6] = [
        CefrLevel::A1,
        CefrLevel::A2,
        CefrLevel::B1,
        CefrLevel::B2,
        CefrLevel::C1,
        CefrLevel::C2,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CefrLevel::A1 => "A1",
            CefrLevel::A2 => "A2",
            CefrLevel::B1 => "B1",
            CefrLevel::B2 => "B2",
            CefrLevel::C1 => "C1",
            CefrLevel::C2 => "C2",
        }
    }
}

impl fmt::Display for CefrLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CefrLevel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        CefrLevel::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                Error::validation_with_context(
                    format!("Unknown CEFR level: {}", wanted),
                    ErrorContext::new()
                        .with_field_path("level")
                        .with_details("expected one of A1, A2, B1, B2, C1, C2"),
                )
            })
    }
}

/// A short public-domain excerpt for reading practice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Passage {
    pub level: CefrLevel,
    pub title: &'static str,
    pub excerpt: &'static str,
}

static PASSAGES: [Passage; 6] = [
    Passage {
        level: CefrLevel::A1,
        title: "The Little Prince",
        excerpt: "Once when I was six years old I saw a magnificent picture in a book about the jungle. It showed a snake swallowing a wild beast. I worked hard drawing my first picture. Then I showed the grown-ups and asked if they were scared. They said, 'Why be scared of a hat?'",
    },
    Passage {
        level: CefrLevel::A2,
        title: "Alice's Adventures in Wonderland",
        excerpt: "Alice was beginning to get very tired of sitting by her sister on the bank, and of having nothing to do. Once or twice she had peeped into the book her sister was reading, but it had no pictures or conversations in it, and what is the use of a book, thought Alice, without pictures or conversations?",
    },
    Passage {
        level: CefrLevel::B1,
        title: "The Adventures of Sherlock Holmes",
        excerpt: "To Sherlock Holmes she is always the woman. I have seldom heard him mention her under any other name. In his eyes she eclipses and predominates the whole of her sex. It was not that he felt any emotion akin to love for Irene Adler. All emotions, and that one particularly, were abhorrent to his cold, precise but admirably balanced mind.",
    },
    Passage {
        level: CefrLevel::B2,
        title: "Pride and Prejudice",
        excerpt: "It is a truth universally acknowledged, that a single man in possession of a good fortune, must be in want of a wife. However little known the feelings or views of such a man may be on his first entering a neighbourhood, this truth is so well fixed in the minds of the surrounding families, that he is considered the rightful property of some one or other of their daughters.",
    },
    Passage {
        level: CefrLevel::C1,
        title: "Moby Dick",
        excerpt: "Call me Ishmael. Some years ago\u{2014}never mind how long precisely\u{2014}having little or no money in my purse, and nothing particular to interest me on shore, I thought I would sail about a little and see the watery part of the world. It is a way I have of driving off the spleen and regulating the circulation.",
    },
    Passage {
        level: CefrLevel::C2,
        title: "Ulysses",
        excerpt: "Stately, plump Buck Mulligan came from the stairhead, bearing a bowl of lather on which a mirror and a razor lay crossed. Buck Mulligan paused at the stairhead. 'He is a bold fellow,' he said. 'He dares to violate, descends from the tower, halts, reasons with himself, half decides to return, surmounts all, and then sails gaily forth.'",
    },
];

/// The passage for `level`.
pub fn passage(level: CefrLevel) -> &'static Passage {
    &PASSAGES[level as usize]
}

/// Every passage, easiest first.
pub fn passages() -> &'static [Passage] {
    &PASSAGES
}
