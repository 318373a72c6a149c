//! Aleph Text - direction classification
//!
//! Classifies a string's reading direction by its first letter: scan for the
//! first alphabetic code point, ignoring whitespace, digits, punctuation,
//! emoji and symbols, and test it against the Hebrew block. First-letter-only
//! detection is deliberate - it is cheap, deterministic, and matches the
//! common case of single-language paragraphs. A paragraph opening with a
//! foreign-script quotation inside punctuation is classified by that
//! quotation; that is accepted behavior.

/// Reading-direction verdict for a piece of text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// First letter is Hebrew
    Rtl,
    /// First letter is any other script
    Ltr,
    /// No letters at all
    Neutral,
}

impl Direction {
    /// Value for a `dir` attribute, when one applies
    pub fn attr_value(self) -> Option<&'static str> {
        match self {
            Direction::Rtl => Some("rtl"),
            Direction::Ltr => Some("ltr"),
            Direction::Neutral => None,
        }
    }
}

/// Hebrew Unicode block, U+0590..=U+05FF
#[inline]
pub fn is_hebrew(c: char) -> bool {
    matches!(c as u32, 0x0590..=0x05FF)
}

/// First alphabetic code point in the string, if any
pub fn first_letter(text: &str) -> Option<char> {
    text.chars().find(|c| c.is_alphabetic())
}

/// Classify a string's reading direction by its first letter
pub fn detect(text: &str) -> Direction {
    match first_letter(text) {
        Some(c) if is_hebrew(c) => Direction::Rtl,
        Some(_) => Direction::Ltr,
        None => Direction::Neutral,
    }
}
