//! Preprocessed order file lines

use std::fmt;

/// Nesting marker carried by the first character of an order file line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Marker {
    /// `*` starts a day
    Day,
    /// `+` starts a session
    Session,
    /// `=` starts a split inside a session group
    Split,
    /// Leaf item or free text
    None,
}

impl Marker {
    /// Marker for a leading character, if it is one
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '*' => Some(Marker::Day),
            '+' => Some(Marker::Session),
            '=' => Some(Marker::Split),
            _ => None,
        }
    }

    /// Character this marker is written with
    pub fn as_char(&self) -> Option<char> {
        match self {
            Marker::Day => Some('*'),
            Marker::Session => Some('+'),
            Marker::Split => Some('='),
            Marker::None => None,
        }
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.as_char() {
            Some(c) => write!(f, "{}", c),
            None => f.write_str("none"),
        }
    }
}

/// One non-blank order file line after normalisation
///
/// `text` has the marker prefix removed and whitespace collapsed; the marker
/// itself is kept in `marker`. `number` is the 1-based source line number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub number: usize,
    pub marker: Marker,
    pub text: String,
}

impl Line {
    pub fn new(number: usize, marker: Marker, text: impl Into<String>) -> Self {
        Self {
            number,
            marker,
            text: text.into(),
        }
    }
}
