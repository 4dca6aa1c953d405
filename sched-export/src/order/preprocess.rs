//! Line normalisation
//!
//! Turns raw order file text into [`Line`]s: trailing `\r` and surrounding
//! whitespace removed, internal runs of whitespace collapsed to one space,
//! the marker character recorded and stripped from the text.

use crate::models::{Line, Marker};

/// Normalise one raw line; blank lines yield `None`
pub fn process_line(number: usize, raw: &str) -> Option<Line> {
    let trimmed = raw.trim_start_matches('\u{feff}').trim();
    let first = trimmed.chars().next()?;

    let (marker, rest) = match Marker::from_char(first) {
        Some(marker) => {
            // Strip every leading marker/space character, like "** Day" or "+  09:00"
            let rest = trimmed.trim_start_matches(|c: char| c == first || c.is_whitespace());
            (marker, rest)
        }
        None => (Marker::None, trimmed),
    };

    Some(Line::new(number, marker, collapse_whitespace(rest)))
}

/// Normalise a whole order file, numbering lines from 1
pub fn preprocess(input: &str) -> Vec<Line> {
    input
        .lines()
        .enumerate()
        .filter_map(|(idx, raw)| process_line(idx + 1, raw))
        .collect()
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
