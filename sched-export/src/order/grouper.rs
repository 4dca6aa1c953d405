//! Hierarchical grouping of marker-prefixed lines
//!
//! The order file has no indentation; nesting comes from the marker on each
//! line. [`group`] partitions a flat line sequence at every line carrying the
//! requested marker. Applying it with `*`, then `+` to each day body, then `=`
//! to each session group body yields the day / session / split hierarchy.

use crate::models::{Line, Marker};
use tracing::debug;

/// A header line and every following line up to the next header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Block<'a> {
    pub header: &'a Line,
    pub body: &'a [Line],
}

impl<'a> Block<'a> {
    /// Header text with the marker stripped
    pub fn header_text(&self) -> &'a str {
        &self.header.text
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Partition `lines` into blocks starting at each line marked `marker`
///
/// Lines before the first marked line are a preamble and are dropped. Body
/// lines keep their own markers so the body can be grouped again one level
/// down. A header with no body is a valid (empty) block.
pub fn group(lines: &[Line], marker: Marker) -> Vec<Block<'_>> {
    let starts: Vec<usize> = lines
        .iter()
        .enumerate()
        .filter(|(_, line)| line.marker == marker)
        .map(|(idx, _)| idx)
        .collect();

    if let Some(&first) = starts.first() {
        if first > 0 {
            debug!(
                marker = %marker,
                dropped = first,
                first_line = lines[0].number,
                "Discarding preamble before first block"
            );
        }
    }

    starts
        .iter()
        .enumerate()
        .map(|(n, &start)| {
            let end = starts.get(n + 1).copied().unwrap_or(lines.len());
            Block {
                header: &lines[start],
                body: &lines[start + 1..end],
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order::preprocess::preprocess;

    fn flatten(blocks: &[Block<'_>]) -> Vec<Line> {
        blocks
            .iter()
            .flat_map(|b| std::iter::once(b.header).chain(b.body.iter()))
            .cloned()
            .collect()
    }

    #[test]
    fn test_blocks_start_at_each_marker() {
        let lines = preprocess("* Day one\n+ s1\nitem\n* Day two\n+ s2\n");
        let days = group(&lines, Marker::Day);

        assert_eq!(days.len(), 2);
        assert_eq!(days[0].header_text(), "Day one");
        assert_eq!(days[0].body.len(), 2);
        assert_eq!(days[1].header_text(), "Day two");
        assert_eq!(days[1].body.len(), 1);
    }

    #[test]
    fn test_preamble_discarded() {
        let lines = preprocess("Schedule draft v3\nprinted copy\n* Day one\n+ s1\n");
        let days = group(&lines, Marker::Day);

        assert_eq!(days.len(), 1);
        assert_eq!(flatten(&days), lines[2..].to_vec());
    }

    #[test]
    fn test_concatenation_reproduces_input() {
        let lines = preprocess(
            "intro\n+ a\n1\n2\n= x\n3\n+ b\n+ c\n4\n* nested day marker\n5\n",
        );
        let blocks = group(&lines, Marker::Session);

        assert_eq!(blocks.len(), 3);
        // Everything from the first session header onward, in order
        assert_eq!(flatten(&blocks), lines[1..].to_vec());
    }

    #[test]
    fn test_header_only_block_is_valid() {
        let lines = preprocess("+ a\n+ b\n");
        let blocks = group(&lines, Marker::Session);

        assert_eq!(blocks.len(), 2);
        assert!(blocks[0].is_empty());
        assert!(blocks[1].is_empty());
    }

    #[test]
    fn test_no_marker_gives_no_blocks() {
        let lines = preprocess("a\nb\n+ c\n");
        assert!(group(&lines, Marker::Split).is_empty());
        assert!(group(&[], Marker::Day).is_empty());
    }

    #[test]
    fn test_recursive_grouping() {
        let lines = preprocess(
            "* Day\n+ Orals\n= 1A: One (Hall A)\np1\np2\n= 1B: Two (Hall B)\np3\n",
        );
        let days = group(&lines, Marker::Day);
        let sessions = group(days[0].body, Marker::Session);
        let splits = group(sessions[0].body, Marker::Split);

        assert_eq!(sessions.len(), 1);
        assert_eq!(splits.len(), 2);
        assert_eq!(splits[0].body.len(), 2);
        assert_eq!(splits[1].body[0].text, "p3");
    }
}
