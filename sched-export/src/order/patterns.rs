//! Fixed-shape matchers for order file headers and items
//!
//! Each matcher either captures every field of its line shape or fails with
//! [`Error::MalformedHeader`]; there is no partial parse. Time ranges accept
//! both `09:00-10:30` and `09:00--10:30`.

use crate::models::{Line, PosterItem, TimeRange, TimedItem};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use sched_common::{Error, Result};

const TIME_RANGE: &str = r"(?P<start>\d{1,2}:\d{2})\s*-{1,2}\s*(?P<end>\d{1,2}:\d{2})";

fn compile(pattern: String) -> Regex {
    Regex::new(&pattern).expect("order file pattern must compile")
}

/// `09:00-10:30 Coffee Break`
static BREAK_SESSION: Lazy<Regex> = Lazy::new(|| compile(format!(r"^{TIME_RANGE} (?P<title>.+)$")));

/// `09:00-10:30 Opening Session (Grand Ballroom)`
static NON_PAPER_SESSION: Lazy<Regex> = Lazy::new(|| {
    compile(format!(
        r"^{TIME_RANGE} (?P<title>.+?) \((?P<location>[^()]+)\)$"
    ))
});

/// `10:30-12:10 Orals and Posters: Semantics and Parsing II`
static PAPER_SESSION_GROUP: Lazy<Regex> = Lazy::new(|| {
    compile(format!(
        r"^{TIME_RANGE} (?P<category>[^:]+?): (?P<description>.+?) \(?(?P<ordinal>[IVXLC]+)\)?$"
    ))
});

/// `1A: Information Extraction (Oral, Gold Hall)`
static PAPER_SESSION: Lazy<Regex> = Lazy::new(|| {
    compile(r"^(?P<id>[^\s:]+): (?P<title>.+?) \((?P<parens>[^()]+)\)$".to_string())
});

/// `123 10:30-10:48 # Paper Title`
static TIMED_ITEM: Lazy<Regex> = Lazy::new(|| {
    compile(format!(r"^(?P<id>\S+) {TIME_RANGE}(?: #)? (?P<title>.+)$"))
});

/// `77-demo # Demo Title`
static POSTER_DEMO: Lazy<Regex> =
    Lazy::new(|| compile(r"^(?P<id>[^\s#@]+) (?:# )?(?P<title>.+)$".to_string()));

/// Captured break header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BreakHeader {
    pub time: TimeRange,
    pub title: String,
}

/// Captured header of a session with a location
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionHeader {
    pub time: TimeRange,
    pub title: String,
    pub location: String,
}

/// Captured session group header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupHeader {
    pub time: TimeRange,
    pub category: String,
    pub description: String,
    pub ordinal: String,
}

/// Captured split header; `parens` is still the raw "type, location" text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitHeader {
    pub session_id: String,
    pub title: String,
    pub parens: String,
}

impl SplitHeader {
    /// Split the parenthesised field into `(type, location)`
    ///
    /// `"Oral, Hall A"` gives both; a bare `"Hall A"` gives an empty type.
    pub fn kind_and_location(&self) -> (String, String) {
        match self.parens.split_once(',') {
            Some((kind, location)) => (kind.trim().to_string(), location.trim().to_string()),
            None => (String::new(), self.parens.trim().to_string()),
        }
    }
}

fn captures<'t>(re: &Regex, line: &'t Line, kind: &str) -> Result<Captures<'t>> {
    re.captures(&line.text).ok_or_else(|| Error::MalformedHeader {
        kind: kind.to_string(),
        line_no: line.number,
        line: line.text.clone(),
    })
}

fn field(caps: &Captures<'_>, name: &str) -> String {
    caps.name(name)
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_default()
}

fn time_range(caps: &Captures<'_>) -> TimeRange {
    TimeRange::new(field(caps, "start"), field(caps, "end"))
}

pub fn parse_break(line: &Line) -> Result<BreakHeader> {
    let caps = captures(&BREAK_SESSION, line, "break")?;
    Ok(BreakHeader {
        time: time_range(&caps),
        title: field(&caps, "title"),
    })
}

/// Keynote, opening, social event, business meeting and best paper headers
pub fn parse_session(line: &Line, kind: &str) -> Result<SessionHeader> {
    let caps = captures(&NON_PAPER_SESSION, line, kind)?;
    Ok(SessionHeader {
        time: time_range(&caps),
        title: field(&caps, "title"),
        location: field(&caps, "location"),
    })
}

pub fn parse_group(line: &Line) -> Result<GroupHeader> {
    let caps = captures(&PAPER_SESSION_GROUP, line, "session group")?;
    Ok(GroupHeader {
        time: time_range(&caps),
        category: field(&caps, "category"),
        description: field(&caps, "description"),
        ordinal: field(&caps, "ordinal"),
    })
}

pub fn parse_split(line: &Line) -> Result<SplitHeader> {
    let caps = captures(&PAPER_SESSION, line, "split")?;
    Ok(SplitHeader {
        session_id: field(&caps, "id"),
        title: field(&caps, "title"),
        parens: field(&caps, "parens"),
    })
}

/// Oral and best paper items
pub fn parse_timed_item(line: &Line) -> Result<TimedItem> {
    let caps = captures(&TIMED_ITEM, line, "paper")?;
    Ok(TimedItem {
        paper_id: field(&caps, "id"),
        time: time_range(&caps),
        title: field(&caps, "title"),
        line_no: line.number,
    })
}

pub fn parse_poster_item(line: &Line) -> Result<PosterItem> {
    let caps = captures(&POSTER_DEMO, line, "poster")?;
    Ok(PosterItem {
        paper_id: field(&caps, "id"),
        title: field(&caps, "title"),
        line_no: line.number,
    })
}

/// Replace the standalone word "and" with `with`
pub fn replace_and(text: &str, with: &str) -> String {
    text.split(' ')
        .map(|word| if word == "and" { with } else { word })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Marker;

    fn line(text: &str) -> Line {
        Line::new(7, Marker::None, text)
    }

    #[test]
    fn test_opening_session() {
        let header = parse_session(&line("09:00-10:30 Opening Session (Grand Ballroom)"), "opening").unwrap();
        assert_eq!(header.time, TimeRange::new("09:00", "10:30"));
        assert_eq!(header.title, "Opening Session");
        assert_eq!(header.location, "Grand Ballroom");
    }

    #[test]
    fn test_double_dash_time_range() {
        let header = parse_break(&line("10:30--11:00 Coffee Break")).unwrap();
        assert_eq!(header.time, TimeRange::new("10:30", "11:00"));
        assert_eq!(header.title, "Coffee Break");
    }

    #[test]
    fn test_session_without_location_is_malformed() {
        let err = parse_session(&line("09:00-10:30 Opening Session"), "opening").unwrap_err();
        match err {
            Error::MalformedHeader { kind, line_no, line } => {
                assert_eq!(kind, "opening");
                assert_eq!(line_no, 7);
                assert_eq!(line, "09:00-10:30 Opening Session");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_title_with_inner_parentheses() {
        let header = parse_session(
            &line("13:00-14:00 Keynote II: Ada Lovelace \"Engines (and Looms)\" (Gold Hall)"),
            "keynote",
        )
        .unwrap();
        assert_eq!(header.location, "Gold Hall");
        assert_eq!(header.title, "Keynote II: Ada Lovelace \"Engines (and Looms)\"");
    }

    #[test]
    fn test_group_header() {
        let header = parse_group(&line("10:30-12:10 Orals and Posters: Semantics and Parsing II")).unwrap();
        assert_eq!(header.category, "Orals and Posters");
        assert_eq!(header.description, "Semantics and Parsing");
        assert_eq!(header.ordinal, "II");
    }

    #[test]
    fn test_group_header_parenthesised_ordinal() {
        let header = parse_group(&line("14:00-15:30 Orals: Machine Translation (IV)")).unwrap();
        assert_eq!(header.description, "Machine Translation");
        assert_eq!(header.ordinal, "IV");
    }

    #[test]
    fn test_group_header_without_ordinal_is_malformed() {
        assert!(parse_group(&line("10:30-12:10 Orals: Semantics")).is_err());
    }

    #[test]
    fn test_split_header_type_and_location() {
        let header = parse_split(&line("1A: Information Extraction (Oral, Gold Hall)")).unwrap();
        assert_eq!(header.session_id, "1A");
        assert_eq!(header.title, "Information Extraction");
        assert_eq!(
            header.kind_and_location(),
            ("Oral".to_string(), "Gold Hall".to_string())
        );
    }

    #[test]
    fn test_split_header_bare_location() {
        let header = parse_split(&line("2C: Dialogue (Silver Hall)")).unwrap();
        assert_eq!(header.kind_and_location(), (String::new(), "Silver Hall".to_string()));
    }

    #[test]
    fn test_timed_item() {
        let item = parse_timed_item(&line("123-TACL 10:30--10:48 # Learning to Parse")).unwrap();
        assert_eq!(item.paper_id, "123-TACL");
        assert_eq!(item.time, TimeRange::new("10:30", "10:48"));
        assert_eq!(item.title, "Learning to Parse");
        assert_eq!(item.line_no, 7);
    }

    #[test]
    fn test_timed_item_without_time_is_malformed() {
        assert!(parse_timed_item(&line("123 # Learning to Parse")).is_err());
    }

    #[test]
    fn test_poster_item() {
        let item = parse_poster_item(&line("77-demo # A Demo System")).unwrap();
        assert_eq!(item.paper_id, "77-demo");
        assert_eq!(item.title, "A Demo System");
    }

    #[test]
    fn test_replace_and_whole_words_only() {
        assert_eq!(replace_and("Syntax and Understanding", "&"), "Syntax & Understanding");
        assert_eq!(replace_and("Orals and Posters", "&amp;"), "Orals &amp; Posters");
        assert_eq!(replace_and("Android", "&"), "Android");
    }
}
