//! Classified schedule entities
//!
//! These are produced by the order file parser and carry no app IDs; IDs are
//! allocated only when the entities are emitted as rows.

use chrono::NaiveDate;

/// Start/end clock times exactly as written in the order file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeRange {
    pub start: String,
    pub end: String,
}

impl TimeRange {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }
}

/// Whole parsed order file
#[derive(Debug, Clone, Default)]
pub struct Schedule {
    pub days: Vec<Day>,
}

impl Schedule {
    /// Total number of sessions across all days
    pub fn session_count(&self) -> usize {
        self.days.iter().map(|d| d.sessions.len()).sum()
    }
}

/// One conference day and its sessions in source order
#[derive(Debug, Clone)]
pub struct Day {
    pub date: NaiveDate,
    pub line_no: usize,
    pub sessions: Vec<SessionEntity>,
}

/// A classified session block
#[derive(Debug, Clone)]
pub enum SessionEntity {
    Break(BreakSession),
    Keynote(PlainSession),
    Opening(PlainSession),
    SocialEvent(PlainSession),
    BusinessMeeting(PlainSession),
    BestPaper(BestPaperSession),
    Group(SessionGroup),
}

impl SessionEntity {
    /// Source line of the session header
    pub fn line_no(&self) -> usize {
        match self {
            SessionEntity::Break(s) => s.line_no,
            SessionEntity::Keynote(s)
            | SessionEntity::Opening(s)
            | SessionEntity::SocialEvent(s)
            | SessionEntity::BusinessMeeting(s) => s.line_no,
            SessionEntity::BestPaper(s) => s.session.line_no,
            SessionEntity::Group(g) => g.line_no,
        }
    }
}

/// Break or lunch; has no location
#[derive(Debug, Clone)]
pub struct BreakSession {
    pub time: TimeRange,
    pub title: String,
    pub line_no: usize,
}

/// Session with a title and a parenthesised location
#[derive(Debug, Clone)]
pub struct PlainSession {
    pub time: TimeRange,
    pub title: String,
    pub location: String,
    pub line_no: usize,
}

/// Best paper session and its presentations
#[derive(Debug, Clone)]
pub struct BestPaperSession {
    pub session: PlainSession,
    pub papers: Vec<TimedItem>,
}

/// Oral/poster session group sharing one time range
#[derive(Debug, Clone)]
pub struct SessionGroup {
    pub time: TimeRange,
    /// Category label, e.g. "Orals &amp; Posters"
    pub category: String,
    pub description: String,
    /// Roman numeral suffix of the header
    pub ordinal: String,
    pub splits: Vec<Split>,
    pub line_no: usize,
}

/// Parallel sub-session inside a session group
#[derive(Debug, Clone)]
pub struct Split {
    /// Session identifier from the order file, e.g. "3A"
    pub session_id: String,
    /// Display title ("and" already replaced by "&")
    pub title: String,
    /// Session type from the parenthesised field, empty when absent
    pub kind: String,
    pub location: String,
    pub is_poster: bool,
    pub items: Vec<SplitItem>,
    pub line_no: usize,
}

/// Leaf line inside a split
#[derive(Debug, Clone)]
pub enum SplitItem {
    /// Oral paper with its own time slot
    Paper(TimedItem),
    /// Poster or demo entry
    Poster(PosterItem),
    /// `@`-prefixed pointer to an entry presented elsewhere
    CrossReference { line_no: usize, text: String },
}

/// Presentation with its own time slot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimedItem {
    pub paper_id: String,
    pub time: TimeRange,
    pub title: String,
    pub line_no: usize,
}

/// Poster or demo presentation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PosterItem {
    pub paper_id: String,
    pub title: String,
    pub line_no: usize,
}

/// Track a submission belongs to, derived from its ID suffix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaperTrack {
    Main,
    /// `-demo` suffix
    Demo,
    /// `-TACL` suffix
    Tacl,
}

impl PaperTrack {
    pub fn from_id(paper_id: &str) -> Self {
        if paper_id.ends_with("-demo") {
            PaperTrack::Demo
        } else if paper_id.ends_with("-TACL") {
            PaperTrack::Tacl
        } else {
            PaperTrack::Main
        }
    }

    /// Title prefix shown in the app, if any
    pub fn title_prefix(&self) -> Option<&'static str> {
        match self {
            PaperTrack::Main => None,
            PaperTrack::Demo => Some("[DEMO]"),
            PaperTrack::Tacl => Some("[TACL]"),
        }
    }

    /// Title with the track prefix applied
    pub fn display_title(&self, title: &str) -> String {
        match self.title_prefix() {
            Some(prefix) => format!("{} {}", prefix, title),
            None => title.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_track_from_id() {
        assert_eq!(PaperTrack::from_id("123"), PaperTrack::Main);
        assert_eq!(PaperTrack::from_id("77-demo"), PaperTrack::Demo);
        assert_eq!(PaperTrack::from_id("12-TACL"), PaperTrack::Tacl);
        // Suffix match is case-sensitive
        assert_eq!(PaperTrack::from_id("12-tacl"), PaperTrack::Main);
    }

    #[test]
    fn test_display_title() {
        assert_eq!(PaperTrack::Demo.display_title("A Tool"), "[DEMO] A Tool");
        assert_eq!(PaperTrack::Tacl.display_title("A Study"), "[TACL] A Study");
        assert_eq!(PaperTrack::Main.display_title("A Paper"), "A Paper");
    }
}
