//! Session block classification
//!
//! A session header is classified once into an [`EntityKind`] by
//! case-insensitive keyword tests in a fixed priority order, then parsed with
//! that kind's matcher. The order matters for headers containing several
//! keywords ("Lunch and Business Meeting" is a break).

use super::grouper::{group, Block};
use super::patterns::{self, replace_and};
use crate::models::{
    BestPaperSession, BreakSession, Line, Marker, PlainSession, SessionEntity, SessionGroup,
    Split, SplitItem,
};
use sched_common::{Error, Result};
use tracing::debug;

/// Fixed set of session kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Break,
    Keynote,
    Opening,
    SocialEvent,
    BusinessMeeting,
    BestPaper,
    SessionGroup,
}

/// Keyword table in priority order
const KEYWORDS: &[(EntityKind, &[&str])] = &[
    (EntityKind::Break, &["break", "lunch"]),
    (EntityKind::Keynote, &["keynote"]),
    (EntityKind::Opening, &["opening"]),
    (EntityKind::SocialEvent, &["social event"]),
    (EntityKind::BusinessMeeting, &["business meeting"]),
    (EntityKind::BestPaper, &["best paper"]),
    (EntityKind::SessionGroup, &["orals", "posters"]),
];

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Break => "break",
            EntityKind::Keynote => "keynote",
            EntityKind::Opening => "opening",
            EntityKind::SocialEvent => "social event",
            EntityKind::BusinessMeeting => "business meeting",
            EntityKind::BestPaper => "best paper",
            EntityKind::SessionGroup => "session group",
        }
    }
}

/// Classify a session header; `None` when no keyword matches
pub fn classify(header: &str) -> Option<EntityKind> {
    let lowered = header.to_lowercase();
    KEYWORDS
        .iter()
        .find(|(_, words)| words.iter().any(|w| lowered.contains(w)))
        .map(|(kind, _)| *kind)
}

/// Classify a session block and parse it into a typed entity
pub fn classify_block(block: &Block<'_>) -> Result<SessionEntity> {
    let header = block.header;
    let kind = classify(&header.text).ok_or_else(|| Error::UnrecognizedEntity {
        line_no: header.number,
        line: header.text.clone(),
    })?;

    debug!(line = header.number, kind = kind.as_str(), "Classified session header");

    let entity = match kind {
        EntityKind::Break => {
            let parsed = patterns::parse_break(header)?;
            SessionEntity::Break(BreakSession {
                time: parsed.time,
                title: parsed.title,
                line_no: header.number,
            })
        }
        EntityKind::Keynote => SessionEntity::Keynote(plain_session(header, kind)?),
        EntityKind::Opening => SessionEntity::Opening(plain_session(header, kind)?),
        EntityKind::SocialEvent => SessionEntity::SocialEvent(plain_session(header, kind)?),
        EntityKind::BusinessMeeting => {
            SessionEntity::BusinessMeeting(plain_session(header, kind)?)
        }
        EntityKind::BestPaper => SessionEntity::BestPaper(BestPaperSession {
            session: plain_session(header, kind)?,
            papers: block
                .body
                .iter()
                .map(patterns::parse_timed_item)
                .collect::<Result<Vec<_>>>()?,
        }),
        EntityKind::SessionGroup => SessionEntity::Group(session_group(block)?),
    };

    if !matches!(kind, EntityKind::BestPaper | EntityKind::SessionGroup) && !block.is_empty() {
        debug!(
            line = header.number,
            ignored = block.body.len(),
            "Ignoring body lines of {} session",
            kind.as_str()
        );
    }

    Ok(entity)
}

fn plain_session(header: &Line, kind: EntityKind) -> Result<PlainSession> {
    let parsed = patterns::parse_session(header, kind.as_str())?;
    Ok(PlainSession {
        time: parsed.time,
        title: parsed.title,
        location: parsed.location,
        line_no: header.number,
    })
}

fn session_group(block: &Block<'_>) -> Result<SessionGroup> {
    let parsed = patterns::parse_group(block.header)?;
    let splits = group(block.body, Marker::Split)
        .iter()
        .map(split)
        .collect::<Result<Vec<_>>>()?;

    Ok(SessionGroup {
        time: parsed.time,
        category: replace_and(&parsed.category, "&amp;"),
        description: replace_and(&parsed.description, "&amp;"),
        ordinal: parsed.ordinal,
        splits,
        line_no: block.header.number,
    })
}

fn split(block: &Block<'_>) -> Result<Split> {
    let parsed = patterns::parse_split(block.header)?;
    let (kind, location) = parsed.kind_and_location();
    let title = replace_and(&parsed.title, "&");
    let is_poster =
        kind.to_lowercase().contains("poster") || title.to_lowercase().contains("poster");

    let items = block
        .body
        .iter()
        .map(|line| split_item(line, is_poster))
        .collect::<Result<Vec<_>>>()?;

    Ok(Split {
        session_id: parsed.session_id,
        title,
        kind,
        location,
        is_poster,
        items,
        line_no: block.header.number,
    })
}

fn split_item(line: &Line, is_poster: bool) -> Result<SplitItem> {
    if !is_poster {
        return patterns::parse_timed_item(line).map(SplitItem::Paper);
    }
    if line.text.starts_with('@') {
        return Ok(SplitItem::CrossReference {
            line_no: line.number,
            text: line.text.clone(),
        });
    }
    patterns::parse_poster_item(line).map(SplitItem::Poster)
}
