//! Schedule → export rows
//!
//! [`Converter`] walks a parsed [`Schedule`] in source order and emits rows
//! through a [`RecordSink`]. IDs are allocated at emission time: a session
//! first, then for each of its presentations the paper ID followed by any
//! new author IDs.

use crate::models::{
    AuthorRow, BestPaperSession, BreakSession, PaperRow, PaperTrack, PlainSession, PosterItem,
    Schedule, SessionEntity, SessionGroup, SessionRow, Split, SplitItem, TimeRange, TimedItem,
};
use crate::services::{split_authors, AppId, KeynoteResolver, LinkResolver, Linker};
use crate::tables::{RecordSink, SubmissionTables};
use chrono::format::{Item, StrftimeItems};
use chrono::NaiveDate;
use sched_common::config::{EventText, ScheduleConfig};
use sched_common::{Error, Result, TomlConfig};
use tracing::{debug, info, warn};

/// Row counts of one conversion run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub sessions: usize,
    pub papers: usize,
    pub links: usize,
    pub new_authors: usize,
    /// `@` poster lines skipped as cross-references
    pub cross_references: usize,
    pub last_id: Option<AppId>,
}

/// Session context shared by the presentations inside it
struct Slot<'a> {
    session: AppId,
    date: &'a str,
    location: &'a str,
}

pub struct Converter {
    schedule: ScheduleConfig,
    events: EventText,
    tables: SubmissionTables,
    links: LinkResolver,
    keynotes: KeynoteResolver,
    linker: Linker,
    summary: RunSummary,
}

impl Converter {
    pub fn new(
        config: &TomlConfig,
        tables: SubmissionTables,
        links: LinkResolver,
        linker: Linker,
    ) -> Result<Self> {
        let date_format = &config.schedule.date_format;
        if StrftimeItems::new(date_format).any(|item| item == Item::Error) {
            return Err(Error::Config(format!(
                "schedule.date_format {:?} is not a valid date format",
                date_format
            )));
        }

        Ok(Self {
            schedule: config.schedule.clone(),
            events: config.events.clone(),
            tables,
            links,
            keynotes: KeynoteResolver::new(config.keynotes.clone()),
            linker,
            summary: RunSummary::default(),
        })
    }

    /// Emit every day's sessions in source order
    pub fn convert(&mut self, schedule: &Schedule, sink: &mut dyn RecordSink) -> Result<RunSummary> {
        info!(
            first_id = self.linker.last_issued().0 + 1,
            days = schedule.days.len(),
            "Converting schedule"
        );

        for day in &schedule.days {
            let date = self.format_date(day.date);
            for session in &day.sessions {
                self.emit_session(session, &date, sink)?;
            }
        }

        self.summary.new_authors = self.linker.new_authors();
        if self.summary.sessions + self.summary.papers + self.summary.new_authors > 0 {
            self.summary.last_id = Some(self.linker.last_issued());
        }

        info!(
            sessions = self.summary.sessions,
            papers = self.summary.papers,
            links = self.summary.links,
            new_authors = self.summary.new_authors,
            cross_references = self.summary.cross_references,
            "Conversion complete"
        );
        Ok(self.summary.clone())
    }

    fn format_date(&self, date: NaiveDate) -> String {
        date.format(&self.schedule.date_format).to_string()
    }

    fn emit_session(
        &mut self,
        session: &SessionEntity,
        date: &str,
        sink: &mut dyn RecordSink,
    ) -> Result<()> {
        debug!(line = session.line_no(), "Emitting session");

        let (plain, title, location, description) = match session {
            SessionEntity::Break(brk) => return self.emit_break(brk, date, sink),
            SessionEntity::BestPaper(best) => return self.emit_best_paper(best, date, sink),
            SessionEntity::Group(group) => return self.emit_group(group, date, sink),
            SessionEntity::Keynote(s) => {
                let (title, description) = match self.keynotes.resolve(&s.title) {
                    Some(resolved) => (resolved.title, resolved.description),
                    None => {
                        warn!(line = session.line_no(), title = %s.title, "No keynote entry matches this title");
                        (s.title.clone(), String::new())
                    }
                };
                (s, title, s.location.clone(), description)
            }
            SessionEntity::Opening(s) => (s, s.title.clone(), s.location.clone(), String::new()),
            SessionEntity::SocialEvent(s) => {
                let location = self
                    .events
                    .social_location
                    .clone()
                    .unwrap_or_else(|| s.location.clone());
                (s, s.title.clone(), location, self.events.social_description.clone())
            }
            SessionEntity::BusinessMeeting(s) => (
                s,
                s.title.clone(),
                s.location.clone(),
                self.events.business_description.clone(),
            ),
        };

        self.emit_plain(plain, title, location, description, date, sink)?;
        Ok(())
    }

    fn emit_break(&mut self, brk: &BreakSession, date: &str, sink: &mut dyn RecordSink) -> Result<()> {
        let row = SessionRow {
            app_id: self.linker.next_id(),
            title: break_title(&brk.title).to_string(),
            date: date.to_string(),
            start_time: brk.time.start.clone(),
            end_time: brk.time.end.clone(),
            location: String::new(),
            category: self.schedule.session_category.clone(),
            description: String::new(),
        };
        self.write_session(&row, sink)
    }

    fn emit_plain(
        &mut self,
        session: &PlainSession,
        title: String,
        location: String,
        description: String,
        date: &str,
        sink: &mut dyn RecordSink,
    ) -> Result<AppId> {
        let row = SessionRow {
            app_id: self.linker.next_id(),
            title,
            date: date.to_string(),
            start_time: session.time.start.clone(),
            end_time: session.time.end.clone(),
            location,
            category: self.schedule.session_category.clone(),
            description,
        };
        self.write_session(&row, sink)?;
        Ok(row.app_id)
    }

    fn emit_best_paper(
        &mut self,
        best: &BestPaperSession,
        date: &str,
        sink: &mut dyn RecordSink,
    ) -> Result<()> {
        let s = &best.session;
        let session = self.emit_plain(s, s.title.clone(), s.location.clone(), String::new(), date, sink)?;
        let slot = Slot {
            session,
            date,
            location: &s.location,
        };
        for paper in &best.papers {
            self.emit_timed_paper(&slot, paper, sink)?;
        }
        Ok(())
    }

    fn emit_group(&mut self, group: &SessionGroup, date: &str, sink: &mut dyn RecordSink) -> Result<()> {
        debug!(
            line = group.line_no,
            category = %group.category,
            ordinal = %group.ordinal,
            splits = group.splits.len(),
            "Emitting session group"
        );
        for split in &group.splits {
            self.emit_split(split, &group.time, date, sink)?;
        }
        Ok(())
    }

    fn emit_split(
        &mut self,
        split: &Split,
        time: &TimeRange,
        date: &str,
        sink: &mut dyn RecordSink,
    ) -> Result<()> {
        let (title, description) = if split.is_poster {
            let title = if split.kind.is_empty() {
                split.title.clone()
            } else {
                format!("{} ({})", split.title, split.kind)
            };
            (title, String::new())
        } else {
            let chair = self.links.session_chair_link(&split.session_id);
            if chair.is_none() {
                debug!(session = %split.session_id, "No chair for session");
            }
            let description = chair
                .map(|link| format!("Session Chair: {}", link))
                .unwrap_or_default();
            (split.title.clone(), description)
        };

        let row = SessionRow {
            app_id: self.linker.next_id(),
            title,
            date: date.to_string(),
            start_time: time.start.clone(),
            end_time: time.end.clone(),
            location: split.location.clone(),
            category: self.schedule.session_category.clone(),
            description,
        };
        self.write_session(&row, sink)?;

        let slot = Slot {
            session: row.app_id,
            date,
            location: &split.location,
        };
        for item in &split.items {
            match item {
                SplitItem::Paper(paper) => self.emit_timed_paper(&slot, paper, sink)?,
                SplitItem::Poster(poster) => self.emit_poster(&slot, poster, time, sink)?,
                SplitItem::CrossReference { line_no, text } => {
                    debug!(line = line_no, text = %text, "Skipping poster cross-reference");
                    self.summary.cross_references += 1;
                }
            }
        }
        Ok(())
    }

    /// Oral or best paper: PDF and video links
    fn emit_timed_paper(&mut self, slot: &Slot<'_>, paper: &TimedItem, sink: &mut dyn RecordSink) -> Result<()> {
        let track = PaperTrack::from_id(&paper.paper_id);
        let pdf = match track {
            PaperTrack::Tacl => self.links.tacl_link(&paper.title),
            _ => self.links.anthology_link(&paper.title),
        };
        let links = format!("{}{}", pdf, self.links.video_link(&paper.title));
        self.emit_paper(
            slot,
            &paper.paper_id,
            paper.line_no,
            track.display_title(&paper.title),
            &paper.time,
            &links,
            sink,
        )
    }

    /// Poster or demo: PDF link only, group time range
    fn emit_poster(
        &mut self,
        slot: &Slot<'_>,
        poster: &PosterItem,
        time: &TimeRange,
        sink: &mut dyn RecordSink,
    ) -> Result<()> {
        let track = PaperTrack::from_id(&poster.paper_id);
        let pdf = match track {
            PaperTrack::Tacl => self.links.tacl_link(&poster.title),
            PaperTrack::Main | PaperTrack::Demo => self.links.anthology_link(&poster.title),
        };
        self.emit_paper(
            slot,
            &poster.paper_id,
            poster.line_no,
            track.display_title(&poster.title),
            time,
            &pdf,
            sink,
        )
    }

    #[allow(clippy::too_many_arguments)]
    fn emit_paper(
        &mut self,
        slot: &Slot<'_>,
        paper_id: &str,
        line_no: usize,
        title: String,
        time: &TimeRange,
        links: &str,
        sink: &mut dyn RecordSink,
    ) -> Result<()> {
        let abstract_text = self.tables.abstract_of(paper_id, line_no)?;
        let names = split_authors(self.tables.authors_of(paper_id, line_no)?);

        let row = PaperRow {
            app_session_id: slot.session,
            app_id: self.linker.next_id(),
            title,
            date: slot.date.to_string(),
            start_time: time.start.clone(),
            end_time: time.end.clone(),
            location: slot.location.to_string(),
            category: self.schedule.paper_category.clone(),
            description: format!("{}{}", abstract_text, links),
        };
        sink.paper(&row)?;
        self.summary.papers += 1;

        let linked = self.linker.link(slot.session, row.app_id, &names, sink)?;
        self.summary.links += linked;
        debug!(
            line = line_no,
            paper = %paper_id,
            app_id = %row.app_id,
            authors = linked,
            "Emitted paper"
        );
        Ok(())
    }

    fn write_session(&mut self, row: &SessionRow, sink: &mut dyn RecordSink) -> Result<()> {
        sink.session(row)?;
        self.summary.sessions += 1;
        debug!(app_id = %row.app_id, title = %row.title, "Emitted session");
        Ok(())
    }
}

/// Display title of a break: `Lunch`, `Mini-Break` or `Coffee Break`
pub fn break_title(title: &str) -> &'static str {
    let lowered = title.to_lowercase();
    if lowered == "lunch" {
        "Lunch"
    } else if lowered.contains("mini") {
        "Mini-Break"
    } else {
        "Coffee Break"
    }
}

/// Write seeded author rows back out so a replaced authors table stays complete
pub fn replay_seed_authors(rows: &[AuthorRow], sink: &mut dyn RecordSink) -> Result<usize> {
    for row in rows {
        sink.author(row)?;
    }
    debug!(rows = rows.len(), "Re-emitted seeded authors");
    Ok(rows.len())
}
