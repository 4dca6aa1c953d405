//! Order file parsing
//!
//! raw text → [`preprocess`] → [`group`] by day → [`group`] by session →
//! [`classify_block`] (which groups session groups by split) → [`Schedule`].
//!
//! Parsing is pure: no IDs are allocated and no side tables are consulted.

pub mod classifier;
pub mod grouper;
pub mod patterns;
pub mod preprocess;

pub use classifier::{classify, classify_block, EntityKind};
pub use grouper::{group, Block};
pub use preprocess::{preprocess, process_line};

use crate::models::{Day, Line, Marker, Schedule};
use chrono::NaiveDate;
use sched_common::{Error, Result};
use tracing::{debug, info};

/// Parse preprocessed lines into days and classified sessions
///
/// `day_format` is the `chrono` format of the day header text, e.g.
/// `"%A, %d %B %Y"` for "Friday, 2 November 2018".
pub fn parse_schedule(lines: &[Line], day_format: &str) -> Result<Schedule> {
    let mut days = Vec::new();

    for day_block in group(lines, Marker::Day) {
        let date = parse_day_header(day_block.header, day_format)?;
        let sessions = group(day_block.body, Marker::Session)
            .iter()
            .map(classify_block)
            .collect::<Result<Vec<_>>>()?;

        debug!(date = %date, sessions = sessions.len(), "Parsed day");

        days.push(Day {
            date,
            line_no: day_block.header.number,
            sessions,
        });
    }

    let schedule = Schedule { days };
    info!(
        days = schedule.days.len(),
        sessions = schedule.session_count(),
        "Parsed order file"
    );
    Ok(schedule)
}

/// Preprocess and parse a whole order file
pub fn parse_order_text(input: &str, day_format: &str) -> Result<Schedule> {
    parse_schedule(&preprocess(input), day_format)
}

fn parse_day_header(header: &Line, day_format: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(&header.text, day_format).map_err(|_| Error::InvalidDate {
        line_no: header.number,
        text: header.text.clone(),
    })
}
