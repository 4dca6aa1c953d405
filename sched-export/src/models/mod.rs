//! Data model: input lines, classified schedule entities, output rows

pub mod line;
pub mod rows;
pub mod schedule;

pub use line::{Line, Marker};
pub use rows::{AuthorRow, LinkingRow, PaperRow, SessionRow};
pub use schedule::{
    BestPaperSession, BreakSession, Day, PaperTrack, PlainSession, PosterItem, Schedule,
    SessionEntity, SessionGroup, Split, SplitItem, TimeRange, TimedItem,
};
