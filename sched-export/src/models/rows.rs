//! Output rows of the four app export tables
//!
//! Field order matches the column order of the CSV tables.

use crate::services::AppId;
use serde::Serialize;

pub const SESSION_HEADERS: [&str; 8] = [
    "Session ID",
    "Session Title",
    "Date",
    "Time Start",
    "Time End",
    "Room/Location",
    "Schedule Track",
    "Description",
];

pub const PAPER_HEADERS: [&str; 9] = [
    "Session ID",
    "Presentation ID",
    "Session Title",
    "Date",
    "Time Start",
    "Time End",
    "Room/Location",
    "Schedule Track",
    "Description",
];

pub const AUTHOR_HEADERS: [&str; 3] = ["Presentation ID", "Author ID", "Name"];

pub const LINKING_HEADERS: [&str; 3] = ["Session ID", "Presentation ID", "Author ID"];

/// Sessions table row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionRow {
    pub app_id: AppId,
    pub title: String,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    pub location: String,
    pub category: String,
    pub description: String,
}

/// Papers table row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaperRow {
    pub app_session_id: AppId,
    pub app_id: AppId,
    pub title: String,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    pub location: String,
    pub category: String,
    pub description: String,
}

/// Authors table row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthorRow {
    /// Presentation the author appears on; free text in seeded rows
    pub paper_app_id: String,
    pub author_app_id: AppId,
    pub name: String,
}

/// Linking table row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LinkingRow {
    pub app_session_id: AppId,
    pub app_paper_id: AppId,
    pub app_author_id: AppId,
}
