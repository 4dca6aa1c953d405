//! Side-table loading
//!
//! All side tables are header-less CSV files. Each loader has a reader-based
//! variant so tables can be parsed from memory.

use crate::models::AuthorRow;
use crate::services::{AppId, Chair};
use sched_common::{Error, Result};
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

fn csv_reader<R: Read>(reader: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader)
}

fn column(record: &csv::StringRecord, idx: usize) -> &str {
    record.get(idx).unwrap_or("")
}

/// `submission_id → text` table where a repeated ID is fatal
///
/// Used for the authors and abstracts tables.
pub fn read_keyed_table<R: Read>(reader: R, table: &str) -> Result<HashMap<String, String>> {
    let mut map = HashMap::new();
    for record in csv_reader(reader).records() {
        let record = record?;
        let key = column(&record, 0).trim().to_string();
        let value = column(&record, 1).to_string();
        if map.insert(key.clone(), value).is_some() {
            return Err(Error::DuplicateKey {
                table: table.to_string(),
                key,
            });
        }
    }
    debug!(table = table, rows = map.len(), "Read keyed table");
    Ok(map)
}

/// `title → value` table keyed by lower-cased title; later rows win
///
/// Used for the anthology and video tables.
pub fn read_title_table<R: Read>(reader: R) -> Result<HashMap<String, String>> {
    let mut map = HashMap::new();
    for record in csv_reader(reader).records() {
        let record = record?;
        map.insert(
            column(&record, 0).to_lowercase(),
            column(&record, 1).trim().to_string(),
        );
    }
    Ok(map)
}

/// `session → chair` table; the key is the text before the first `:`
pub fn read_chairs<R: Read>(reader: R) -> Result<HashMap<String, Chair>> {
    let mut map = HashMap::new();
    for record in csv_reader(reader).records() {
        let record = record?;
        let session = column(&record, 0);
        let key = session.split(':').next().unwrap_or(session).trim().to_string();
        let chair = Chair {
            name: column(&record, 1).trim().to_string(),
            email: column(&record, 2).trim().to_string(),
        };
        if map.insert(key.clone(), chair).is_some() {
            return Err(Error::DuplicateKey {
                table: "chairs".to_string(),
                key,
            });
        }
    }
    Ok(map)
}

/// Existing author export rows `(presentation_id, author_id, name)`
///
/// A non-numeric author ID on the first row is taken as a header row.
pub fn read_seed_authors<R: Read>(reader: R) -> Result<Vec<AuthorRow>> {
    let mut rows = Vec::new();
    for (idx, record) in csv_reader(reader).records().enumerate() {
        let record = record?;
        let raw_id = column(&record, 1).trim();
        let author_app_id = match raw_id.parse::<u64>() {
            Ok(id) => AppId(id),
            Err(_) if idx == 0 => {
                debug!(header = ?record, "Skipping author export header row");
                continue;
            }
            Err(_) => {
                return Err(Error::InvalidInput(format!(
                    "author export row {} has non-numeric author ID {:?}",
                    idx + 1,
                    raw_id
                )))
            }
        };
        rows.push(AuthorRow {
            paper_app_id: column(&record, 0).trim().to_string(),
            author_app_id,
            name: column(&record, 2).to_string(),
        });
    }
    Ok(rows)
}

fn open(path: &Path, table: &str) -> Result<File> {
    File::open(path).map_err(|e| {
        Error::Io(std::io::Error::new(
            e.kind(),
            format!("Failed to open {} table {}: {}", table, path.display(), e),
        ))
    })
}

/// Required per-submission tables
#[derive(Debug, Clone, Default)]
pub struct SubmissionTables {
    pub authors: HashMap<String, String>,
    pub abstracts: HashMap<String, String>,
}

impl SubmissionTables {
    pub fn load(authors: &Path, abstracts: &Path) -> Result<Self> {
        let tables = Self {
            authors: read_keyed_table(open(authors, "authors")?, "authors")?,
            abstracts: read_keyed_table(open(abstracts, "abstracts")?, "abstracts")?,
        };
        info!(
            authors = tables.authors.len(),
            abstracts = tables.abstracts.len(),
            "Loaded submission tables"
        );
        Ok(tables)
    }

    /// Author field for a submission; absent IDs are fatal
    pub fn authors_of(&self, paper_id: &str, line_no: usize) -> Result<&str> {
        lookup(&self.authors, "authors", paper_id, line_no)
    }

    /// Abstract for a submission; absent IDs are fatal
    pub fn abstract_of(&self, paper_id: &str, line_no: usize) -> Result<&str> {
        lookup(&self.abstracts, "abstracts", paper_id, line_no)
    }
}

fn lookup<'a>(
    map: &'a HashMap<String, String>,
    table: &str,
    key: &str,
    line_no: usize,
) -> Result<&'a str> {
    map.get(key)
        .map(String::as_str)
        .ok_or_else(|| Error::MissingLookup {
            table: table.to_string(),
            key: key.to_string(),
            line_no,
        })
}

pub fn load_title_table(path: &Path, table: &str) -> Result<HashMap<String, String>> {
    let map = read_title_table(open(path, table)?)?;
    info!(table = table, rows = map.len(), "Loaded title table");
    Ok(map)
}

pub fn load_chairs(path: &Path) -> Result<HashMap<String, Chair>> {
    let map = read_chairs(open(path, "chairs")?)?;
    info!(rows = map.len(), "Loaded session chairs");
    Ok(map)
}

pub fn load_seed_authors(path: &Path) -> Result<Vec<AuthorRow>> {
    let rows = read_seed_authors(open(path, "author export")?)?;
    info!(rows = rows.len(), path = %path.display(), "Loaded seeded authors");
    Ok(rows)
}
