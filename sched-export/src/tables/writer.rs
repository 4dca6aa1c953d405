//! Record emission to the four export tables
//!
//! The pipeline writes through [`RecordSink`]. [`CsvTables`] is the on-disk
//! sink; [`MemoryTables`] collects rows for inspection.
//!
//! **Atomicity:** CSV tables are written to `<table>.csv.tmp` and renamed
//! into place by [`CsvTables::finish`]. A run that fails before `finish`
//! leaves the previous outputs untouched.

use crate::models::rows::{AUTHOR_HEADERS, LINKING_HEADERS, PAPER_HEADERS, SESSION_HEADERS};
use crate::models::{AuthorRow, LinkingRow, PaperRow, SessionRow};
use sched_common::config::OutputMode;
use sched_common::{Error, Result};
use serde::Serialize;
use std::fs::{self, File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Destination for emitted rows
pub trait RecordSink {
    fn session(&mut self, row: &SessionRow) -> Result<()>;
    fn paper(&mut self, row: &PaperRow) -> Result<()>;
    fn author(&mut self, row: &AuthorRow) -> Result<()>;
    fn link(&mut self, row: &LinkingRow) -> Result<()>;
}

/// In-memory tables, in emission order
#[derive(Debug, Clone, Default)]
pub struct MemoryTables {
    pub sessions: Vec<SessionRow>,
    pub papers: Vec<PaperRow>,
    pub authors: Vec<AuthorRow>,
    pub links: Vec<LinkingRow>,
}

impl RecordSink for MemoryTables {
    fn session(&mut self, row: &SessionRow) -> Result<()> {
        self.sessions.push(row.clone());
        Ok(())
    }

    fn paper(&mut self, row: &PaperRow) -> Result<()> {
        self.papers.push(row.clone());
        Ok(())
    }

    fn author(&mut self, row: &AuthorRow) -> Result<()> {
        self.authors.push(row.clone());
        Ok(())
    }

    fn link(&mut self, row: &LinkingRow) -> Result<()> {
        self.links.push(row.clone());
        Ok(())
    }
}

/// File names of the export tables inside the output directory
pub const SESSIONS_FILE: &str = "sessions.csv";
pub const PAPERS_FILE: &str = "papers.csv";
pub const AUTHORS_FILE: &str = "authors.csv";
pub const LINKING_FILE: &str = "linking.csv";

/// One output table staged in a temp file
struct StagedTable {
    target: PathBuf,
    staging: PathBuf,
    writer: csv::Writer<File>,
    rows: usize,
}

impl StagedTable {
    /// Stage a table; `append` copies the current target contents first
    fn open(target: PathBuf, headers: &[&str], append: bool) -> Result<Self> {
        let staging = staging_path(&target);
        let existing = append && target.exists();

        let file = if existing {
            fs::copy(&target, &staging)?;
            let mut file = OpenOptions::new().read(true).write(true).open(&staging)?;
            ensure_trailing_newline(&mut file)?;
            file
        } else {
            File::create(&staging)?
        };

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        if !existing {
            writer.write_record(headers)?;
        }

        debug!(
            table = %target.display(),
            appending = existing,
            "Staged output table"
        );

        Ok(Self {
            target,
            staging,
            writer,
            rows: 0,
        })
    }

    fn write<T: Serialize>(&mut self, row: &T) -> Result<()> {
        self.writer.serialize(row)?;
        self.rows += 1;
        Ok(())
    }

    fn commit(mut self) -> Result<(PathBuf, usize)> {
        self.writer.flush()?;
        drop(self.writer);
        fs::rename(&self.staging, &self.target)?;
        Ok((self.target, self.rows))
    }
}

/// The four export tables on disk
pub struct CsvTables {
    sessions: StagedTable,
    papers: StagedTable,
    authors: StagedTable,
    links: StagedTable,
}

impl CsvTables {
    /// Stage all four tables in `dir`
    ///
    /// `Replace` rewrites every table with a header row. `Append` keeps the
    /// existing sessions/authors/linking rows and adds to them; papers are
    /// always rewritten. Rerunning in append mode duplicates rows.
    pub fn create(dir: &Path, mode: OutputMode) -> Result<Self> {
        fs::create_dir_all(dir)?;
        let append = mode == OutputMode::Append;
        if append {
            warn!(
                dir = %dir.display(),
                "Appending to existing tables; rerunning without resetting them duplicates rows"
            );
        }

        Ok(Self {
            sessions: StagedTable::open(dir.join(SESSIONS_FILE), &SESSION_HEADERS, append)?,
            papers: StagedTable::open(dir.join(PAPERS_FILE), &PAPER_HEADERS, false)?,
            authors: StagedTable::open(dir.join(AUTHORS_FILE), &AUTHOR_HEADERS, append)?,
            links: StagedTable::open(dir.join(LINKING_FILE), &LINKING_HEADERS, append)?,
        })
    }

    /// Flush every table and move it into place
    pub fn finish(self) -> Result<()> {
        for table in [self.sessions, self.papers, self.authors, self.links] {
            let (path, rows) = table.commit()?;
            info!(table = %path.display(), rows, "Wrote table");
        }
        Ok(())
    }
}

impl RecordSink for CsvTables {
    fn session(&mut self, row: &SessionRow) -> Result<()> {
        self.sessions.write(row)
    }

    fn paper(&mut self, row: &PaperRow) -> Result<()> {
        self.papers.write(row)
    }

    fn author(&mut self, row: &AuthorRow) -> Result<()> {
        self.authors.write(row)
    }

    fn link(&mut self, row: &LinkingRow) -> Result<()> {
        self.links.write(row)
    }
}

/// Reject a seed export that replace mode is about to overwrite
///
/// Replace mode rewrites `<dir>/authors.csv`. Seeding from that same file
/// would make each rerun continue from the previous run's IDs.
pub fn check_seed_location(seed: &Path, dir: &Path, mode: OutputMode) -> Result<()> {
    let target = dir.join(AUTHORS_FILE);
    if mode != OutputMode::Replace || !seed.exists() || !target.exists() {
        return Ok(());
    }
    if fs::canonicalize(seed)? == fs::canonicalize(&target)? {
        return Err(Error::InvalidInput(format!(
            "author export {} is also the replace-mode authors output; \
             keep the seed export outside {}",
            seed.display(),
            dir.display()
        )));
    }
    Ok(())
}

fn staging_path(target: &Path) -> PathBuf {
    let mut name = target.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}

/// Terminate a copied table's last row so appended rows start on a new line
fn ensure_trailing_newline(file: &mut File) -> Result<()> {
    let len = file.seek(SeekFrom::End(0))?;
    if len > 0 {
        file.seek(SeekFrom::End(-1))?;
        let mut last = [0u8; 1];
        file.read_exact(&mut last)?;
        file.seek(SeekFrom::End(0))?;
        if last[0] != b'\n' {
            file.write_all(b"\n")?;
        }
    }
    Ok(())
}
