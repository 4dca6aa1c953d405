//! Side-table input and export-table output

pub mod loader;
pub mod writer;

pub use loader::SubmissionTables;
pub use writer::{check_seed_location, CsvTables, MemoryTables, RecordSink};
