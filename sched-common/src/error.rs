//! Common error types for schedule export
//!
//! Every variant except `Io`, `Csv` and `Config` carries enough context
//! (table, key, source line) for the operator to fix the input and rerun.

use thiserror::Error;

/// Common result type for schedule export operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across schedule export crates
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV read/write error (wraps csv::Error)
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// A block header did not match the pattern of its classified kind
    #[error("Malformed {kind} header at line {line_no}: {line:?}")]
    MalformedHeader {
        kind: String,
        line_no: usize,
        line: String,
    },

    /// A session header matched none of the known entity keywords
    #[error("Unrecognized session kind at line {line_no}: {line:?}")]
    UnrecognizedEntity { line_no: usize, line: String },

    /// A day header could not be parsed as a calendar date
    #[error("Invalid day header at line {line_no}: {text:?}")]
    InvalidDate { line_no: usize, text: String },

    /// A side table contains the same key twice
    #[error("Duplicate key {key:?} in {table} table")]
    DuplicateKey { table: String, key: String },

    /// A schedule entry references a key absent from a side table
    #[error("No {table} entry for {key:?} (referenced at line {line_no})")]
    MissingLookup {
        table: String,
        key: String,
        line_no: usize,
    },

    /// Invalid user input or table row
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
