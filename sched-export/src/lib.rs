//! sched-export library interface
//!
//! Converts a marker-structured conference order file and its side tables
//! into the sessions, papers, authors and linking tables of the app export.
//! Exposes the pipeline stages for integration testing.

pub mod models;
pub mod order;
pub mod pipeline;
pub mod services;
pub mod tables;

pub use pipeline::{replay_seed_authors, Converter, RunSummary};
