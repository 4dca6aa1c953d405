//! # Schedule Export Common Library
//!
//! Shared code for the schedule export tooling:
//! - Error type covering input, lookup and I/O failures
//! - TOML configuration model and file resolution
//! - Tracing subscriber setup

pub mod config;
pub mod error;
pub mod logging;

pub use config::TomlConfig;
pub use error::{Error, Result};
