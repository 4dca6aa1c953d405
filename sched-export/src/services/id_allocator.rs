//! Shared app ID counter
//!
//! Sessions, papers and authors draw from one namespace: every issued ID is
//! unique across entity types and strictly increasing.

use serde::Serialize;
use std::fmt;

/// Identifier of a session, paper or author in the app database
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct AppId(pub u64);

impl fmt::Display for AppId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Monotonic ID counter
#[derive(Debug, Clone)]
pub struct IdAllocator {
    last: u64,
}

impl IdAllocator {
    /// Counter whose first issued ID is `seed + 1`
    pub fn starting_after(seed: u64) -> Self {
        Self { last: seed }
    }

    /// Counter continuing after the highest reserved ID
    ///
    /// `first_id` is an optional floor for the first issued ID, used when the
    /// seed export leaves gaps for IDs reserved elsewhere.
    pub fn continuing(highest_reserved: Option<AppId>, first_id: Option<u64>) -> Self {
        let after_reserved = highest_reserved.map_or(0, |id| id.0);
        let after_floor = first_id.map_or(0, |first| first.saturating_sub(1));
        Self::starting_after(after_reserved.max(after_floor))
    }

    /// Issue the next unused ID
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> AppId {
        self.last += 1;
        AppId(self.last)
    }

    /// Most recently issued ID (the seed before any issue)
    pub fn last_issued(&self) -> AppId {
        AppId(self.last)
    }
}
