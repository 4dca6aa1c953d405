//! Author name → app ID registry
//!
//! Identity is the literal name string: no case folding or whitespace
//! normalisation beyond what the line preprocessor already did. The registry
//! is seeded from an existing author export and only ever grows.

use super::id_allocator::{AppId, IdAllocator};
use crate::models::AuthorRow;
use std::collections::HashMap;
use tracing::debug;

#[derive(Debug, Clone, Default)]
pub struct AuthorRegistry {
    ids: HashMap<String, AppId>,
}

impl AuthorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry pre-loaded from seeded author rows
    ///
    /// A name listed more than once keeps its last ID, matching a plain
    /// row-by-row load of the export.
    pub fn from_seed(rows: &[AuthorRow]) -> Self {
        let ids = rows
            .iter()
            .map(|row| (row.name.clone(), row.author_app_id))
            .collect();
        Self { ids }
    }

    /// Existing ID for `name`, or a newly allocated one
    ///
    /// Returns the ID and whether it was newly allocated.
    pub fn resolve(&mut self, name: &str, alloc: &mut IdAllocator) -> (AppId, bool) {
        if let Some(&id) = self.ids.get(name) {
            return (id, false);
        }
        let id = alloc.next();
        self.ids.insert(name.to_string(), id);
        debug!(author = %name, id = %id, "Registered new author");
        (id, true)
    }

    pub fn get(&self, name: &str) -> Option<AppId> {
        self.ids.get(name).copied()
    }

    /// Highest ID held by any author
    pub fn max_id(&self) -> Option<AppId> {
        self.ids.values().copied().max()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// Split an author field into individual names
///
/// Names are separated by `", "` or `" and "`. Empty pieces are dropped and a
/// name repeated within one field is kept once, at its first position.
pub fn split_authors(field: &str) -> Vec<String> {
    let normalized = field.trim().replace(" and ", ", ");
    let mut names: Vec<String> = Vec::new();
    for name in normalized.split(", ").map(str::trim) {
        if !name.is_empty() && !names.iter().any(|n| n == name) {
            names.push(name.to_string());
        }
    }
    names
}
