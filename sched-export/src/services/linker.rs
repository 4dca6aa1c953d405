//! Session/paper/author cross-references
//!
//! The linker owns the shared [`IdAllocator`] and the [`AuthorRegistry`], so
//! every ID issued during a run comes from one place.

use super::author_registry::AuthorRegistry;
use super::id_allocator::{AppId, IdAllocator};
use crate::models::{AuthorRow, LinkingRow};
use crate::tables::RecordSink;
use sched_common::Result;

#[derive(Debug, Clone)]
pub struct Linker {
    allocator: IdAllocator,
    registry: AuthorRegistry,
    new_authors: usize,
}

impl Linker {
    pub fn new(allocator: IdAllocator, registry: AuthorRegistry) -> Self {
        Self {
            allocator,
            registry,
            new_authors: 0,
        }
    }

    /// Linker seeded from an existing author export
    ///
    /// IDs continue after the highest seeded author ID, or from `first_id`
    /// when that is higher.
    pub fn seeded(seed: &[AuthorRow], first_id: Option<u64>) -> Self {
        let registry = AuthorRegistry::from_seed(seed);
        let allocator = IdAllocator::continuing(registry.max_id(), first_id);
        Self::new(allocator, registry)
    }

    /// Allocate an ID for a session or paper
    pub fn next_id(&mut self) -> AppId {
        self.allocator.next()
    }

    /// Emit one author row and one linking row per name
    ///
    /// Names are resolved in order, so new authors receive increasing IDs in
    /// the order they appear on the paper. Returns the number of links.
    pub fn link(
        &mut self,
        session: AppId,
        paper: AppId,
        names: &[String],
        sink: &mut dyn RecordSink,
    ) -> Result<usize> {
        for name in names {
            let (author, created) = self.registry.resolve(name, &mut self.allocator);
            if created {
                self.new_authors += 1;
            }
            sink.author(&AuthorRow {
                paper_app_id: paper.to_string(),
                author_app_id: author,
                name: name.clone(),
            })?;
            sink.link(&LinkingRow {
                app_session_id: session,
                app_paper_id: paper,
                app_author_id: author,
            })?;
        }
        Ok(names.len())
    }

    /// Authors registered during this run (seeded authors excluded)
    pub fn new_authors(&self) -> usize {
        self.new_authors
    }

    /// Most recently issued ID
    pub fn last_issued(&self) -> AppId {
        self.allocator.last_issued()
    }

    pub fn registry(&self) -> &AuthorRegistry {
        &self.registry
    }
}
