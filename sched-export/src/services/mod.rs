//! Conversion services: ID allocation, author dedup, linking, link and
//! keynote lookups

pub mod author_registry;
pub mod id_allocator;
pub mod keynote_resolver;
pub mod link_resolver;
pub mod linker;

pub use author_registry::{split_authors, AuthorRegistry};
pub use id_allocator::{AppId, IdAllocator};
pub use keynote_resolver::{KeynoteResolver, ResolvedKeynote};
pub use link_resolver::{Chair, LinkResolver};
pub use linker::Linker;
