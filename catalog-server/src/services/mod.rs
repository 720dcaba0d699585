//! Service layer
//!
//! Orchestration between handlers and repositories: identifier resolution
//! and the slug-allocating write paths.

pub mod catalog;
pub mod slug;

pub use catalog::CatalogService;
pub use slug::{SlugAllocator, slugify};
