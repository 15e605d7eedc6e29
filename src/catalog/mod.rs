//! The problem catalog
//!
//! A static sheet of practice problems grouped into topic sections.

pub mod loader;
pub mod model;

pub use loader::{CatalogError, bundled, load_catalog, parse_catalog};
pub use model::{Catalog, Difficulty, LinkKind, Problem, SourceLinks, TopicSection};
