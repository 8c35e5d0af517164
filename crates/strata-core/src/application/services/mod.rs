//! Application services - orchestrate use cases.
//!
//! Services borrow an opened [`Project`] and coordinate the domain layer and
//! ports to list, find, generate and delete units.

pub mod catalog;
pub mod generator;
pub mod initializer;
pub mod project;
pub mod remover;
pub mod rewriter;

pub use catalog::{Catalog, SEARCH_THRESHOLD, SearchResults};
pub use generator::{DEFAULT_FRAMEWORK_VERSION, UnitGenerator};
pub use initializer::ProjectInitializer;
pub use project::Project;
pub use remover::{Removal, UnitRemover};
pub use rewriter::{NamespaceChange, NamespaceRewriter};
