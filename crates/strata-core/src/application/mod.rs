//! Application layer for Strata.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (Catalog, UnitGenerator, UnitRemover, ...)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! naming or layout rules itself. Those live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

#[cfg(test)]
pub(crate) mod testing;

// Re-export main services
pub use services::{
    Catalog, DEFAULT_FRAMEWORK_VERSION, NamespaceChange, NamespaceRewriter, Project,
    ProjectInitializer, Removal, SEARCH_THRESHOLD, SearchResults, UnitGenerator,
    UnitRemover,
};

// Re-export port traits (for adapter implementation)
pub use ports::{EventSink, FileStore, ProjectManifest, StubStore, TemplateRenderer};

pub use error::ApplicationError;
