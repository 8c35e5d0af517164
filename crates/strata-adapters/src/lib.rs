//! Infrastructure adapters for Strata.
//!
//! This crate implements the ports defined in `strata-core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod events;
pub mod filesystem;
pub mod manifest;
pub mod renderer;
pub mod stubs;

// Re-export commonly used adapters
pub use events::{MemoryEventSink, TracingEventSink};
pub use filesystem::{LocalFileStore, MemoryFileStore};
pub use manifest::ComposerManifest;
pub use renderer::PlaceholderRenderer;
pub use stubs::{BuiltinStubStore, DirectoryStubStore};
