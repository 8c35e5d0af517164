//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `strata-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `FileStore`: File operations
//!   - `ProjectManifest`: composer.json access
//!   - `StubStore`: Stub template lookup
//!   - `TemplateRenderer`: Placeholder substitution
//!   - `EventSink`: Unit lifecycle events
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - (Defined in CLI layer, implemented by services)

pub mod output;

#[cfg(test)]
pub use output::MockFileStore;
pub use output::{EventSink, FileStore, ProjectManifest, StubStore, TemplateRenderer};
