// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for Strata.
//!
//! Pure logic only: naming rules, path and namespace computation, unit
//! descriptors, job composition and similarity scoring. All I/O goes through
//! the ports defined in the application layer.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No I/O**: No filesystem, process or network calls
//! - **No tracing**: Observability belongs to the application and CLI layers
//! - **Immutable values**: Descriptors and entities are Clone + PartialEq
pub mod composition;
pub mod entities;
pub mod error;
pub mod events;
pub mod layout;
pub mod naming;
pub mod similarity;
pub mod template;

pub use composition::{Invocations, JobRef};
pub use entities::{Domain, Owner, Service, UnitDescriptor, UnitDescriptorBuilder};
pub use error::{DomainError, ErrorCategory};
pub use events::UnitStarted;
pub use layout::{InstallMode, Layout, UNIT_NAMESPACE};
pub use naming::UnitKind;
pub use template::{Bindings, ControllerStyle, StubId};
