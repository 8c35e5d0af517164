//! Strata Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the Strata
//! unit scaffolding tool, following hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           strata-cli (CLI)              │
//! │   make:* / delete:* / list:* commands   │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │ (Catalog, UnitGenerator, UnitRemover)   │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │ (FileStore, StubStore, Renderer, ...)   │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │     strata-adapters (Infrastructure)    │
//! │ (LocalFileStore, BuiltinStubStore, ...) │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │  (naming, Layout, descriptors, scoring) │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use strata_core::application::{Project, UnitGenerator};
//!
//! // 1. Open the project (adapters injected by the caller)
//! let project = Project::open(base_path, filesystem, &manifest, "app").unwrap();
//!
//! // 2. Generate a queueable job
//! let generator = UnitGenerator::new(&project, &stubs, &renderer);
//! let job = generator.generate_job("CreateInvoice", "Billing", true).unwrap();
//! println!("{}", job.relative_path().display());
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        Catalog, Project, ProjectInitializer, SearchResults, UnitGenerator, UnitRemover,
        ports::{EventSink, FileStore, ProjectManifest, StubStore, TemplateRenderer},
    };
    pub use crate::domain::{
        Bindings, ControllerStyle, Domain, InstallMode, JobRef, Layout, Owner, Service, StubId,
        UnitDescriptor, UnitKind, UnitStarted,
    };
    pub use crate::error::{StrataError, StrataResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
