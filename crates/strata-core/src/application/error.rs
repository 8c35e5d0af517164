//! Application layer errors.
//!
//! These errors represent failures in orchestration, not naming rules.
//! Naming errors are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::UnitKind;
use crate::error::ErrorCategory;

/// Errors that occur while locating, generating or removing units.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// Generation target already exists on disk.
    #[error("{kind} already exists at {}", path.display())]
    AlreadyExists { kind: UnitKind, path: PathBuf },

    /// Named unit, service or domain does not exist.
    #[error("{kind} \"{name}\" could not be found")]
    NotFound { kind: UnitKind, name: String },

    /// The manifest has no PSR-4 entry for the source directory.
    #[error("Root namespace not set: no PSR-4 autoload entry maps to \"{directory}/\"")]
    NamespaceNotConfigured { directory: String },

    /// The manifest is missing or is not valid JSON.
    #[error("Project manifest unreadable at {path}: {reason}")]
    ManifestUnreadable { path: PathBuf, reason: String },

    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// No stub template with this name is available.
    #[error("Stub template '{name}' is not available")]
    StubMissing { name: String },

    /// Template rendering failed.
    #[error("Template rendering failed: {reason}")]
    RenderingFailed { reason: String },

    /// Operation disabled for the current install mode.
    #[error("{operation} is not available in a microservice installation")]
    Unsupported { operation: &'static str },

    /// Store access failed (lock poisoned).
    #[error("File store lock poisoned")]
    StoreLockError,

    /// Event sink refused an event.
    #[error("Could not publish {event}: {reason}")]
    PublishFailed { event: String, reason: String },
}

impl ApplicationError {
    pub(crate) fn not_found(kind: UnitKind, name: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            name: name.into(),
        }
    }

    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::AlreadyExists { kind, path } => vec![
                format!("Remove {} first if you want to regenerate it", path.display()),
                format!("Or pick a different {} name", kind.as_str().to_lowercase()),
            ],
            Self::NotFound { kind, .. } => {
                let listing = match kind {
                    UnitKind::Service => "strata list:services",
                    UnitKind::Domain => "strata list:domains",
                    UnitKind::Feature => "strata list:features",
                    _ => "strata list:jobs",
                };
                vec![
                    format!("Try: {listing} to see what exists"),
                    "Or: strata search <name> for a fuzzy match".into(),
                ]
            }
            Self::NamespaceNotConfigured { directory } => vec![
                format!(
                    "Add an entry such as \"App\\\\\": \"{directory}/\" under autoload.psr-4 in composer.json"
                ),
                "Or run: strata src:name <Namespace> after fixing the manifest".into(),
            ],
            Self::ManifestUnreadable { path, .. } => vec![
                format!("Check that {} exists and is valid JSON", path.display()),
                "Run strata from the project root or pass --project".into(),
            ],
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
            ],
            Self::StubMissing { .. } => vec![
                "Check the stubs.dir setting or the STRATA_STUBS_DIR variable".into(),
                "Unset it to fall back to the built-in stubs".into(),
            ],
            Self::Unsupported { .. } => vec![
                "Microservice installations have no app/Services directory".into(),
                "Run strata init:monolith to convert the layout".into(),
            ],
            Self::StoreLockError => vec![
                "The file store is locked".into(),
                "Try again in a moment".into(),
            ],
            Self::RenderingFailed { .. } | Self::PublishFailed { .. } => {
                vec!["Check the error details above".into()]
            }
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::AlreadyExists { .. } => ErrorCategory::Conflict,
            Self::NotFound { .. } => ErrorCategory::NotFound,
            Self::NamespaceNotConfigured { .. }
            | Self::ManifestUnreadable { .. }
            | Self::StubMissing { .. } => ErrorCategory::Configuration,
            Self::Unsupported { .. } => ErrorCategory::Validation,
            Self::FilesystemError { .. }
            | Self::RenderingFailed { .. }
            | Self::StoreLockError
            | Self::PublishFailed { .. } => ErrorCategory::Internal,
        }
    }
}
