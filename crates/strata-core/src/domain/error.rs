// ============================================================================
// domain/error.rs - NAMING AND DESCRIPTOR ERRORS
// ============================================================================

use thiserror::Error;

use crate::domain::UnitKind;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (descriptors and names are plain data)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    #[error("Invalid {kind} name '{name}': {reason}")]
    InvalidName {
        kind: UnitKind,
        name: String,
        reason: String,
    },

    #[error("Invalid namespace '{namespace}': {reason}")]
    InvalidNamespace { namespace: String, reason: String },

    #[error("Required field missing: {field}")]
    MissingRequiredField { field: &'static str },
}

impl DomainError {
    pub(crate) fn invalid_name(kind: UnitKind, name: &str, reason: impl Into<String>) -> Self {
        Self::InvalidName {
            kind,
            name: name.to_string(),
            reason: reason.into(),
        }
    }

    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidName { kind, .. } => {
                let mut hints = vec![
                    "Names are converted to StudlyCase: 'create invoice' becomes 'CreateInvoice'"
                        .to_string(),
                    "Use letters, digits, spaces, '-' or '_' only".into(),
                ];
                if let Some(suffix) = kind.suffix() {
                    hints.push(format!(
                        "The '{suffix}' suffix is added for you: 'CreateInvoice' becomes 'CreateInvoice{suffix}'"
                    ));
                }
                hints
            }
            Self::InvalidNamespace { .. } => vec![
                "Namespaces are StudlyCase segments separated by '\\', e.g. 'Acme\\Billing'"
                    .into(),
            ],
            Self::MissingRequiredField { field } => {
                vec![format!("Descriptor field '{field}' was never set")]
            }
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::Validation
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
}
