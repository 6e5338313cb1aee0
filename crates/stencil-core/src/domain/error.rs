// ============================================================================
// domain/error.rs - VALIDATION AND DISCOVERY ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (reported once, logged once)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors
    // ========================================================================
    #[error("The {field} is required")]
    MissingRequiredField { field: &'static str },

    #[error("Invalid {entity} selection: '{input}' (expected a number from 1 to {available})")]
    InvalidSelection {
        entity: &'static str,
        input: String,
        available: usize,
    },

    #[error("Invalid {field}: '{input}' (expected {expected})")]
    InvalidChoice {
        field: &'static str,
        input: String,
        expected: &'static str,
    },

    #[error("Domain '{name}' already exists")]
    DuplicateDomain { name: String },

    #[error("{what} already exists at {path}")]
    AlreadyExists { what: String, path: String },

    #[error("Tool '{name}' is already registered")]
    ToolAlreadyRegistered { name: String },

    // ========================================================================
    // Discovery Errors
    // ========================================================================
    #[error("No {entity}s found under {location}")]
    NothingToSelect {
        entity: &'static str,
        location: String,
    },

    // ========================================================================
    // Malformed Inputs
    // ========================================================================
    #[error("Invalid rewrite pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("Malformed manifest: {reason}")]
    ManifestInvalid { reason: String },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::MissingRequiredField { field } => {
                vec![format!("Enter a non-empty {field} when prompted")]
            }
            Self::InvalidSelection { available, .. } => vec![format!(
                "Enter the number shown next to the entry (1-{available})"
            )],
            Self::InvalidChoice { expected, .. } => vec![format!("Answer with {expected}")],
            Self::DuplicateDomain { name } => vec![
                format!("Pick a name other than '{name}'"),
                "Use `stencil service` or `stencil client` to extend an existing domain".into(),
            ],
            Self::AlreadyExists { .. } => vec![
                "Choose a different name".into(),
                "Or remove the existing file first".into(),
            ],
            Self::ToolAlreadyRegistered { name } => vec![format!(
                "Remove '{name}' from src/tools.metadata.ts and src/mcp/tools.ts, or pick another name"
            )],
            Self::NothingToSelect { entity, .. } => match *entity {
                "domain" => vec!["Create one first with `stencil domain`".into()],
                "service" => vec!["Create one first with `stencil service`".into()],
                _ => vec!["Create one first".into()],
            },
            Self::ManifestInvalid { .. } => vec![
                "Check that package.json is valid JSON".into(),
                "Run `npm pkg fix` or restore it from version control".into(),
            ],
            Self::InvalidPattern { .. } => vec!["This is a bug, please report it".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::NothingToSelect { .. } => ErrorCategory::Discovery,
            Self::InvalidPattern { .. } | Self::ManifestInvalid { .. } => ErrorCategory::Internal,
            _ => ErrorCategory::Validation,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Discovery,
    Internal,
}
