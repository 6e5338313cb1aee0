//! Application layer errors.
//!
//! These errors represent failures in orchestration, not input validation.
//! Validation errors are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur while driving a generator.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// Reading an answer failed.
    #[error("Could not read answer to '{question}': {reason}")]
    PromptFailed { question: String, reason: String },

    /// A file the generator depends on is absent.
    #[error("Required file not found: {path}")]
    RequiredFileMissing { path: PathBuf },

    /// The pristine template project is not in the expected state.
    #[error("Template project is not pristine: {reason}")]
    TemplateProjectState { reason: String },
}

impl ApplicationError {
    pub fn filesystem(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::FilesystemError {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
            ],
            Self::PromptFailed { .. } => vec!["Run the command from an interactive terminal".into()],
            Self::RequiredFileMissing { .. } => vec![
                "Run stencil from the project root, or pass --root".into(),
                "Restore the file from version control".into(),
            ],
            Self::TemplateProjectState { .. } => vec![
                "init only runs once, on a fresh copy of the template".into(),
                "Use `stencil domain` to add further domains".into(),
            ],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::FilesystemError { .. } | Self::PromptFailed { .. } => ErrorCategory::Internal,
            Self::RequiredFileMissing { .. } => ErrorCategory::NotFound,
            Self::TemplateProjectState { .. } => ErrorCategory::Validation,
        }
    }
}
