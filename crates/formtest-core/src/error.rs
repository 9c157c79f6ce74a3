//! Unified error handling for formtest core.
//!
//! This module provides a unified error type that wraps domain and application
//! errors, with context and user-actionable suggestions.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// Root error type for formtest core operations.
#[derive(Debug, Error, Clone)]
pub enum TesterError {
    /// Errors from the domain layer (bad scenario values).
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    /// Errors from the application layer (construction and evaluation).
    #[error("Application error: {0}")]
    Application(#[from] ApplicationError),

    /// Unexpected internal errors (bugs).
    #[error("Internal error: {message}. This is a bug, please report it.")]
    Internal { message: String },
}

impl TesterError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
            Self::Internal { .. } => vec![
                "This appears to be a bug in formtest".into(),
                "Please report this issue at: https://github.com/cosecruz/formtest/issues".into(),
            ],
        }
    }

    /// Get error category for display purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                crate::domain::ErrorCategory::Parse => ErrorCategory::Parse,
            },
            Self::Application(e) => e.category(),
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }

    /// Multi-line diagnostic: the error followed by its suggestions.
    pub fn diagnostic(&self) -> String {
        let mut out = self.to_string();
        for hint in self.suggestions() {
            out.push_str("\n  hint: ");
            out.push_str(&hint);
        }
        out
    }
}

/// Error categories for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Parse,
    Configuration,
    Construction,
    Evaluation,
    Internal,
}

/// Convenient result type alias.
pub type TesterResult<T> = Result<T, TesterError>;
