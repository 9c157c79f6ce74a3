// ============================================================================
// domain/error.rs - SCENARIO DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (testers hand them back by value)
/// - Categorizable (for diagnostics)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Parse Errors
    // ========================================================================
    #[error("unknown HTTP method: {0}")]
    UnknownMethod(String),

    #[error("payload must be a JSON object, got {kind}")]
    PayloadNotAnObject { kind: &'static str },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::UnknownMethod(method) => vec![
                format!("'{}' is not a supported method", method),
                "Use one of: GET, HEAD, POST, PUT, PATCH, DELETE, OPTIONS".into(),
            ],
            Self::PayloadNotAnObject { .. } => vec![
                "Build the payload from a `json!({ ... })` object literal".into(),
                "Or pass an array of (field, value) pairs".into(),
            ],
        }
    }

    /// Error category for diagnostics.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::UnknownMethod(_) | Self::PayloadNotAnObject { .. } => ErrorCategory::Parse,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Parse,
}
