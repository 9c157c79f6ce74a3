//! Application layer errors.
//!
//! These errors mean the scenario itself is broken: nothing to assert on.
//! Expected outcomes (unauthorized, invalid input) never show up here; they
//! are absorbed into `ValidationOutcome`.

use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur while building or evaluating a form request.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// No form request type was set on the scenario.
    #[error("No form request type set for this scenario")]
    MissingFormRequest,

    /// The form request factory refused to build an instance.
    #[error("Failed to construct form request '{form_request}': {reason}")]
    ConstructionFailed {
        form_request: String,
        reason: String,
    },

    /// `validate_resolved` raised something other than an authorization or
    /// validation failure.
    #[error("Form request '{form_request}' raised an unexpected error: {reason}")]
    EvaluationFailed {
        form_request: String,
        reason: String,
    },
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::MissingFormRequest => vec![
                "Call `.form_request::<YourRequest>()` before asserting".into(),
                "Or pass a factory with `.form_request_factory(...)`".into(),
            ],
            Self::ConstructionFailed { form_request, .. } => vec![
                format!("Check the `create` implementation of {}", form_request),
                "Make sure the payload has the shape the form request expects".into(),
            ],
            Self::EvaluationFailed { .. } => vec![
                "Only authorization and validation failures are assertable".into(),
                "Any other error points at a broken test setup".into(),
            ],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::MissingFormRequest => ErrorCategory::Configuration,
            Self::ConstructionFailed { .. } => ErrorCategory::Construction,
            Self::EvaluationFailed { .. } => ErrorCategory::Evaluation,
        }
    }
}
