//! Error handling for the formtest harness.
//!
//! Wraps core and adapter errors so a harness caller deals with one type,
//! and keeps the core's suggestions reachable.

use thiserror::Error;

use formtest_adapters::routing::RoutingError;
use formtest_core::error::TesterError;

// Re-export so callers only need `use formtest::error::*`.
pub use formtest_core::error::ErrorCategory as CoreCategory;

/// Result type alias for harness operations.
pub type FormTestResult<T> = Result<T, FormTestError>;

#[derive(Debug, Error)]
pub enum FormTestError {
    /// A configuration source could not be read or holds a bad value.
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Route definitions could not be registered.
    #[error("Routing error: {0}")]
    Routing(#[from] RoutingError),

    /// An error propagated from `formtest-core`.
    #[error("Tester failed: {0}")]
    Core(#[from] TesterError),

    /// The tracing subscriber could not be installed.
    #[error("Logging setup failed: {0}")]
    Logging(String),
}

impl From<anyhow::Error> for FormTestError {
    fn from(err: anyhow::Error) -> Self {
        FormTestError::Config {
            message: format!("{err:#}"),
            source: Some(err.into()),
        }
    }
}

impl FormTestError {
    /// Actionable hints for the person running the tests.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Config { .. } => vec![
                "Check formtest.toml and any FORMTEST_* environment variables".into(),
                "default_method must be one of GET, HEAD, POST, PUT, PATCH, DELETE, OPTIONS"
                    .into(),
            ],
            Self::Routing(RoutingError::DuplicateName(_)) => {
                vec!["Route names must be unique within one table".into()]
            }
            Self::Routing(_) => {
                vec!["Route patterns look like /posts/{post}; each parameter once".into()]
            }
            Self::Core(e) => e.suggestions(),
            Self::Logging(_) => vec![
                "Another subscriber was probably installed first; use init_logging once".into(),
            ],
        }
    }

    /// Category of the underlying core error, if any.
    pub fn core_category(&self) -> Option<CoreCategory> {
        match self {
            Self::Core(e) => Some(e.category()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use formtest_core::application::ApplicationError;

    #[test]
    fn core_errors_keep_their_suggestions() {
        let err: FormTestError = TesterError::from(ApplicationError::MissingFormRequest).into();
        assert!(!err.suggestions().is_empty());
        assert_eq!(err.core_category(), Some(CoreCategory::Configuration));
    }

    #[test]
    fn anyhow_errors_become_config_errors() {
        let err: FormTestError = anyhow::anyhow!("bad file").into();
        assert!(matches!(err, FormTestError::Config { .. }));
        assert!(err.to_string().contains("bad file"));
        assert_eq!(err.core_category(), None);
    }

    #[test]
    fn routing_errors_convert() {
        let err: FormTestError = RoutingError::DuplicateName("home".into()).into();
        assert!(err.to_string().contains("home"));
        assert_eq!(err.suggestions().len(), 1);
    }
}
