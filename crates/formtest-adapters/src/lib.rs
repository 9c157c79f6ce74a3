//! In-memory adapters for formtest.
//!
//! This crate implements the ports defined in `formtest-core::application::ports`
//! with simple in-process collaborators, so a form request can be exercised
//! without a web framework behind it.

pub mod auth;
pub mod form_request;
pub mod reporter;
pub mod routing;

// Re-export commonly used adapters
pub use auth::InMemoryAuth;
pub use form_request::{RuleFormRequest, RuleFormRequestBuilder};
pub use reporter::{RecordingReporter, Report};
pub use routing::{RouteDefinition, RoutingError, StaticRouteTable};
