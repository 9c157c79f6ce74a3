//! The scenario a tester simulates.

use std::fmt;
use std::sync::Arc;

use crate::application::ports::FormRequestFactory;
use crate::application::services::context::TesterOptions;
use crate::domain::{HttpMethod, Payload, SimulatedRequest};

/// Which form request to build, and the request it is built from.
///
/// Built incrementally by the `RequestTester` setters. Nothing is checked
/// until evaluation.
#[derive(Clone, Default)]
pub struct Scenario {
    pub(crate) form_request: Option<Arc<dyn FormRequestFactory>>,
    pub(crate) method: Option<HttpMethod>,
    pub(crate) route: Option<String>,
    pub(crate) payload: Payload,
}

impl Scenario {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn form_request(&self) -> Option<&Arc<dyn FormRequestFactory>> {
        self.form_request.as_ref()
    }

    /// Diagnostic name of the form request type, if set.
    pub fn form_request_name(&self) -> Option<String> {
        self.form_request.as_ref().map(|f| f.name())
    }

    pub const fn method(&self) -> Option<HttpMethod> {
        self.method
    }

    pub fn route(&self) -> Option<&str> {
        self.route.as_deref()
    }

    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    /// The request a form request is constructed from, falling back to the
    /// configured defaults for anything unset.
    pub fn to_request(&self, options: &TesterOptions) -> SimulatedRequest {
        SimulatedRequest::new(
            self.method.unwrap_or(options.default_method),
            self.route.as_deref().unwrap_or(&options.default_route),
            self.payload.clone(),
        )
    }
}

impl PartialEq for Scenario {
    fn eq(&self, other: &Self) -> bool {
        let same_form_request = match (&self.form_request, &other.form_request) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b) || a.name() == b.name(),
            (None, None) => true,
            _ => false,
        };

        same_form_request
            && self.method == other.method
            && self.route == other.route
            && self.payload == other.payload
    }
}

impl fmt::Debug for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scenario")
            .field("form_request", &self.form_request_name())
            .field("method", &self.method)
            .field("route", &self.route)
            .field("payload", &self.payload)
            .finish()
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} ({})",
            self.method.map_or("<no method>", |m| m.as_str()),
            self.route.as_deref().unwrap_or("<no route>"),
            self.form_request_name().as_deref().unwrap_or("<no form request>")
        )
    }
}
