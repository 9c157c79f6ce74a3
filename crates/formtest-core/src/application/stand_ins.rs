//! Stand-ins injected into every form request the tester builds.
//!
//! A simulated request has no HTTP response context, so the real redirect
//! machinery cannot be constructed. These minimal implementations satisfy the
//! capability ports without side effects.

use std::sync::Arc;

use tracing::debug;

use crate::application::ports::{
    PrincipalAccessor, Redirector, RouteResolver, RouteTable, UrlGenerator, UserResolver,
};
use crate::domain::{MatchedRoute, Principal, Redirect, SimulatedRequest};

/// URL generator that accepts anything and generates nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullUrlGenerator;

impl UrlGenerator for NullUrlGenerator {
    fn to(&self, _path: &str, _parameters: &[(&str, &str)]) -> Option<String> {
        None
    }

    fn route(&self, _name: &str, _parameters: &[(&str, &str)]) -> Option<String> {
        None
    }

    fn action(&self, _action: &str, _parameters: &[(&str, &str)]) -> Option<String> {
        None
    }

    fn previous(&self, _fallback: Option<&str>) -> Option<String> {
        None
    }
}

/// Redirector that never redirects.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullRedirector {
    urls: NullUrlGenerator,
}

impl NullRedirector {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Redirector for NullRedirector {
    fn to(&self, _path: &str, _status: u16) -> Option<Redirect> {
        None
    }

    fn route(&self, _name: &str, _parameters: &[(&str, &str)]) -> Option<Redirect> {
        None
    }

    fn action(&self, _action: &str, _parameters: &[(&str, &str)]) -> Option<Redirect> {
        None
    }

    fn previous(&self, _status: u16) -> Option<Redirect> {
        None
    }

    fn url_generator(&self) -> &dyn UrlGenerator {
        &self.urls
    }
}

/// Matches the simulated request against the route table.
///
/// Routing is context, not something the test asserts on: any routing error
/// resolves to `None`.
pub struct BestEffortRouteResolver {
    routes: Arc<dyn RouteTable>,
    request: SimulatedRequest,
}

impl BestEffortRouteResolver {
    pub fn new(routes: Arc<dyn RouteTable>, request: SimulatedRequest) -> Self {
        Self { routes, request }
    }
}

impl RouteResolver for BestEffortRouteResolver {
    fn resolve(&self) -> Option<MatchedRoute> {
        match self.routes.match_request(&self.request) {
            Ok(route) => Some(route),
            Err(e) => {
                debug!(
                    error = %e,
                    request = %self.request,
                    "Route resolution failed, continuing without a route"
                );
                None
            }
        }
    }
}

/// Delegates to the host's current-user accessor on every call.
pub struct AmbientUserResolver {
    auth: Arc<dyn PrincipalAccessor>,
}

impl AmbientUserResolver {
    pub fn new(auth: Arc<dyn PrincipalAccessor>) -> Self {
        Self { auth }
    }
}

impl UserResolver for AmbientUserResolver {
    fn user(&self) -> Option<Principal> {
        self.auth.current_user()
    }
}
