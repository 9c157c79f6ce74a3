//! The host application a tester runs against.

use std::sync::Arc;

use crate::application::PanicReporter;
use crate::application::ports::{AssertionReporter, PrincipalAccessor, RouteTable};
use crate::domain::HttpMethod;

/// Knobs for tester behaviour.
///
/// The core never reads configuration files; the `formtest` crate loads
/// these and passes them in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TesterOptions {
    /// URI used when a scenario sets no route.
    pub default_route: String,
    /// Method used when a scenario sets no method.
    pub default_method: HttpMethod,
    /// Include the JSON-encoded errors in "Validation failed" messages.
    pub verbose_failures: bool,
}

impl Default for TesterOptions {
    fn default() -> Self {
        Self {
            default_route: "/".into(),
            default_method: HttpMethod::Get,
            verbose_failures: true,
        }
    }
}

/// Explicit dependencies a tester needs from its surroundings.
///
/// Cheap to clone; every collaborator is behind an `Arc`.
#[derive(Clone)]
pub struct TestContext {
    pub(crate) routes: Arc<dyn RouteTable>,
    pub(crate) auth: Arc<dyn PrincipalAccessor>,
    pub(crate) reporter: Arc<dyn AssertionReporter>,
    pub(crate) options: TesterOptions,
}

impl TestContext {
    /// Context with the panicking reporter and default options.
    pub fn new(routes: Arc<dyn RouteTable>, auth: Arc<dyn PrincipalAccessor>) -> Self {
        Self {
            routes,
            auth,
            reporter: Arc::new(PanicReporter),
            options: TesterOptions::default(),
        }
    }

    pub fn with_reporter(mut self, reporter: Arc<dyn AssertionReporter>) -> Self {
        self.reporter = reporter;
        self
    }

    pub fn with_options(mut self, options: TesterOptions) -> Self {
        self.options = options;
        self
    }

    pub fn routes(&self) -> &Arc<dyn RouteTable> {
        &self.routes
    }

    pub fn auth(&self) -> &Arc<dyn PrincipalAccessor> {
        &self.auth
    }

    pub fn reporter(&self) -> &Arc<dyn AssertionReporter> {
        &self.reporter
    }

    pub fn options(&self) -> &TesterOptions {
        &self.options
    }
}

impl std::fmt::Debug for TestContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TestContext")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}
