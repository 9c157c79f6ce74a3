//! Per-suite wiring of routes, auth and reporting.
//!
//! A [`Harness`] holds the host-application stand-ins a suite shares and
//! hands out one fresh [`RequestTester`] per test.

use std::path::Path;
use std::sync::Arc;

use tracing::debug;

use formtest_adapters::{InMemoryAuth, RouteDefinition, StaticRouteTable};
use formtest_core::{
    application::{
        PanicReporter, RequestTester, TestContext, TesterOptions,
        ports::{AssertionReporter, RouteTable},
    },
    domain::Principal,
};

use crate::{config::FormTestConfig, error::FormTestResult, logging};

/// Shared test surroundings.
///
/// Cloning is cheap and clones share routes and the current user.
#[derive(Clone)]
pub struct Harness {
    routes: StaticRouteTable,
    route_table: Arc<dyn RouteTable>,
    auth: InMemoryAuth,
    reporter: Arc<dyn AssertionReporter>,
    options: TesterOptions,
}

impl Default for Harness {
    fn default() -> Self {
        let routes = StaticRouteTable::new();
        Self {
            route_table: Arc::new(routes.clone()),
            routes,
            auth: InMemoryAuth::guest(),
            reporter: Arc::new(PanicReporter),
            options: TesterOptions::default(),
        }
    }
}

impl Harness {
    /// Empty route table, guest user, panicking reporter, default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load [`FormTestConfig`], install logging and build a harness from it.
    pub fn from_env(config_file: Option<&Path>) -> FormTestResult<Self> {
        let config = FormTestConfig::load(config_file)?;
        Self::from_config(&config)
    }

    pub fn from_config(config: &FormTestConfig) -> FormTestResult<Self> {
        if let Err(e) = logging::init_logging(config) {
            // Another subscriber already owns the process; events still flow there.
            debug!(error = %e, "Skipping logging setup");
        }

        Ok(Self::new().with_options(config.tester_options()?))
    }

    pub fn with_options(mut self, options: TesterOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_reporter(mut self, reporter: Arc<dyn AssertionReporter>) -> Self {
        self.reporter = reporter;
        self
    }

    /// Replace the in-memory route table with another implementation.
    ///
    /// Routes registered through [`route`](Self::route) are ignored afterwards.
    pub fn with_route_table(mut self, table: Arc<dyn RouteTable>) -> Self {
        self.route_table = table;
        self
    }

    /// Register a route on the in-memory table.
    pub fn route(self, definition: RouteDefinition) -> FormTestResult<Self> {
        self.routes.add(definition)?;
        Ok(self)
    }

    /// Register routes from a JSON array of definitions.
    pub fn routes_from_json(self, json: &str) -> FormTestResult<Self> {
        for definition in StaticRouteTable::from_json(json)?.definitions() {
            self.routes.add(definition)?;
        }
        Ok(self)
    }

    /// Log `principal` in for every tester handed out from now on.
    pub fn acting_as(&self, principal: Principal) -> &Self {
        self.auth.acting_as(principal);
        self
    }

    pub fn logout(&self) -> &Self {
        self.auth.logout();
        self
    }

    pub fn auth(&self) -> &InMemoryAuth {
        &self.auth
    }

    pub fn routes(&self) -> &StaticRouteTable {
        &self.routes
    }

    pub fn options(&self) -> &TesterOptions {
        &self.options
    }

    /// A context sharing this harness's collaborators.
    pub fn context(&self) -> TestContext {
        TestContext::new(Arc::clone(&self.route_table), Arc::new(self.auth.clone()))
            .with_reporter(Arc::clone(&self.reporter))
            .with_options(self.options.clone())
    }

    /// A fresh tester for one test.
    pub fn tester(&self) -> RequestTester {
        RequestTester::new(self.context())
    }
}

impl std::fmt::Debug for Harness {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Harness")
            .field("routes", &self.routes.len())
            .field("auth", &self.auth)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}
