//! formtest Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for formtest: a
//! fluent helper that evaluates one form request (authorization + input
//! validation bound to a route) against a simulated request and asserts on
//! the outcome, without running an HTTP server.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │        formtest (test harness)          │
//! │   (Config, logging, Harness builder)    │
//! └──────────────────┬──────────────────────┘
//!                    │ creates
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │      (RequestTester, TestContext)       │
//! │   Build once, evaluate once, assert     │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │ (FormRequest, RouteTable, Principal...) │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │   formtest-adapters / your form request │
//! │ (StaticRouteTable, InMemoryAuth, etc)   │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Values)      │
//! │ (SimulatedRequest, ValidationOutcome)   │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use formtest_core::prelude::*;
//!
//! let context = TestContext::new(routes, auth);
//!
//! RequestTester::new(context)
//!     .form_request::<StoreUserRequest>()
//!     .with_route("/users")
//!     .post([("email", "")])
//!     .assert_validation_failed()
//!     .assert_validation_errors("email")
//!     .assert_validation_messages(["The email field is required."]);
//! ```

// Domain layer (stable, well-defined API)
pub mod domain;

// Application layer (orchestration logic)
pub mod application;

// Error types
pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        PanicReporter, RequestTester, Scenario, TestContext, TesterOptions,
        ports::{
            AssertionReporter, BoxError, FormRequest, FormRequestError, FormRequestFactory,
            FormRequestType, PrincipalAccessor, Redirector, RequestBindings, RouteError,
            RouteResolver, RouteTable, UrlGenerator, UserResolver,
        },
    };
    pub use crate::domain::{
        HttpMethod, MatchedRoute, OneOrMany, Payload, Principal, Redirect, SimulatedRequest,
        ValidationErrors, ValidationOutcome,
    };
    pub use crate::error::{TesterError, TesterResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
