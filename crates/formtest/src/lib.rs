//! formtest - fluent assertions for form requests.
//!
//! Exercise one form request's authorization and validation against a
//! simulated request, without a web server:
//!
//! ```rust,ignore
//! use formtest::prelude::*;
//!
//! let harness = Harness::new();
//! harness.acting_as(Principal::new("1").with_role("admin"));
//!
//! harness
//!     .tester()
//!     .form_request::<StoreUserRequest>()
//!     .with_route("/users")
//!     .post([("email", "")])
//!     .assert_authorized()
//!     .assert_validation_failed()
//!     .assert_validation_errors("email");
//! ```
//!
//! This crate wires the pieces together: configuration ([`config`]),
//! logging ([`logging`]) and the [`Harness`]. The tester itself lives in
//! `formtest-core`; the in-memory routing, auth and reporting adapters in
//! `formtest-adapters`.

pub mod config;
pub mod error;
pub mod harness;
pub mod logging;

pub use config::FormTestConfig;
pub use error::{FormTestError, FormTestResult};
pub use harness::Harness;
pub use logging::init_logging;

/// Everything a test file usually needs.
pub mod prelude {
    pub use crate::{FormTestConfig, FormTestError, FormTestResult, Harness};
    pub use formtest_adapters::{
        InMemoryAuth, RecordingReporter, Report, RouteDefinition, RuleFormRequest,
        RuleFormRequestBuilder, StaticRouteTable,
    };
    pub use formtest_core::prelude::*;
}
