//! Application services - the request tester and its supporting types.
//!
//! `RequestTester` is split across two files: `request_tester.rs` holds the
//! scenario setters and the build/evaluate lifecycle, `assertions.rs` holds
//! the assertions that read the memoized outcome.

mod assertions;
pub mod context;
pub mod request_tester;
pub mod scenario;

pub use context::{TestContext, TesterOptions};
pub use request_tester::RequestTester;
pub use scenario::Scenario;
