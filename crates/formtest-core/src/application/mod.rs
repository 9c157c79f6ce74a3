//! Application layer for formtest.
//!
//! This layer contains:
//! - **Services**: the `RequestTester` and the context it runs in
//! - **Ports**: Interface definitions (traits) for external collaborators
//! - **Stand-ins**: the capabilities injected into every form request
//! - **Errors**: Application-specific error types
//!
//! The application layer drives the form request under test but implements
//! none of its rules. Authorization and validation live behind the
//! `FormRequest` port.

pub mod error;
pub mod ports;
pub mod reporting;
pub mod services;
pub mod stand_ins;

// Re-export main services
pub use services::{RequestTester, Scenario, TestContext, TesterOptions};

// Re-export port traits (for adapter implementation)
pub use ports::{
    AssertionReporter, FormRequest, FormRequestError, FormRequestFactory, FormRequestType,
    PrincipalAccessor, RequestBindings, RouteTable,
};

pub use error::ApplicationError;
pub use reporting::PanicReporter;
