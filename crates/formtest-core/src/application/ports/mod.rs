//! Application ports (traits) for external collaborators.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by the tester, implemented elsewhere
//!   - `FormRequest` / `FormRequestFactory`: the object under test
//!   - `RouteTable`, `PrincipalAccessor`: the host application
//!   - `Redirector`, `RouteResolver`, `UserResolver`: capabilities injected
//!     into every form request
//!   - `AssertionReporter`: the test framework
//!
//! - **Helpers**
//!   - `RequestBindings`: storage for the injected capabilities, for form
//!     request implementations to embed

pub mod bindings;
pub mod output;

pub use bindings::RequestBindings;
pub use output::{
    AssertionReporter, BoxError, FormRequest, FormRequestError, FormRequestFactory,
    FormRequestType, PrincipalAccessor, Redirector, RouteError, RouteResolver, RouteTable,
    TypedFactory, UrlGenerator, UserResolver,
};

#[cfg(test)]
pub use output::{MockFormRequest, MockFormRequestFactory};
