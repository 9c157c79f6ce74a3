//! Driven (output) ports - implemented outside the core.
//!
//! These traits define what the tester needs from the host framework and the
//! test runner. The `formtest-adapters` crate provides in-memory
//! implementations; the stand-ins in `crate::application::stand_ins`
//! implement the capabilities injected into every form request.

use thiserror::Error;

use crate::domain::{
    HttpMethod, MatchedRoute, Principal, Redirect, SimulatedRequest, ValidationErrors,
};

/// Boxed error for collaborator failures the core does not interpret.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

// ── Form request ─────────────────────────────────────────────────────────────

/// What `FormRequest::validate_resolved` can report.
#[derive(Debug, Error)]
pub enum FormRequestError {
    /// The authorization check denied the request.
    #[error("{0}")]
    Unauthorized(String),

    /// Authorization passed but one or more fields failed validation.
    #[error("The given data was invalid.")]
    Invalid(ValidationErrors),

    /// Anything else. Not an assertable outcome.
    #[error(transparent)]
    Failed(BoxError),
}

impl FormRequestError {
    /// Authorization failure with the conventional message.
    pub fn unauthorized() -> Self {
        Self::Unauthorized("This action is unauthorized.".into())
    }

    pub fn failed(error: impl Into<BoxError>) -> Self {
        Self::Failed(error.into())
    }
}

impl From<ValidationErrors> for FormRequestError {
    fn from(errors: ValidationErrors) -> Self {
        Self::Invalid(errors)
    }
}

/// A bound unit of authorization + validation for one route.
///
/// Implemented by:
/// - application form requests (usually embedding `RequestBindings`)
/// - `formtest_adapters::RuleFormRequest` (closure-driven)
#[cfg_attr(test, mockall::automock)]
pub trait FormRequest {
    /// The simulated request this instance was built from.
    fn request(&self) -> &SimulatedRequest;

    fn set_redirector(&mut self, redirector: Box<dyn Redirector>);

    fn set_route_resolver(&mut self, resolver: Box<dyn RouteResolver>);

    fn set_user_resolver(&mut self, resolver: Box<dyn UserResolver>);

    /// Authorize, then validate. Called at most once per instance by the
    /// tester.
    fn validate_resolved(&mut self) -> Result<(), FormRequestError>;
}

/// A form request type that knows how to build itself from a request.
pub trait FormRequestType: FormRequest + Sized + 'static {
    fn create(request: SimulatedRequest) -> Result<Self, BoxError>;
}

/// Object-safe construction contract held by a scenario.
///
/// Implemented by:
/// - `TypedFactory<T>` for any `T: FormRequestType`
/// - any `Fn(SimulatedRequest) -> Result<Box<dyn FormRequest>, BoxError>`
#[cfg_attr(test, mockall::automock)]
pub trait FormRequestFactory: Send + Sync {
    /// Name used in diagnostics and spans.
    fn name(&self) -> String;

    fn create(&self, request: SimulatedRequest) -> Result<Box<dyn FormRequest>, BoxError>;
}

/// Factory for a concrete [`FormRequestType`].
pub struct TypedFactory<T>(std::marker::PhantomData<fn() -> T>);

impl<T: FormRequestType> TypedFactory<T> {
    pub fn new() -> Self {
        Self(std::marker::PhantomData)
    }
}

impl<T: FormRequestType> Default for TypedFactory<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: FormRequestType> FormRequestFactory for TypedFactory<T> {
    fn name(&self) -> String {
        short_type_name(std::any::type_name::<T>())
    }

    fn create(&self, request: SimulatedRequest) -> Result<Box<dyn FormRequest>, BoxError> {
        Ok(Box::new(T::create(request)?))
    }
}

impl<F> FormRequestFactory for F
where
    F: Fn(SimulatedRequest) -> Result<Box<dyn FormRequest>, BoxError> + Send + Sync,
{
    fn name(&self) -> String {
        "closure".to_string()
    }

    fn create(&self, request: SimulatedRequest) -> Result<Box<dyn FormRequest>, BoxError> {
        self(request)
    }
}

fn short_type_name(full: &str) -> String {
    full.rsplit("::").next().unwrap_or(full).to_string()
}

// ── Capabilities injected into a form request ───────────────────────────────

/// URL generation as seen by a form request.
pub trait UrlGenerator {
    fn to(&self, path: &str, parameters: &[(&str, &str)]) -> Option<String>;

    fn route(&self, name: &str, parameters: &[(&str, &str)]) -> Option<String>;

    fn action(&self, action: &str, parameters: &[(&str, &str)]) -> Option<String>;

    fn previous(&self, fallback: Option<&str>) -> Option<String>;
}

/// Redirect helpers as seen by a form request.
pub trait Redirector {
    fn to(&self, path: &str, status: u16) -> Option<Redirect>;

    fn route(&self, name: &str, parameters: &[(&str, &str)]) -> Option<Redirect>;

    fn action(&self, action: &str, parameters: &[(&str, &str)]) -> Option<Redirect>;

    fn previous(&self, status: u16) -> Option<Redirect>;

    fn url_generator(&self) -> &dyn UrlGenerator;
}

/// Resolves the route the form request is bound to.
pub trait RouteResolver {
    fn resolve(&self) -> Option<MatchedRoute>;
}

/// Resolves the acting user.
pub trait UserResolver {
    fn user(&self) -> Option<Principal>;
}

// ── Host application ─────────────────────────────────────────────────────────

/// Why a route table could not match a request.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RouteError {
    #[error("No route matches {method} {uri}")]
    NotFound { method: HttpMethod, uri: String },

    #[error("{method} is not allowed for {uri}")]
    MethodNotAllowed {
        method: HttpMethod,
        uri: String,
        allowed: Vec<HttpMethod>,
    },

    #[error("Route table unavailable: {0}")]
    Unavailable(String),
}

/// Port for the application's route table.
///
/// Implemented by:
/// - `formtest_adapters::StaticRouteTable` (testing)
pub trait RouteTable: Send + Sync {
    fn match_request(&self, request: &SimulatedRequest) -> Result<MatchedRoute, RouteError>;
}

/// Port for the authentication layer's "current user" accessor.
///
/// Implemented by:
/// - `formtest_adapters::InMemoryAuth` (testing)
pub trait PrincipalAccessor: Send + Sync {
    fn current_user(&self) -> Option<Principal>;
}

// ── Test runner ──────────────────────────────────────────────────────────────

/// Port for the enclosing test framework's assertion primitives.
///
/// Implemented by:
/// - `crate::application::PanicReporter` (default: panics like `assert!`)
/// - `formtest_adapters::RecordingReporter` (collects results)
pub trait AssertionReporter: Send + Sync {
    fn assert_true(&self, condition: bool, message: &str);

    fn fail(&self, message: &str);

    fn assert_false(&self, condition: bool, message: &str) {
        self.assert_true(!condition, message);
    }

    fn assert_contains(&self, needle: &str, haystack: &[String], message: &str) {
        self.assert_true(haystack.iter().any(|item| item == needle), message);
    }

    fn succeed(&self, message: &str) {
        self.assert_true(true, message);
    }
}
