//! Closure-driven form request.
//!
//! For tests that need a form request but not a dedicated type: describe the
//! authorization check and the validation step as closures over the request
//! bindings.

use std::sync::Arc;

use tracing::debug;

use formtest_core::{
    application::ports::{
        BoxError, FormRequest, FormRequestError, FormRequestFactory, Redirector, RequestBindings,
        RouteResolver, UserResolver,
    },
    domain::{SimulatedRequest, ValidationErrors},
};

type AuthorizeFn = dyn Fn(&RequestBindings) -> bool + Send + Sync;
type ValidateFn = dyn Fn(&RequestBindings) -> ValidationErrors + Send + Sync;

/// A form request assembled from closures.
pub struct RuleFormRequest {
    name: String,
    bindings: RequestBindings,
    authorize: Arc<AuthorizeFn>,
    validate: Arc<ValidateFn>,
    denial_message: String,
}

impl RuleFormRequest {
    /// Start describing a form request. `name` shows up in diagnostics.
    pub fn builder(name: impl Into<String>) -> RuleFormRequestBuilder {
        RuleFormRequestBuilder::new(name)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn bindings(&self) -> &RequestBindings {
        &self.bindings
    }
}

impl FormRequest for RuleFormRequest {
    fn request(&self) -> &SimulatedRequest {
        self.bindings.request()
    }

    fn set_redirector(&mut self, redirector: Box<dyn Redirector>) {
        self.bindings.set_redirector(redirector);
    }

    fn set_route_resolver(&mut self, resolver: Box<dyn RouteResolver>) {
        self.bindings.set_route_resolver(resolver);
    }

    fn set_user_resolver(&mut self, resolver: Box<dyn UserResolver>) {
        self.bindings.set_user_resolver(resolver);
    }

    fn validate_resolved(&mut self) -> Result<(), FormRequestError> {
        if !(self.authorize)(&self.bindings) {
            debug!(form_request = %self.name, "Authorization denied");
            return Err(FormRequestError::Unauthorized(self.denial_message.clone()));
        }

        let errors = (self.validate)(&self.bindings);
        if errors.is_empty() {
            Ok(())
        } else {
            Err(FormRequestError::Invalid(errors))
        }
    }
}

/// Describes a [`RuleFormRequest`] and acts as its factory.
///
/// Defaults: always authorized, never invalid.
#[derive(Clone)]
pub struct RuleFormRequestBuilder {
    name: String,
    authorize: Arc<AuthorizeFn>,
    validate: Arc<ValidateFn>,
    denial_message: String,
}

impl RuleFormRequestBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            authorize: Arc::new(|_| true),
            validate: Arc::new(|_| ValidationErrors::new()),
            denial_message: "This action is unauthorized.".into(),
        }
    }

    /// The authorization check.
    pub fn authorize<F>(mut self, check: F) -> Self
    where
        F: Fn(&RequestBindings) -> bool + Send + Sync + 'static,
    {
        self.authorize = Arc::new(check);
        self
    }

    /// The validation step. Return an empty set when the input is valid.
    pub fn validate<F>(mut self, rules: F) -> Self
    where
        F: Fn(&RequestBindings) -> ValidationErrors + Send + Sync + 'static,
    {
        self.validate = Arc::new(rules);
        self
    }

    /// Message carried by the authorization failure.
    pub fn deny_with(mut self, message: impl Into<String>) -> Self {
        self.denial_message = message.into();
        self
    }

    /// Instantiate for one request.
    pub fn build(&self, request: SimulatedRequest) -> RuleFormRequest {
        RuleFormRequest {
            name: self.name.clone(),
            bindings: RequestBindings::new(request),
            authorize: Arc::clone(&self.authorize),
            validate: Arc::clone(&self.validate),
            denial_message: self.denial_message.clone(),
        }
    }
}

impl FormRequestFactory for RuleFormRequestBuilder {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn create(&self, request: SimulatedRequest) -> Result<Box<dyn FormRequest>, BoxError> {
        Ok(Box::new(self.build(request)))
    }
}
