//! Request Tester - the scenario builder and evaluation driver.
//!
//! The tester owns one scenario and, lazily, one form request built from it:
//! 1. Configure the scenario through the fluent setters
//! 2. On first assertion, build the form request and inject the stand-ins
//! 3. Run authorization + validation once and memoize the outcome
//!
//! Assertions live in `assertions.rs`; they all go through
//! [`RequestTester::ensure_evaluated`].

use std::sync::Arc;

use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::{
    application::{
        ApplicationError,
        ports::{FormRequest, FormRequestError, FormRequestFactory, FormRequestType, TypedFactory},
        services::{context::TestContext, scenario::Scenario},
        stand_ins::{AmbientUserResolver, BestEffortRouteResolver, NullRedirector},
    },
    domain::{HttpMethod, Payload, ValidationOutcome},
    error::{TesterError, TesterResult},
};

/// Where a tester is in its one-way lifecycle.
enum EvaluationState {
    NotBuilt,
    Built(Box<dyn FormRequest>),
    Evaluated {
        form_request: Box<dyn FormRequest>,
        outcome: ValidationOutcome,
    },
}

/// Fluent tester for a single form request scenario.
///
/// Use one tester per test. Configure it completely before the first
/// assertion: setters called after evaluation do not invalidate the cached
/// outcome.
pub struct RequestTester {
    id: Uuid,
    context: TestContext,
    scenario: Scenario,
    state: EvaluationState,
}

impl RequestTester {
    /// Create a tester bound to a host context.
    pub fn new(context: TestContext) -> Self {
        Self {
            id: Uuid::new_v4(),
            context,
            scenario: Scenario::new(),
            state: EvaluationState::NotBuilt,
        }
    }

    // -------------------------------------------------------------------------
    // Scenario setters
    // -------------------------------------------------------------------------

    /// Set the form request type to instantiate.
    pub fn form_request<T: FormRequestType>(self) -> Self {
        self.form_request_factory(TypedFactory::<T>::new())
    }

    /// Set the form request through an explicit factory.
    pub fn form_request_factory(mut self, factory: impl FormRequestFactory + 'static) -> Self {
        self.scenario.form_request = Some(Arc::new(factory));
        self
    }

    /// Set the URI the simulated request targets.
    pub fn with_route(mut self, route: impl Into<String>) -> Self {
        self.scenario.route = Some(route.into());
        self
    }

    /// Set method and payload together.
    pub fn method(mut self, method: HttpMethod, data: impl Into<Payload>) -> Self {
        self.scenario.method = Some(method);
        self.scenario.payload = data.into();
        self
    }

    /// Set method and payload from loosely typed input, e.g. a JSON fixture.
    ///
    /// Fails on an unknown method name or a payload that is not an object.
    pub fn try_method(self, method: &str, data: serde_json::Value) -> TesterResult<Self> {
        let method: HttpMethod = method.parse()?;
        let payload = Payload::from_json(data)?;
        Ok(self.method(method, payload))
    }

    /// GET with an empty payload.
    pub fn get(self) -> Self {
        self.method(HttpMethod::Get, Payload::new())
    }

    pub fn post(self, data: impl Into<Payload>) -> Self {
        self.method(HttpMethod::Post, data)
    }

    pub fn put(self, data: impl Into<Payload>) -> Self {
        self.method(HttpMethod::Put, data)
    }

    pub fn patch(self, data: impl Into<Payload>) -> Self {
        self.method(HttpMethod::Patch, data)
    }

    pub fn delete(self, data: impl Into<Payload>) -> Self {
        self.method(HttpMethod::Delete, data)
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    /// Identifier recorded on every span this tester emits.
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn scenario(&self) -> &Scenario {
        &self.scenario
    }

    pub fn context(&self) -> &TestContext {
        &self.context
    }

    /// The form request instance, once built.
    pub fn current_form_request(&self) -> Option<&dyn FormRequest> {
        match &self.state {
            EvaluationState::NotBuilt => None,
            EvaluationState::Built(form_request)
            | EvaluationState::Evaluated { form_request, .. } => Some(form_request.as_ref()),
        }
    }

    /// The memoized outcome, once evaluated.
    pub fn outcome(&self) -> Option<&ValidationOutcome> {
        match &self.state {
            EvaluationState::Evaluated { outcome, .. } => Some(outcome),
            _ => None,
        }
    }

    pub fn is_built(&self) -> bool {
        !matches!(self.state, EvaluationState::NotBuilt)
    }

    pub fn is_evaluated(&self) -> bool {
        matches!(self.state, EvaluationState::Evaluated { .. })
    }

    // -------------------------------------------------------------------------
    // Construction and evaluation
    // -------------------------------------------------------------------------

    /// Build and evaluate if that has not happened yet, then return the
    /// memoized outcome.
    pub fn ensure_evaluated(&mut self) -> TesterResult<&ValidationOutcome> {
        if matches!(self.state, EvaluationState::NotBuilt) {
            self.build()?;
        }

        if matches!(self.state, EvaluationState::Built(_)) {
            self.evaluate()?;
        }

        match &self.state {
            EvaluationState::Evaluated { outcome, .. } => Ok(outcome),
            _ => Err(TesterError::Internal {
                message: format!("scenario {} left unevaluated", self.id),
            }),
        }
    }

    /// Instantiate the form request and inject the stand-ins.
    ///
    /// Does nothing if an instance already exists.
    #[instrument(skip_all, fields(scenario = %self.id, request = %self.scenario))]
    pub fn build(&mut self) -> TesterResult<()> {
        if self.is_built() {
            return Ok(());
        }

        let factory = self
            .scenario
            .form_request
            .clone()
            .ok_or(ApplicationError::MissingFormRequest)?;

        let request = self.scenario.to_request(&self.context.options);
        debug!(request = %request, "Constructing form request");

        let mut form_request = factory.create(request.clone()).map_err(|e| {
            ApplicationError::ConstructionFailed {
                form_request: factory.name(),
                reason: e.to_string(),
            }
        })?;

        form_request.set_redirector(Box::new(NullRedirector::new()));
        form_request.set_route_resolver(Box::new(BestEffortRouteResolver::new(
            Arc::clone(&self.context.routes),
            request,
        )));
        form_request.set_user_resolver(Box::new(AmbientUserResolver::new(Arc::clone(
            &self.context.auth,
        ))));

        self.state = EvaluationState::Built(form_request);
        Ok(())
    }

    /// Run authorization + validation on the built instance, once.
    ///
    /// Unauthorized and invalid results become the outcome. Any other error
    /// leaves the tester built-but-unevaluated and is returned.
    #[instrument(skip_all, fields(scenario = %self.id, request = %self.scenario))]
    fn evaluate(&mut self) -> TesterResult<()> {
        let mut form_request = match std::mem::replace(&mut self.state, EvaluationState::NotBuilt)
        {
            EvaluationState::Built(form_request) => form_request,
            other => {
                self.state = other;
                return Ok(());
            }
        };

        let outcome = match form_request.validate_resolved() {
            Ok(()) => ValidationOutcome::passed(),
            Err(FormRequestError::Unauthorized(reason)) => {
                debug!(%reason, "Form request denied authorization");
                ValidationOutcome::unauthorized()
            }
            Err(FormRequestError::Invalid(errors)) => ValidationOutcome::invalid(errors),
            Err(FormRequestError::Failed(e)) => {
                let reason = e.to_string();
                self.state = EvaluationState::Built(form_request);
                return Err(ApplicationError::EvaluationFailed {
                    form_request: self.scenario.form_request_name().unwrap_or_default(),
                    reason,
                }
                .into());
            }
        };

        info!(outcome = %outcome, "Form request evaluated");
        self.state = EvaluationState::Evaluated {
            form_request,
            outcome,
        };
        Ok(())
    }
}

impl std::fmt::Debug for RequestTester {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestTester")
            .field("id", &self.id)
            .field("scenario", &self.scenario)
            .field("built", &self.is_built())
            .field("outcome", &self.outcome())
            .finish()
    }
}
