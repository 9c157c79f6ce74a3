//! Fluent assertions over the memoized outcome.
//!
//! Every assertion evaluates the scenario on first use, then reports through
//! the context's `AssertionReporter`. A broken scenario (no form request,
//! construction failure, unexpected error) is not an assertable outcome and
//! panics with a diagnostic instead.

use std::sync::Arc;

use tracing::debug;

use crate::{
    application::{ports::AssertionReporter, services::request_tester::RequestTester},
    domain::{OneOrMany, ValidationOutcome},
};

const NOT_AUTHORIZED: &str = "Form request is not authorized";

impl RequestTester {
    /// Assert authorization passed and no field failed validation.
    pub fn assert_validation_passed(&mut self) -> &mut Self {
        let outcome = self.settled();
        let reporter = self.reporter();

        if !outcome.is_authorized() {
            reporter.fail(NOT_AUTHORIZED);
            return self;
        }

        if !outcome.errors().is_empty() {
            let message = if self.context().options().verbose_failures {
                format!("Validation failed: {}", outcome.errors())
            } else {
                "Validation failed".to_string()
            };
            reporter.fail(&message);
            return self;
        }

        self.succeed("Validation passed successfully");
        self
    }

    /// Assert authorization passed and at least one field failed validation.
    pub fn assert_validation_failed(&mut self) -> &mut Self {
        let outcome = self.settled();
        let reporter = self.reporter();

        if !outcome.is_authorized() {
            reporter.fail(NOT_AUTHORIZED);
            return self;
        }

        if outcome.errors().is_empty() {
            reporter.fail("Validation passed, expected it to fail");
            return self;
        }

        self.succeed("Validation failed as expected");
        self
    }

    /// Assert every given field has at least one validation error.
    pub fn assert_validation_errors(&mut self, keys: impl OneOrMany) -> &mut Self {
        let outcome = self.settled();
        let reporter = self.reporter();

        if !outcome.is_authorized() {
            reporter.fail(NOT_AUTHORIZED);
            return self;
        }

        for key in keys.into_strings() {
            reporter.assert_true(
                outcome.errors().has(&key),
                &format!("Failed to find a validation error for key: '{key}'"),
            );
        }

        self
    }

    /// Assert none of the given fields has a validation error.
    pub fn assert_validation_errors_missing(&mut self, keys: impl OneOrMany) -> &mut Self {
        let outcome = self.settled();
        let reporter = self.reporter();

        if !outcome.is_authorized() {
            reporter.fail(NOT_AUTHORIZED);
            return self;
        }

        for key in keys.into_strings() {
            reporter.assert_false(
                outcome.errors().has(&key),
                &format!("Validation error for key: '{key}' was found in the errors"),
            );
        }

        self
    }

    /// Assert every given message appears among the recorded errors, on any
    /// field.
    ///
    /// Unlike the other validation assertions this does not report "not
    /// authorized" first: an unauthorized outcome has no messages, so each
    /// expected message is reported missing instead.
    pub fn assert_validation_messages(&mut self, messages: impl OneOrMany) -> &mut Self {
        let outcome = self.settled();
        let reporter = self.reporter();
        let recorded = outcome.errors().messages();

        for message in messages.into_strings() {
            reporter.assert_contains(
                &message,
                &recorded,
                &format!("Failed to find the validation message '{message}' in the validation messages"),
            );
        }

        self
    }

    pub fn assert_authorized(&mut self) -> &mut Self {
        let outcome = self.settled();
        self.reporter()
            .assert_true(outcome.is_authorized(), "Form request was not authorized");
        self
    }

    pub fn assert_not_authorized(&mut self) -> &mut Self {
        let outcome = self.settled();
        self.reporter()
            .assert_false(outcome.is_authorized(), "Form request was authorized");
        self
    }

    /// Report an unconditional success.
    pub fn succeed(&self, message: &str) {
        debug!(scenario = %self.id(), assertion = message, "assertion succeeded");
        self.reporter().succeed(message);
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    fn reporter(&self) -> Arc<dyn AssertionReporter> {
        Arc::clone(self.context().reporter())
    }

    /// The memoized outcome, evaluating first if needed.
    fn settled(&mut self) -> ValidationOutcome {
        match self.ensure_evaluated() {
            Ok(outcome) => outcome.clone(),
            Err(e) => panic!("form request scenario could not be evaluated: {}", e.diagnostic()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::{
        ports::{
            BoxError, FormRequest, FormRequestError, PrincipalAccessor, Redirector,
            RouteError, RouteResolver, RouteTable, UserResolver,
        },
        services::context::TestContext,
    };
    use crate::domain::{MatchedRoute, Principal, SimulatedRequest, ValidationErrors};
    use std::sync::Mutex;

    // ── Collaborators ──────────────────────────────────────────────────────

    #[derive(Default)]
    struct Recorder {
        results: Mutex<Vec<(bool, String)>>,
    }

    impl Recorder {
        fn failures(&self) -> Vec<String> {
            self.results
                .lock()
                .unwrap()
                .iter()
                .filter(|(passed, _)| !passed)
                .map(|(_, message)| message.clone())
                .collect()
        }

        fn passes(&self) -> usize {
            self.results.lock().unwrap().iter().filter(|(p, _)| *p).count()
        }
    }

    impl AssertionReporter for Recorder {
        fn assert_true(&self, condition: bool, message: &str) {
            self.results
                .lock()
                .unwrap()
                .push((condition, message.to_string()));
        }

        fn fail(&self, message: &str) {
            self.assert_true(false, message);
        }
    }

    struct NoRoutes;

    impl RouteTable for NoRoutes {
        fn match_request(&self, request: &SimulatedRequest) -> Result<MatchedRoute, RouteError> {
            Err(RouteError::NotFound {
                method: request.method(),
                uri: request.uri().to_string(),
            })
        }
    }

    struct Guest;

    impl PrincipalAccessor for Guest {
        fn current_user(&self) -> Option<Principal> {
            None
        }
    }

    // ── Scripted form request ──────────────────────────────────────────────

    #[derive(Clone)]
    enum Script {
        Pass,
        Deny,
        Invalid(ValidationErrors),
    }

    struct Scripted {
        request: SimulatedRequest,
        script: Script,
    }

    impl FormRequest for Scripted {
        fn request(&self) -> &SimulatedRequest {
            &self.request
        }

        fn set_redirector(&mut self, _redirector: Box<dyn Redirector>) {}

        fn set_route_resolver(&mut self, _resolver: Box<dyn RouteResolver>) {}

        fn set_user_resolver(&mut self, _resolver: Box<dyn UserResolver>) {}

        fn validate_resolved(&mut self) -> Result<(), FormRequestError> {
            match &self.script {
                Script::Pass => Ok(()),
                Script::Deny => Err(FormRequestError::unauthorized()),
                Script::Invalid(errors) => Err(FormRequestError::Invalid(errors.clone())),
            }
        }
    }

    fn tester(script: Script) -> (RequestTester, Arc<Recorder>) {
        let recorder = Arc::new(Recorder::default());
        let context = TestContext::new(Arc::new(NoRoutes), Arc::new(Guest))
            .with_reporter(recorder.clone());

        let factory = move |request: SimulatedRequest| -> Result<Box<dyn FormRequest>, BoxError> {
            Ok(Box::new(Scripted {
                request,
                script: script.clone(),
            }))
        };

        let tester = RequestTester::new(context)
            .form_request_factory(factory)
            .post(crate::domain::Payload::new());
        (tester, recorder)
    }

    fn email_required() -> Script {
        Script::Invalid(ValidationErrors::new().with("email", "Email is required"))
    }

    // ── Unauthorized ───────────────────────────────────────────────────────

    #[test]
    fn unauthorized_fails_every_validation_assertion() {
        let (mut tester, recorder) = tester(Script::Deny);

        tester
            .assert_validation_passed()
            .assert_validation_failed()
            .assert_validation_errors("email")
            .assert_validation_errors_missing("email");

        assert_eq!(recorder.failures(), vec![NOT_AUTHORIZED; 4]);
    }

    #[test]
    fn unauthorized_authorization_assertions() {
        let (mut tester, recorder) = tester(Script::Deny);

        tester.assert_not_authorized();
        assert!(recorder.failures().is_empty());

        tester.assert_authorized();
        assert_eq!(recorder.failures(), vec!["Form request was not authorized"]);
    }

    #[test]
    fn unauthorized_messages_report_missing_message() {
        let (mut tester, recorder) = tester(Script::Deny);

        tester.assert_validation_messages(["Email is required"]);

        assert_eq!(
            recorder.failures(),
            vec!["Failed to find the validation message 'Email is required' in the validation messages"]
        );
    }

    // ── Passing ────────────────────────────────────────────────────────────

    #[test]
    fn passing_scenario() {
        let (mut tester, recorder) = tester(Script::Pass);

        tester.assert_validation_passed().assert_authorized();
        assert!(recorder.failures().is_empty());
        assert_eq!(recorder.passes(), 2);

        tester.assert_validation_failed();
        tester.assert_validation_errors(["name"]);
        assert_eq!(
            recorder.failures(),
            vec![
                "Validation passed, expected it to fail",
                "Failed to find a validation error for key: 'name'",
            ]
        );
    }

    // ── Failing ────────────────────────────────────────────────────────────

    #[test]
    fn failing_scenario_matches_expected_fields_and_messages() {
        let (mut tester, recorder) = tester(email_required());

        tester
            .assert_validation_failed()
            .assert_validation_errors("email")
            .assert_validation_errors_missing("name")
            .assert_validation_messages(["Email is required"]);

        assert!(recorder.failures().is_empty());
    }

    #[test]
    fn failing_scenario_rejects_wrong_expectations() {
        let (mut tester, recorder) = tester(email_required());

        tester
            .assert_validation_errors_missing("email")
            .assert_validation_errors("name")
            .assert_validation_passed();

        assert_eq!(
            recorder.failures(),
            vec![
                "Validation error for key: 'email' was found in the errors",
                "Failed to find a validation error for key: 'name'",
                r#"Validation failed: {"email":["Email is required"]}"#,
            ]
        );
    }

    #[test]
    fn quiet_failures_omit_error_dump() {
        let (tester, recorder) = tester(email_required());
        let context = tester
            .context()
            .clone()
            .with_options(crate::application::services::context::TesterOptions {
                verbose_failures: false,
                ..Default::default()
            });
        let factory = tester.scenario().form_request().cloned().unwrap();

        let mut quiet = RequestTester::new(context)
            .form_request_factory(move |request: SimulatedRequest| factory.create(request))
            .post(crate::domain::Payload::new());
        quiet.assert_validation_passed();

        assert_eq!(recorder.failures(), vec!["Validation failed"]);
    }

    #[test]
    fn keys_are_checked_independently_of_order() {
        let script = Script::Invalid(
            ValidationErrors::new()
                .with("email", "Email is required")
                .with("name", "Name is required"),
        );

        let (mut forward, forward_recorder) = tester(script.clone());
        forward.assert_validation_errors(["email", "title", "name"]);

        let (mut backward, backward_recorder) = tester(script);
        backward.assert_validation_errors(vec!["name", "title", "email"]);

        assert_eq!(forward_recorder.failures(), backward_recorder.failures());
        assert_eq!(forward_recorder.failures().len(), 1);
    }

    #[test]
    #[should_panic(expected = "No form request type set")]
    fn assertions_panic_on_broken_setup() {
        let context = TestContext::new(Arc::new(NoRoutes), Arc::new(Guest));
        RequestTester::new(context).get().assert_validation_passed();
    }
}
