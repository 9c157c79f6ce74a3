//! Public API tests for formtest-core with hand-written collaborators.

use std::sync::{Arc, Mutex};

use formtest_core::prelude::*;

struct OneRoute;

impl RouteTable for OneRoute {
    fn match_request(&self, request: &SimulatedRequest) -> Result<MatchedRoute, RouteError> {
        match request.path().strip_prefix("/teams/") {
            Some(team) if request.method() == HttpMethod::Post => {
                Ok(MatchedRoute::new("/teams/{team}").with_parameter("team", team))
            }
            _ => Err(RouteError::NotFound {
                method: request.method(),
                uri: request.uri().to_string(),
            }),
        }
    }
}

struct Member(Option<Principal>);

impl PrincipalAccessor for Member {
    fn current_user(&self) -> Option<Principal> {
        self.0.clone()
    }
}

#[derive(Default)]
struct Log(Mutex<Vec<(bool, String)>>);

impl AssertionReporter for Log {
    fn assert_true(&self, condition: bool, message: &str) {
        self.0
            .lock()
            .unwrap()
            .push((condition, message.to_string()));
    }

    fn fail(&self, message: &str) {
        self.assert_true(false, message);
    }
}

/// Members of the team in the route may invite; `email` is required.
struct InviteRequest {
    bindings: RequestBindings,
}

impl FormRequest for InviteRequest {
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
        let team = self.bindings.route_parameter("team");
        let user = self.bindings.user();

        match (team, user) {
            (Some(team), Some(user)) if user.has_role(&team) => {}
            _ => return Err(FormRequestError::unauthorized()),
        }

        if self.bindings.request().filled("email") {
            Ok(())
        } else {
            Err(ValidationErrors::new()
                .with("email", "The email field is required.")
                .into())
        }
    }
}

impl FormRequestType for InviteRequest {
    fn create(request: SimulatedRequest) -> Result<Self, BoxError> {
        Ok(Self {
            bindings: RequestBindings::new(request),
        })
    }
}

fn context(user: Option<Principal>) -> TestContext {
    TestContext::new(Arc::new(OneRoute), Arc::new(Member(user)))
}

#[test]
fn team_member_with_email_passes() {
    let user = Principal::new("4").with_role("rust");

    RequestTester::new(context(Some(user)))
        .form_request::<InviteRequest>()
        .with_route("/teams/rust")
        .post([("email", "new@example.com")])
        .assert_authorized()
        .assert_validation_passed();
}

#[test]
fn outsider_is_denied_and_validation_assertions_say_so() {
    let log = Arc::new(Log::default());
    let user = Principal::new("4").with_role("go");

    let mut tester = RequestTester::new(context(Some(user)).with_reporter(log.clone()))
        .form_request::<InviteRequest>()
        .with_route("/teams/rust")
        .post([("email", "")]);

    tester.assert_not_authorized().assert_validation_errors("email");

    let entries = log.0.lock().unwrap().clone();
    assert_eq!(
        entries,
        vec![
            (true, "Form request was authorized".to_string()),
            (false, "Form request is not authorized".to_string()),
        ]
    );
    assert_eq!(tester.outcome(), Some(&ValidationOutcome::unauthorized()));
}

#[test]
fn missing_email_is_an_error_on_that_key() {
    let user = Principal::new("4").with_role("rust");

    RequestTester::new(context(Some(user)))
        .form_request::<InviteRequest>()
        .with_route("/teams/rust")
        .post(Payload::new())
        .assert_validation_failed()
        .assert_validation_errors("email")
        .assert_validation_messages("The email field is required.");
}

#[test]
fn closure_factories_are_accepted() {
    let factory = |request: SimulatedRequest| -> Result<Box<dyn FormRequest>, BoxError> {
        Ok(Box::new(InviteRequest::create(request)?))
    };

    let mut tester = RequestTester::new(context(None))
        .form_request_factory(factory)
        .get();

    tester.assert_not_authorized();
    assert_eq!(tester.scenario().form_request_name().as_deref(), Some("closure"));
}
