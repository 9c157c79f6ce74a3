//! Storage for the capabilities a form request receives before evaluation.
//!
//! Form request implementations embed a [`RequestBindings`] and forward the
//! `FormRequest` setters to it, then read route, user and redirect helpers
//! back out of it while authorizing and validating.

use crate::application::ports::output::{Redirector, RouteResolver, UserResolver};
use crate::domain::{MatchedRoute, Principal, SimulatedRequest};

/// The simulated request plus whatever resolvers were injected.
pub struct RequestBindings {
    request: SimulatedRequest,
    redirector: Option<Box<dyn Redirector>>,
    route_resolver: Option<Box<dyn RouteResolver>>,
    user_resolver: Option<Box<dyn UserResolver>>,
}

impl RequestBindings {
    pub fn new(request: SimulatedRequest) -> Self {
        Self {
            request,
            redirector: None,
            route_resolver: None,
            user_resolver: None,
        }
    }

    pub fn request(&self) -> &SimulatedRequest {
        &self.request
    }

    pub fn set_redirector(&mut self, redirector: Box<dyn Redirector>) {
        self.redirector = Some(redirector);
    }

    pub fn set_route_resolver(&mut self, resolver: Box<dyn RouteResolver>) {
        self.route_resolver = Some(resolver);
    }

    pub fn set_user_resolver(&mut self, resolver: Box<dyn UserResolver>) {
        self.user_resolver = Some(resolver);
    }

    pub fn redirector(&self) -> Option<&dyn Redirector> {
        self.redirector.as_deref()
    }

    /// The matched route, or `None` when no resolver is bound or nothing
    /// matched.
    pub fn route(&self) -> Option<MatchedRoute> {
        self.route_resolver.as_ref().and_then(|r| r.resolve())
    }

    /// One captured route parameter.
    pub fn route_parameter(&self, key: &str) -> Option<String> {
        self.route()
            .and_then(|route| route.parameter(key).map(str::to_string))
    }

    /// The acting user, if any.
    pub fn user(&self) -> Option<Principal> {
        self.user_resolver.as_ref().and_then(|r| r.user())
    }
}

impl std::fmt::Debug for RequestBindings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestBindings")
            .field("request", &self.request)
            .field("redirector", &self.redirector.is_some())
            .field("route_resolver", &self.route_resolver.is_some())
            .field("user_resolver", &self.user_resolver.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{HttpMethod, Payload};

    struct FixedRoute;

    impl RouteResolver for FixedRoute {
        fn resolve(&self) -> Option<MatchedRoute> {
            Some(MatchedRoute::new("/posts/{post}").with_parameter("post", "7"))
        }
    }

    struct FixedUser;

    impl UserResolver for FixedUser {
        fn user(&self) -> Option<Principal> {
            Some(Principal::new("42"))
        }
    }

    fn bindings() -> RequestBindings {
        RequestBindings::new(SimulatedRequest::new(
            HttpMethod::Put,
            "/posts/7",
            Payload::new(),
        ))
    }

    #[test]
    fn unbound_resolvers_yield_nothing() {
        let bindings = bindings();
        assert!(bindings.route().is_none());
        assert!(bindings.user().is_none());
        assert!(bindings.redirector().is_none());
    }

    #[test]
    fn bound_resolvers_are_consulted() {
        let mut bindings = bindings();
        bindings.set_route_resolver(Box::new(FixedRoute));
        bindings.set_user_resolver(Box::new(FixedUser));

        assert_eq!(bindings.route_parameter("post").as_deref(), Some("7"));
        assert_eq!(bindings.route_parameter("comment"), None);
        assert_eq!(bindings.user().map(|u| u.id), Some("42".to_string()));
    }
}
