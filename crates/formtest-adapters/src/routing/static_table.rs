//! In-memory route table for testing.

use std::{
    collections::BTreeMap,
    sync::{Arc, RwLock},
};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use formtest_core::{
    application::ports::{RouteError, RouteTable},
    domain::{HttpMethod, MatchedRoute, SimulatedRequest},
};

/// Why a route could not be registered.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RoutingError {
    #[error("Route name '{0}' is already registered")]
    DuplicateName(String),

    #[error("Invalid route pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("Route definitions are not valid JSON: {0}")]
    Json(String),
}

/// One registered route: method, URI pattern and optional name.
///
/// Patterns use `{param}` segments, e.g. `/posts/{post}/comments`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteDefinition {
    pub method: HttpMethod,
    pub uri: String,
    #[serde(default)]
    pub name: Option<String>,
}

impl RouteDefinition {
    pub fn new(method: HttpMethod, uri: impl Into<String>) -> Self {
        Self {
            method,
            uri: uri.into(),
            name: None,
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    fn accepts(&self, method: HttpMethod) -> bool {
        self.method == method || (method == HttpMethod::Head && self.method == HttpMethod::Get)
    }

    /// Captured parameters if `path` fits this route's pattern.
    fn capture(&self, path: &str) -> Option<BTreeMap<String, String>> {
        let pattern: Vec<&str> = segments(&self.uri).collect();
        let actual: Vec<&str> = segments(path).collect();

        if pattern.len() != actual.len() {
            return None;
        }

        let mut parameters = BTreeMap::new();
        for (expected, given) in pattern.iter().zip(&actual) {
            match parameter_name(expected) {
                Some(name) => {
                    parameters.insert(name.to_string(), (*given).to_string());
                }
                None if expected == given => {}
                None => return None,
            }
        }

        Some(parameters)
    }
}

fn segments(uri: &str) -> impl Iterator<Item = &str> {
    uri.split('/').filter(|s| !s.is_empty())
}

fn parameter_name(segment: &str) -> Option<&str> {
    segment.strip_prefix('{')?.strip_suffix('}')
}

fn validate_pattern(uri: &str) -> Result<(), RoutingError> {
    let mut seen = Vec::new();
    for segment in segments(uri) {
        match parameter_name(segment) {
            Some("") => {
                return Err(RoutingError::InvalidPattern {
                    pattern: uri.to_string(),
                    reason: "empty parameter name".into(),
                });
            }
            Some(name) if seen.contains(&name) => {
                return Err(RoutingError::InvalidPattern {
                    pattern: uri.to_string(),
                    reason: format!("parameter '{name}' appears twice"),
                });
            }
            Some(name) => seen.push(name),
            None if segment.contains('{') || segment.contains('}') => {
                return Err(RoutingError::InvalidPattern {
                    pattern: uri.to_string(),
                    reason: format!("unbalanced braces in segment '{segment}'"),
                });
            }
            None => {}
        }
    }
    Ok(())
}

/// Thread-safe route table with exact segment matching.
///
/// Clones share the same routes.
#[derive(Debug, Clone, Default)]
pub struct StaticRouteTable {
    inner: Arc<RwLock<Vec<RouteDefinition>>>,
}

impl StaticRouteTable {
    /// Create an empty table. Every request fails to match.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load route definitions from a JSON array.
    pub fn from_json(json: &str) -> Result<Self, RoutingError> {
        let definitions: Vec<RouteDefinition> =
            serde_json::from_str(json).map_err(|e| RoutingError::Json(e.to_string()))?;

        let table = Self::new();
        for definition in definitions {
            table.add(definition)?;
        }
        Ok(table)
    }

    /// Builder form of [`add`](Self::add).
    pub fn route(self, definition: RouteDefinition) -> Result<Self, RoutingError> {
        self.add(definition)?;
        Ok(self)
    }

    /// Register a route.
    pub fn add(&self, definition: RouteDefinition) -> Result<(), RoutingError> {
        validate_pattern(&definition.uri)?;

        let mut inner = self
            .inner
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        if let Some(name) = &definition.name {
            if inner.iter().any(|r| r.name.as_ref() == Some(name)) {
                return Err(RoutingError::DuplicateName(name.clone()));
            }
        }

        inner.push(definition);
        Ok(())
    }

    /// Snapshot of the registered routes, in registration order.
    pub fn definitions(&self) -> Vec<RouteDefinition> {
        self.inner
            .read()
            .map(|r| r.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }

    /// Get the number of routes.
    pub fn len(&self) -> usize {
        self.inner
            .read()
            .map(|r| r.len())
            .unwrap_or_else(|poisoned| poisoned.into_inner().len())
    }

    /// Check if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl RouteTable for StaticRouteTable {
    fn match_request(&self, request: &SimulatedRequest) -> Result<MatchedRoute, RouteError> {
        let inner = self
            .inner
            .read()
            .map_err(|_| RouteError::Unavailable("route table lock poisoned".into()))?;

        let mut allowed = Vec::new();
        for route in inner.iter() {
            let Some(parameters) = route.capture(request.path()) else {
                continue;
            };

            if route.accepts(request.method()) {
                debug!(route = %route.uri, request = %request, "Route matched");
                return Ok(MatchedRoute {
                    name: route.name.clone(),
                    uri: route.uri.clone(),
                    parameters,
                });
            }

            allowed.push(route.method);
        }

        if allowed.is_empty() {
            Err(RouteError::NotFound {
                method: request.method(),
                uri: request.uri().to_string(),
            })
        } else {
            Err(RouteError::MethodNotAllowed {
                method: request.method(),
                uri: request.uri().to_string(),
                allowed,
            })
        }
    }
}
