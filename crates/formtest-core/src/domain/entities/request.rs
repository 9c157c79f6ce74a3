//! The simulated request and the context values resolved around it.
//!
//! # Domain purity
//!
//! This module must not import `tracing`. Observability is the responsibility
//! of the application layer, not the domain.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::value_objects::{HttpMethod, Payload};

// ── SimulatedRequest ──────────────────────────────────────────────────────────

/// A request that never touched a socket.
///
/// Form requests are constructed from one of these. It carries exactly what a
/// scenario describes: method, URI and input payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulatedRequest {
    method: HttpMethod,
    uri: String,
    payload: Payload,
}

impl SimulatedRequest {
    pub fn new(method: HttpMethod, uri: impl Into<String>, payload: Payload) -> Self {
        Self {
            method,
            uri: normalize_uri(uri.into()),
            payload,
        }
    }

    pub const fn method(&self) -> HttpMethod {
        self.method
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// The URI without its query string.
    pub fn path(&self) -> &str {
        self.uri.split_once('?').map_or(self.uri.as_str(), |(path, _)| path)
    }

    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    /// Look up one input field.
    pub fn input(&self, field: &str) -> Option<&Value> {
        self.payload.get(field)
    }

    /// Look up one input field as a string slice.
    pub fn input_str(&self, field: &str) -> Option<&str> {
        self.payload.get(field).and_then(Value::as_str)
    }

    /// Whether the field is present and not null or blank.
    pub fn filled(&self, field: &str) -> bool {
        match self.payload.get(field) {
            None | Some(Value::Null) => false,
            Some(Value::String(s)) => !s.trim().is_empty(),
            Some(Value::Array(items)) => !items.is_empty(),
            Some(_) => true,
        }
    }
}

impl fmt::Display for SimulatedRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.uri)
    }
}

/// Reduce `uri` to an origin-form target: absolute URLs lose their scheme
/// and authority, and the result always starts with `/`.
fn normalize_uri(uri: String) -> String {
    let target = match uri.split_once("://") {
        Some((scheme, rest)) if is_scheme(scheme) => {
            rest.find(['/', '?']).map_or("", |start| &rest[start..])
        }
        _ => uri.as_str(),
    };

    if target.starts_with('/') {
        target.to_string()
    } else {
        format!("/{target}")
    }
}

fn is_scheme(candidate: &str) -> bool {
    let mut chars = candidate.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

// ── MatchedRoute ──────────────────────────────────────────────────────────────

/// The route a simulated request resolved to, with captured parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchedRoute {
    pub name: Option<String>,
    pub uri: String,
    pub parameters: BTreeMap<String, String>,
}

impl MatchedRoute {
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            ..Self::default()
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_parameter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.parameters.insert(key.into(), value.into());
        self
    }

    pub fn parameter(&self, key: &str) -> Option<&str> {
        self.parameters.get(key).map(String::as_str)
    }
}

// ── Principal ─────────────────────────────────────────────────────────────────

/// The authenticated user a form request may inspect while authorizing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    pub id: String,
    pub roles: Vec<String>,
}

impl Principal {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            roles: Vec::new(),
        }
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.roles.push(role.into());
        self
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }
}

// ── Redirect ──────────────────────────────────────────────────────────────────

/// A redirect a form request asked for. Never followed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Redirect {
    pub target: String,
    pub status: u16,
}
