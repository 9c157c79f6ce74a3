//! Field errors and the memoized result of evaluating a form request.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

// ── ValidationErrors ──────────────────────────────────────────────────────────

/// Field name to its ordered list of messages.
///
/// Serializes as a plain JSON object, e.g.
/// `{"email":["The email field is required."]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<String, Vec<String>>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message to a field.
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    /// Builder form of [`add`](Self::add).
    pub fn with(mut self, field: impl Into<String>, message: impl Into<String>) -> Self {
        self.add(field, message);
        self
    }

    pub fn has(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Every message across every field, fields in key order.
    pub fn messages(&self) -> Vec<String> {
        self.0.values().flatten().cloned().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Compact JSON rendering used in failure messages.
    pub fn to_json_string(&self) -> String {
        serde_json::to_string(&self.0).unwrap_or_else(|_| format!("{:?}", self.0))
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_json_string())
    }
}

impl<K, M, I> FromIterator<(K, I)> for ValidationErrors
where
    K: Into<String>,
    M: Into<String>,
    I: IntoIterator<Item = M>,
{
    fn from_iter<T: IntoIterator<Item = (K, I)>>(iter: T) -> Self {
        let mut errors = Self::new();
        for (field, messages) in iter {
            let field = field.into();
            for message in messages {
                errors.add(field.clone(), message);
            }
        }
        errors
    }
}

impl From<BTreeMap<String, Vec<String>>> for ValidationErrors {
    fn from(map: BTreeMap<String, Vec<String>>) -> Self {
        Self(map)
    }
}

// ── ValidationOutcome ─────────────────────────────────────────────────────────

/// What happened when a form request was evaluated.
///
/// Only ever produced once per tester. An unauthorized outcome never carries
/// errors because validation did not run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationOutcome {
    authorized: bool,
    errors: ValidationErrors,
}

impl ValidationOutcome {
    pub fn passed() -> Self {
        Self {
            authorized: true,
            errors: ValidationErrors::new(),
        }
    }

    pub fn unauthorized() -> Self {
        Self {
            authorized: false,
            errors: ValidationErrors::new(),
        }
    }

    pub fn invalid(errors: ValidationErrors) -> Self {
        Self {
            authorized: true,
            errors,
        }
    }

    pub const fn is_authorized(&self) -> bool {
        self.authorized
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    /// Authorized with no field errors.
    pub fn is_valid(&self) -> bool {
        self.authorized && self.errors.is_empty()
    }
}

impl fmt::Display for ValidationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.authorized {
            f.write_str("not authorized")
        } else if self.errors.is_empty() {
            f.write_str("passed")
        } else {
            write!(f, "failed on {} field(s)", self.errors.len())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_flatten_across_fields() {
        let errors = ValidationErrors::new()
            .with("name", "Name is required")
            .with("email", "Email is required")
            .with("email", "Email must be valid");

        assert_eq!(
            errors.messages(),
            vec!["Email is required", "Email must be valid", "Name is required"]
        );
        assert_eq!(errors.get("email").map(<[String]>::len), Some(2));
    }

    #[test]
    fn json_rendering_is_a_plain_object() {
        let errors = ValidationErrors::new().with("email", "Email is required");
        assert_eq!(errors.to_json_string(), r#"{"email":["Email is required"]}"#);
    }

    #[test]
    fn collects_from_pairs() {
        let errors: ValidationErrors = [("title", vec!["Too short", "Too plain"])]
            .into_iter()
            .collect();
        assert_eq!(errors.get("title").unwrap().len(), 2);
    }

    #[test]
    fn outcome_kinds() {
        assert!(ValidationOutcome::passed().is_valid());
        assert!(!ValidationOutcome::unauthorized().is_authorized());
        assert!(ValidationOutcome::unauthorized().errors().is_empty());

        let invalid = ValidationOutcome::invalid(ValidationErrors::new().with("email", "x"));
        assert!(invalid.is_authorized());
        assert!(!invalid.is_valid());
        assert_eq!(invalid.to_string(), "failed on 1 field(s)");
    }
}
