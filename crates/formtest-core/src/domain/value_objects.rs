//! Domain value objects: HttpMethod, Payload, OneOrMany.
//!
//! # Design
//!
//! These are pure value types with equality-by-value and no identity. This
//! file's only job is to define the types, their string representations,
//! their `FromStr` parsers and their conversions.

use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;

// ── HttpMethod ───────────────────────────────────────────────────────────────

/// The HTTP method of a simulated request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    #[default]
    Get,
    Head,
    Post,
    Put,
    Patch,
    Delete,
    Options,
}

impl HttpMethod {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Head => "HEAD",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
            Self::Options => "OPTIONS",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(Self::Get),
            "HEAD" => Ok(Self::Head),
            "POST" => Ok(Self::Post),
            "PUT" => Ok(Self::Put),
            "PATCH" => Ok(Self::Patch),
            "DELETE" => Ok(Self::Delete),
            "OPTIONS" => Ok(Self::Options),
            other => Err(DomainError::UnknownMethod(other.to_string())),
        }
    }
}

// ── Payload ──────────────────────────────────────────────────────────────────

/// Simulated request input: field name to value.
///
/// Keys are unique and kept sorted, so two payloads built from the same
/// pairs in a different order compare equal.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Payload(BTreeMap<String, Value>);

impl Payload {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a payload from a JSON value, which must be an object.
    pub fn from_json(value: Value) -> Result<Self, DomainError> {
        match value {
            Value::Object(map) => Ok(map.into()),
            Value::Null => Ok(Self::new()),
            other => Err(DomainError::PayloadNotAnObject {
                kind: json_kind(&other),
            }),
        }
    }

    /// Add or replace a field.
    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(field, value);
        self
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(field.into(), value.into())
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// The payload as a JSON object.
    pub fn to_json(&self) -> Value {
        Value::Object(self.0.clone().into_iter().collect())
    }
}

impl<K, V, const N: usize> From<[(K, V); N]> for Payload
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}

impl<K, V> FromIterator<(K, V)> for Payload
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl From<BTreeMap<String, Value>> for Payload {
    fn from(map: BTreeMap<String, Value>) -> Self {
        Self(map)
    }
}

impl From<HashMap<String, Value>> for Payload {
    fn from(map: HashMap<String, Value>) -> Self {
        map.into_iter().collect()
    }
}

impl From<serde_json::Map<String, Value>> for Payload {
    fn from(map: serde_json::Map<String, Value>) -> Self {
        map.into_iter().collect()
    }
}

impl TryFrom<Value> for Payload {
    type Error = DomainError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::from_json(value)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

// ── OneOrMany ─────────────────────────────────────────────────────────────────

/// One string or an ordered sequence of strings.
///
/// Lets assertions accept `"email"` as well as `["email", "name"]`.
pub trait OneOrMany {
    fn into_strings(self) -> Vec<String>;
}

impl OneOrMany for &str {
    fn into_strings(self) -> Vec<String> {
        vec![self.to_string()]
    }
}

impl OneOrMany for String {
    fn into_strings(self) -> Vec<String> {
        vec![self]
    }
}

impl OneOrMany for &String {
    fn into_strings(self) -> Vec<String> {
        vec![self.clone()]
    }
}

impl<S: AsRef<str>> OneOrMany for Vec<S> {
    fn into_strings(self) -> Vec<String> {
        self.iter().map(|s| s.as_ref().to_string()).collect()
    }
}

impl<S: AsRef<str>> OneOrMany for &[S] {
    fn into_strings(self) -> Vec<String> {
        self.iter().map(|s| s.as_ref().to_string()).collect()
    }
}

impl<S: AsRef<str>, const N: usize> OneOrMany for [S; N] {
    fn into_strings(self) -> Vec<String> {
        self.iter().map(|s| s.as_ref().to_string()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn method_parses_case_insensitively() {
        assert_eq!(HttpMethod::from_str("post").unwrap(), HttpMethod::Post);
        assert_eq!(HttpMethod::from_str("Delete").unwrap(), HttpMethod::Delete);
        assert_eq!(
            HttpMethod::from_str("brew"),
            Err(DomainError::UnknownMethod("BREW".into()))
        );
    }

    #[test]
    fn method_display_is_uppercase() {
        assert_eq!(HttpMethod::Patch.to_string(), "PATCH");
    }

    #[test]
    fn payload_order_is_irrelevant() {
        let a = Payload::from([("name", json!("Ada")), ("email", json!("ada@example.com"))]);
        let b = Payload::from([("email", json!("ada@example.com")), ("name", json!("Ada"))]);
        assert_eq!(a, b);
    }

    #[test]
    fn payload_from_json_requires_object() {
        let payload = Payload::from_json(json!({ "title": "Hello" })).unwrap();
        assert_eq!(payload.get("title"), Some(&json!("Hello")));
        assert!(Payload::from_json(Value::Null).unwrap().is_empty());

        let err = Payload::from_json(json!([1, 2])).unwrap_err();
        assert_eq!(err, DomainError::PayloadNotAnObject { kind: "an array" });
    }

    #[test]
    fn payload_later_keys_replace_earlier_ones() {
        let payload = Payload::new().with("age", 30).with("age", 31);
        assert_eq!(payload.len(), 1);
        assert_eq!(payload.get("age"), Some(&json!(31)));
    }

    #[test]
    fn one_or_many_wraps_single_values() {
        assert_eq!("email".into_strings(), vec!["email"]);
        assert_eq!(["email", "name"].into_strings(), vec!["email", "name"]);
        assert_eq!(vec![String::from("a")].into_strings(), vec!["a"]);
    }
}
