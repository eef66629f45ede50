//! Selector-based rich queries for the in-memory backend.
//!
//! Supports the subset of the document-store selector syntax the record
//! layer needs in tests and from the CLI:
//!
//! ```json
//! {"selector": {"FileHash": "abc", "FileUrl": {"$ne": "x"}}, "limit": 10}
//! ```
//!
//! A field condition is either a literal JSON value (equality) or an object
//! with a single operator: `$eq`, `$ne`, or `$in`. Only JSON object values
//! are candidates; anything else stored in the state never matches.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::{StoreError, StoreResult};

#[derive(Deserialize)]
struct RawQuery {
    selector: Map<String, Value>,
    #[serde(default)]
    limit: Option<usize>,
}

#[derive(Clone, Debug, PartialEq)]
enum Condition {
    Eq(Value),
    Ne(Value),
    In(Vec<Value>),
}

impl Condition {
    fn parse(field: &str, value: Value) -> StoreResult<Self> {
        let operator = match &value {
            Value::Object(map) if map.len() == 1 => map
                .keys()
                .next()
                .filter(|k| k.starts_with('$'))
                .cloned(),
            _ => None,
        };
        let Some(operator) = operator else {
            return Ok(Self::Eq(value));
        };

        let operand = match value {
            Value::Object(mut map) => map.remove(&operator).unwrap_or(Value::Null),
            _ => Value::Null,
        };
        match operator.as_str() {
            "$eq" => Ok(Self::Eq(operand)),
            "$ne" => Ok(Self::Ne(operand)),
            "$in" => match operand {
                Value::Array(values) => Ok(Self::In(values)),
                _ => Err(StoreError::InvalidQuery(format!(
                    "$in on field {field:?} requires an array"
                ))),
            },
            other => Err(StoreError::InvalidQuery(format!(
                "unsupported operator {other} on field {field:?}"
            ))),
        }
    }

    fn matches(&self, actual: Option<&Value>) -> bool {
        match (self, actual) {
            (Self::Eq(expected), Some(actual)) => expected == actual,
            (Self::Ne(expected), Some(actual)) => expected != actual,
            (Self::In(options), Some(actual)) => options.contains(actual),
            (_, None) => false,
        }
    }
}

/// A parsed rich query.
#[derive(Clone, Debug, PartialEq)]
pub struct RichQuery {
    conditions: Vec<(String, Condition)>,
    limit: Option<usize>,
}

impl RichQuery {
    /// Parse a query expression.
    pub fn parse(expression: &str) -> StoreResult<Self> {
        let raw: RawQuery = serde_json::from_str(expression)
            .map_err(|e| StoreError::InvalidQuery(e.to_string()))?;
        let conditions = raw
            .selector
            .into_iter()
            .map(|(field, value)| {
                let condition = Condition::parse(&field, value)?;
                Ok((field, condition))
            })
            .collect::<StoreResult<Vec<_>>>()?;
        Ok(Self {
            conditions,
            limit: raw.limit,
        })
    }

    /// Maximum number of results, if the query set one.
    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    /// Returns `true` if the stored `document` satisfies every condition.
    pub fn matches(&self, document: &[u8]) -> bool {
        let Ok(Value::Object(fields)) = serde_json::from_slice::<Value>(document) else {
            return false;
        };
        self.conditions
            .iter()
            .all(|(field, condition)| condition.matches(fields.get(field)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &[u8] = br#"{"FileName":"a.txt","FileHash":"abc","FileUrl":"http://x"}"#;

    #[test]
    fn equality_selector_matches() {
        let q = RichQuery::parse(r#"{"selector":{"FileHash":"abc"}}"#).unwrap();
        assert!(q.matches(DOC));
        let q = RichQuery::parse(r#"{"selector":{"FileHash":"zzz"}}"#).unwrap();
        assert!(!q.matches(DOC));
    }

    #[test]
    fn empty_selector_matches_every_object() {
        let q = RichQuery::parse(r#"{"selector":{}}"#).unwrap();
        assert!(q.matches(DOC));
        assert!(q.matches(b"{}"));
    }

    #[test]
    fn non_object_values_never_match() {
        let q = RichQuery::parse(r#"{"selector":{}}"#).unwrap();
        assert!(!q.matches(&[0x00]));
        assert!(!q.matches(b"[1,2]"));
        assert!(!q.matches(b"\"text\""));
    }

    #[test]
    fn operators() {
        let ne = RichQuery::parse(r#"{"selector":{"FileHash":{"$ne":"zzz"}}}"#).unwrap();
        assert!(ne.matches(DOC));
        let eq = RichQuery::parse(r#"{"selector":{"FileHash":{"$eq":"abc"}}}"#).unwrap();
        assert!(eq.matches(DOC));
        let within =
            RichQuery::parse(r#"{"selector":{"FileName":{"$in":["b.txt","a.txt"]}}}"#).unwrap();
        assert!(within.matches(DOC));
    }

    #[test]
    fn missing_field_never_matches() {
        let q = RichQuery::parse(r#"{"selector":{"Owner":{"$ne":"bob"}}}"#).unwrap();
        assert!(!q.matches(DOC));
    }

    #[test]
    fn nested_object_without_operator_is_literal() {
        let q = RichQuery::parse(r#"{"selector":{"meta":{"a":1}}}"#).unwrap();
        assert!(q.matches(br#"{"meta":{"a":1}}"#));
        assert!(!q.matches(br#"{"meta":{"a":2}}"#));
    }

    #[test]
    fn limit_is_parsed() {
        let q = RichQuery::parse(r#"{"selector":{},"limit":2}"#).unwrap();
        assert_eq!(q.limit(), Some(2));
    }

    #[test]
    fn malformed_queries_are_rejected() {
        for expr in [
            "not json",
            r#"{"limit":1}"#,
            r#"{"selector":{"a":{"$gt":1}}}"#,
            r#"{"selector":{"a":{"$in":"x"}}}"#,
        ] {
            assert!(
                matches!(RichQuery::parse(expr), Err(StoreError::InvalidQuery(_))),
                "{expr} should be rejected"
            );
        }
    }
}
