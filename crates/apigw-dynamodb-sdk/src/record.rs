//! The record written on every invocation
//!
//! A [`Record`] is built either from the inbound JSON payload or, when the
//! request has no body, from fixed defaults with a freshly generated id.

use serde_json::{Map, Value as JsonValue};
use uuid::Uuid;

use crate::error::HandlerError;

/// Year written when the request has no body
pub const DEFAULT_YEAR: i64 = 2012;

/// Title written when the request has no body
pub const DEFAULT_TITLE: &str = "The Amazing Spider-Man 2";

/// A movie record keyed by `id`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub id: String,
    pub year: i64,
    pub title: String,
}

impl Record {
    pub fn new(id: impl Into<String>, year: i64, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            year,
            title: title.into(),
        }
    }

    /// The default record with a new UUID v4 as its id.
    pub fn with_generated_id() -> Self {
        Self::new(Uuid::new_v4().to_string(), DEFAULT_YEAR, DEFAULT_TITLE)
    }

    /// Parse a request body into a record.
    ///
    /// The body must be a JSON object carrying `id`, `year` and `title`.
    pub fn from_body(body: &str) -> Result<Self, HandlerError> {
        let value: JsonValue = serde_json::from_str(body)?;
        RecordPayload::from_value(value)?.try_into()
    }
}

/// The raw, unvalidated fields of an inbound payload.
///
/// Fields are kept as JSON values so the coercion rules below decide what is
/// acceptable, not the deserializer. `null` counts as missing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordPayload {
    pub id: Option<JsonValue>,
    pub year: Option<JsonValue>,
    pub title: Option<JsonValue>,
}

impl RecordPayload {
    /// Pull the record fields out of a JSON object. Extra fields are ignored.
    pub fn from_value(value: JsonValue) -> Result<Self, HandlerError> {
        match value {
            JsonValue::Object(mut map) => Ok(Self {
                id: take_field(&mut map, "id"),
                year: take_field(&mut map, "year"),
                title: take_field(&mut map, "title"),
            }),
            other => Err(HandlerError::MalformedPayload(format!(
                "expected a JSON object, got {}",
                json_type_name(&other)
            ))),
        }
    }
}

impl TryFrom<RecordPayload> for Record {
    type Error = HandlerError;

    fn try_from(payload: RecordPayload) -> Result<Self, Self::Error> {
        let id = coerce_string("id", require("id", payload.id)?)?;
        if id.is_empty() {
            return Err(HandlerError::MalformedPayload("`id` must not be empty".into()));
        }
        let year = coerce_year(require("year", payload.year)?)?;
        let title = coerce_string("title", require("title", payload.title)?)?;

        Ok(Record { id, year, title })
    }
}

fn take_field(map: &mut Map<String, JsonValue>, name: &str) -> Option<JsonValue> {
    map.remove(name).filter(|v| !v.is_null())
}

fn require(name: &str, value: Option<JsonValue>) -> Result<JsonValue, HandlerError> {
    value.ok_or_else(|| HandlerError::MalformedPayload(format!("missing field `{}`", name)))
}

/// Strings pass through, numbers are rendered as their decimal text.
fn coerce_string(name: &str, value: JsonValue) -> Result<String, HandlerError> {
    match value {
        JsonValue::String(s) => Ok(s),
        JsonValue::Number(n) => Ok(n.to_string()),
        other => Err(HandlerError::MalformedPayload(format!(
            "`{}` must be a string or number, got {}",
            name,
            json_type_name(&other)
        ))),
    }
}

/// Integers pass through, strings must hold an integer.
fn coerce_year(value: JsonValue) -> Result<i64, HandlerError> {
    let invalid = |detail: String| HandlerError::MalformedPayload(format!("`year` must be an integer, {}", detail));

    match value {
        JsonValue::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().and_then(integral_f64))
            .ok_or_else(|| invalid(format!("got {}", n))),
        JsonValue::String(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| invalid(format!("got {:?}", s))),
        other => Err(invalid(format!("got {}", json_type_name(&other)))),
    }
}

/// `1999.0` and `1e3` are integers written as floats.
fn integral_f64(f: f64) -> Option<i64> {
    // i64::MAX as f64 rounds up to 2^63, which is out of range
    if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 {
        Some(f as i64)
    } else {
        None
    }
}

fn json_type_name(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "a boolean",
        JsonValue::Number(_) => "a number",
        JsonValue::String(_) => "a string",
        JsonValue::Array(_) => "an array",
        JsonValue::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn malformed(body: &str) -> String {
        match Record::from_body(body) {
            Err(HandlerError::MalformedPayload(msg)) => msg,
            other => panic!("expected MalformedPayload for {}, got {:?}", body, other),
        }
    }

    #[test]
    fn test_parse_complete_payload() {
        let record = Record::from_body(r#"{"id":"42","year":1999,"title":"Foo"}"#).unwrap();
        assert_eq!(record, Record::new("42", 1999, "Foo"));
    }

    #[test]
    fn test_coerces_numbers_and_numeric_strings() {
        let record = Record::from_body(r#"{"id":42,"year":" 2001 ","title":7}"#).unwrap();
        assert_eq!(record, Record::new("42", 2001, "7"));
    }

    #[test]
    fn test_accepts_integral_floats_for_year() {
        let record = Record::from_body(r#"{"id":"42","year":1999.0,"title":"Foo"}"#).unwrap();
        assert_eq!(record.year, 1999);

        let record = Record::from_body(r#"{"id":"42","year":1e3,"title":"Foo"}"#).unwrap();
        assert_eq!(record.year, 1000);

        assert!(malformed(r#"{"id":"42","year":1e300,"title":"Foo"}"#).starts_with("`year` must be an integer"));
    }

    #[test]
    fn test_ignores_extra_fields() {
        let record = Record::from_body(r#"{"id":"a","year":1,"title":"b","rating":5}"#).unwrap();
        assert_eq!(record, Record::new("a", 1, "b"));
    }

    #[test]
    fn test_missing_fields() {
        assert_eq!(malformed(r#"{"id":"42","year":1999}"#), "missing field `title`");
        assert_eq!(malformed(r#"{"year":1999,"title":"Foo"}"#), "missing field `id`");
        assert_eq!(malformed(r#"{"id":"42","year":null,"title":"Foo"}"#), "missing field `year`");
    }

    #[test]
    fn test_rejects_bad_types() {
        assert!(malformed(r#"{"id":"42","year":19.5,"title":"Foo"}"#).starts_with("`year` must be an integer"));
        assert!(malformed(r#"{"id":"42","year":"soon","title":"Foo"}"#).starts_with("`year` must be an integer"));
        assert!(malformed(r#"{"id":"42","year":1999,"title":["Foo"]}"#).contains("got an array"));
        assert!(malformed(r#"{"id":true,"year":1999,"title":"Foo"}"#).contains("got a boolean"));
        assert_eq!(malformed(r#"{"id":"","year":1999,"title":"Foo"}"#), "`id` must not be empty");
    }

    #[test]
    fn test_rejects_non_objects_and_invalid_json() {
        assert_eq!(malformed(r#"["42",1999,"Foo"]"#), "expected a JSON object, got an array");
        assert_eq!(malformed("null"), "expected a JSON object, got null");
        assert!(malformed("not json").starts_with("invalid JSON"));
        assert!(malformed("   ").starts_with("invalid JSON"));
    }

    #[test]
    fn test_generated_defaults_are_unique() {
        let ids: HashSet<String> = (0..100)
            .map(|_| {
                let record = Record::with_generated_id();
                assert_eq!(record.year, DEFAULT_YEAR);
                assert_eq!(record.title, DEFAULT_TITLE);
                assert!(Uuid::parse_str(&record.id).is_ok());
                record.id
            })
            .collect();
        assert_eq!(ids.len(), 100);
    }
}
