//! Field values and the coercion of raw JSON into them.
//!
//! [`coerce`] turns one raw JSON value into a [`FieldValue`], using the field
//! name to recognise timestamps and the `object` discriminator to hydrate
//! nested resources through the registry.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;
use serde_json::Value;

use crate::rest::registry::{hydrate_any, AnyResource};
use crate::rest::ResourceError;

/// Field names whose string values are parsed as timestamps.
pub const DATE_FIELDS: &[&str] = &["updatedAt", "createdAt", "start", "end"];

/// A typed field value held by a resource.
///
/// Serializes to the same JSON as [`FieldValue::to_json`].
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// A JSON scalar (`null`, boolean, number or string), kept as-is.
    Scalar(Value),
    /// A parsed timestamp from one of the [`DATE_FIELDS`].
    Timestamp(DateTime<FixedOffset>),
    /// A nested resource, hydrated from a JSON object.
    Resource(Box<AnyResource>),
    /// An ordered sequence of coerced values, from a JSON array.
    List(Vec<FieldValue>),
}

impl FieldValue {
    /// Returns the string if this is a string scalar.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Scalar(Value::String(s)) => Some(s),
            _ => None,
        }
    }

    /// Returns the integer if this is a non-negative integer scalar.
    #[must_use]
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Self::Scalar(v) => v.as_u64(),
            _ => None,
        }
    }

    /// Returns the integer if this is an integer scalar.
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Scalar(v) => v.as_i64(),
            _ => None,
        }
    }

    /// Returns the boolean if this is a boolean scalar.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Scalar(v) => v.as_bool(),
            _ => None,
        }
    }

    /// Returns `true` for a `null` scalar.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Scalar(Value::Null))
    }

    /// Returns the timestamp if this is a parsed date field.
    #[must_use]
    pub const fn as_timestamp(&self) -> Option<&DateTime<FixedOffset>> {
        match self {
            Self::Timestamp(ts) => Some(ts),
            _ => None,
        }
    }

    /// Returns the nested resource, if any.
    #[must_use]
    pub fn as_resource(&self) -> Option<&AnyResource> {
        match self {
            Self::Resource(r) => Some(r),
            _ => None,
        }
    }

    /// Consumes the value, returning the nested resource, if any.
    #[must_use]
    pub fn into_resource(self) -> Option<AnyResource> {
        match self {
            Self::Resource(r) => Some(*r),
            _ => None,
        }
    }

    /// Returns the elements if this is a list.
    #[must_use]
    pub fn as_list(&self) -> Option<&[Self]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the uid this value refers to.
    ///
    /// A nested resource refers to its own uid; a string scalar is taken to be
    /// a uid. Anything else refers to nothing.
    #[must_use]
    pub fn uid_ref(&self) -> Option<&str> {
        match self {
            Self::Resource(r) => r.uid(),
            Self::Scalar(Value::String(s)) => Some(s),
            _ => None,
        }
    }

    /// Converts back to JSON. Timestamps are rendered as RFC 3339.
    #[must_use]
    pub fn to_json(&self) -> Value {
        match self {
            Self::Scalar(v) => v.clone(),
            Self::Timestamp(ts) => Value::String(ts.to_rfc3339()),
            Self::Resource(r) => r.to_json(),
            Self::List(items) => Value::Array(items.iter().map(Self::to_json).collect()),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Scalar(Value::String(value.to_string()))
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Scalar(Value::String(value))
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Scalar(Value::from(value))
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Scalar(Value::Bool(value))
    }
}

impl From<DateTime<FixedOffset>> for FieldValue {
    fn from(value: DateTime<FixedOffset>) -> Self {
        Self::Timestamp(value)
    }
}

impl From<AnyResource> for FieldValue {
    fn from(value: AnyResource) -> Self {
        Self::Resource(Box::new(value))
    }
}

impl From<Vec<Self>> for FieldValue {
    fn from(value: Vec<Self>) -> Self {
        Self::List(value)
    }
}

/// Coerces a raw JSON value into a [`FieldValue`].
///
/// - strings under a [`DATE_FIELDS`] name are parsed as timestamps
/// - arrays are coerced element by element, keeping order and length
/// - objects are hydrated through the registry, falling back to the
///   untyped resource for missing or unknown discriminators
/// - every other scalar passes through unchanged
///
/// # Errors
///
/// Returns [`ResourceError::Parse`] if a date field cannot be parsed, at any
/// depth.
///
/// # Example
///
/// ```rust
/// use sense_api::rest::{coerce, FieldValue};
/// use serde_json::json;
///
/// let value = coerce("createdAt", &json!("2015-03-11T09:45:12Z")).unwrap();
/// assert!(value.as_timestamp().is_some());
///
/// let value = coerce("label", &json!("kitchen")).unwrap();
/// assert_eq!(value.as_str(), Some("kitchen"));
/// ```
pub fn coerce(field: &str, raw: &Value) -> Result<FieldValue, ResourceError> {
    match raw {
        Value::String(s) if DATE_FIELDS.contains(&field) => {
            parse_timestamp(field, s).map(FieldValue::Timestamp)
        }
        Value::Array(items) => items
            .iter()
            .map(|item| coerce(field, item))
            .collect::<Result<Vec<_>, _>>()
            .map(FieldValue::List),
        Value::Object(map) => hydrate_any(map).map(FieldValue::from),
        other => Ok(FieldValue::Scalar(other.clone())),
    }
}

/// Parses an ISO-8601 style timestamp.
///
/// Accepts RFC 3339, offsets without a colon, naive date-times (taken as UTC,
/// with `T` or space separator) and bare dates (midnight UTC).
///
/// # Errors
///
/// Returns [`ResourceError::Parse`] when no accepted form matches.
pub fn parse_timestamp(field: &str, raw: &str) -> Result<DateTime<FixedOffset>, ResourceError> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(ts);
    }
    if let Ok(ts) = DateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f%z") {
        return Ok(ts);
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(naive.and_utc().fixed_offset());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map(|date| date.and_time(NaiveTime::default()).and_utc().fixed_offset())
        .map_err(|source| ResourceError::Parse {
            field: field.to_string(),
            value: raw.to_string(),
            source,
        })
}
