//! HTTP response types for the Sen.se API client.

use std::collections::HashMap;

use serde_json::Value;

use crate::clients::errors::HttpResponseError;

/// An HTTP response from the API.
///
/// The body is always a JSON value: an empty body parses as `{}` and a body
/// that is not valid JSON is kept as `{"raw_body": "..."}`.
#[derive(Clone, Debug)]
pub struct HttpResponse {
    /// The HTTP status code.
    pub code: u16,
    /// Response headers, keyed by lowercase name (headers may have multiple values).
    pub headers: HashMap<String, Vec<String>>,
    /// The parsed response body.
    pub body: Value,
}

impl HttpResponse {
    /// Creates a new `HttpResponse`.
    #[must_use]
    pub const fn new(code: u16, headers: HashMap<String, Vec<String>>, body: Value) -> Self {
        Self {
            code,
            headers,
            body,
        }
    }

    /// Parses a raw response body.
    ///
    /// Empty bodies become `{}`; bodies that are not JSON are wrapped as
    /// `{"raw_body": text}`.
    #[must_use]
    pub fn parse_body(text: &str) -> Value {
        if text.trim().is_empty() {
            return serde_json::json!({});
        }
        serde_json::from_str(text).unwrap_or_else(|_| serde_json::json!({ "raw_body": text }))
    }

    /// Returns `true` if the status code is in the 2xx range.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.code >= 200 && self.code <= 299
    }

    /// Returns the first value of a header, by case-insensitive name.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_lowercase())
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Converts a non-2xx response into an [`HttpResponseError`].
    ///
    /// # Errors
    ///
    /// Returns the status code and body when the response is not 2xx.
    pub fn error_for_status(self) -> Result<Self, HttpResponseError> {
        if self.is_ok() {
            Ok(self)
        } else {
            Err(HttpResponseError {
                code: self.code,
                body: self.body,
            })
        }
    }
}
