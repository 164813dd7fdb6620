//! Query parameters.
//!
//! Parameters are a JSON object. Before transmission the `expand` key is
//! renamed to `expand[]`, the convention the API uses to request eager
//! loading of a relation, and arrays are flattened into repeated keys.

use serde_json::{Map, Value};

use crate::clients::flatten_object;

/// Request parameters, as a JSON object.
pub type Params = Map<String, Value>;

const EXPAND: &str = "expand";
const EXPAND_WIRE: &str = "expand[]";

/// Renames `expand` to `expand[]`; every other key passes through.
///
/// # Example
///
/// ```rust
/// use sense_api::rest::expand;
/// use serde_json::json;
///
/// let params = json!({"expand": ["a", "b"], "limit": 5});
/// let params = expand(params.as_object().unwrap().clone());
/// assert_eq!(serde_json::Value::Object(params), json!({"expand[]": ["a", "b"], "limit": 5}));
/// ```
#[must_use]
pub fn expand(mut params: Params) -> Params {
    if let Some(value) = params.remove(EXPAND) {
        params.insert(EXPAND_WIRE.to_string(), value);
    }
    params
}

/// Converts parameters to query pairs, after [`expand`].
#[must_use]
pub fn to_query_pairs(params: Params) -> Vec<(String, String)> {
    flatten_object(&expand(params))
}
