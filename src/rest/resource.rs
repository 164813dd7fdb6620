//! The resource base: field storage, hydration and URL derivation.
//!
//! [`Resource`] is the untyped key/value store every resource wraps.
//! [`ApiResource`] is implemented by each concrete type and derives its
//! collection and instance URLs from the type tag, the uid and an optional
//! [`ParentScope`].
//!
//! # URL derivation
//!
//! | resource | collection URL | instance URL |
//! |---|---|---|
//! | flat | `/{tag}s/` | `/{tag}s/{uid}/` |
//! | bound to a parent | `{parent}/{tag}s/` | `{parent}/{tag}s/{key}/` when a secondary key is set, else flat |
//! | singleton ([`User`](crate::rest::resources::User)) | `/user/` | `/user/` |
//!
//! # Example
//!
//! ```rust
//! use sense_api::rest::ApiResource;
//! use sense_api::rest::resources::{Feed, Node};
//!
//! let feed = Feed::new("abc");
//! assert_eq!(feed.instance_url().unwrap(), "/feeds/abc/");
//!
//! let motion = Node::new("n1").feeds().unwrap().with_key("motion").unwrap();
//! assert_eq!(motion.instance_url().unwrap(), "/nodes/n1/feeds/motion/");
//! ```

use std::collections::BTreeMap;
use std::fmt;

use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

use crate::rest::value::{coerce, FieldValue};
use crate::rest::ResourceError;

/// Fields that hold the primary identifier and cannot be set directly.
const UID_FIELDS: [&str; 2] = ["uid", "id"];

/// The parent a resource is bound to.
///
/// Captures only what URL derivation needs, never the parent itself.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParentScope {
    object: &'static str,
    uid: Option<String>,
    instance_url: String,
}

impl ParentScope {
    /// Captures the scope of a parent resource.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Configuration`] if the parent cannot be addressed.
    pub fn of<P: ApiResource>(parent: &P) -> Result<Self, ResourceError> {
        Ok(Self {
            object: P::NAME,
            uid: parent.uid().map(str::to_string),
            instance_url: parent.instance_url()?,
        })
    }

    /// Returns the type name of the parent.
    #[must_use]
    pub const fn object(&self) -> &'static str {
        self.object
    }

    /// Returns the uid of the parent, if it had one.
    #[must_use]
    pub fn uid(&self) -> Option<&str> {
        self.uid.as_deref()
    }

    /// Returns the instance URL of the parent.
    #[must_use]
    pub fn instance_url(&self) -> &str {
        &self.instance_url
    }
}

/// An untyped resource: a uid, coerced fields and an optional parent scope.
///
/// Also used directly as the fallback for unknown discriminators.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Resource {
    uid: Option<String>,
    fields: BTreeMap<String, FieldValue>,
    parent: Option<ParentScope>,
}

impl Resource {
    /// Creates an empty resource with no uid.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an addressable handle carrying only a uid.
    #[must_use]
    pub fn with_uid(uid: impl Into<String>) -> Self {
        Self {
            uid: Some(uid.into()),
            ..Self::default()
        }
    }

    /// Binds this resource to a parent.
    #[must_use]
    pub fn with_parent(mut self, parent: ParentScope) -> Self {
        self.parent = Some(parent);
        self
    }

    /// Builds a resource from a JSON object.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Parse`] if a date field cannot be parsed.
    pub fn hydrate(values: &Map<String, Value>) -> Result<Self, ResourceError> {
        let mut resource = Self::default();
        resource.refresh_from(values)?;
        Ok(resource)
    }

    /// Replaces every field with the coerced contents of `values`.
    ///
    /// The uid is taken from `uid` (or `id`) only when none is set yet, and the
    /// parent scope is kept. Nothing is modified when coercion fails.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Parse`] if a date field cannot be parsed.
    pub fn refresh_from(&mut self, values: &Map<String, Value>) -> Result<(), ResourceError> {
        let fields = values
            .iter()
            .map(|(key, raw)| coerce(key, raw).map(|value| (key.clone(), value)))
            .collect::<Result<BTreeMap<_, _>, _>>()?;

        if self.uid.is_none() {
            self.uid = UID_FIELDS
                .iter()
                .find_map(|key| values.get(*key).and_then(uid_from_json));
        }
        self.fields = fields;
        Ok(())
    }

    /// Returns the uid, if set.
    #[must_use]
    pub fn uid(&self) -> Option<&str> {
        self.uid.as_deref()
    }

    /// Returns the parent scope, if bound.
    #[must_use]
    pub const fn parent(&self) -> Option<&ParentScope> {
        self.parent.as_ref()
    }

    /// Returns a field value.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.fields.get(field)
    }

    /// Returns `true` if the field is present.
    #[must_use]
    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Iterates over all fields in key order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Sets a field, returning the previous value.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Configuration`] for `uid` and `id`; the uid
    /// cannot change once set.
    pub fn set(
        &mut self,
        field: impl Into<String>,
        value: impl Into<FieldValue>,
    ) -> Result<Option<FieldValue>, ResourceError> {
        let field = field.into();
        if UID_FIELDS.contains(&field.as_str()) {
            return Err(ResourceError::Configuration {
                resource: "Resource",
                reason: format!("field '{field}' holds the uid and cannot be set"),
            });
        }
        Ok(self.fields.insert(field, value.into()))
    }

    /// Removes a field, returning its value.
    pub fn remove(&mut self, field: &str) -> Option<FieldValue> {
        self.fields.remove(field)
    }

    /// Converts back to a JSON object, including the uid.
    #[must_use]
    pub fn to_json(&self) -> Value {
        let mut map: Map<String, Value> = self
            .fields
            .iter()
            .map(|(k, v)| (k.clone(), v.to_json()))
            .collect();
        if let Some(uid) = &self.uid {
            map.insert("uid".to_string(), Value::String(uid.clone()));
        }
        Value::Object(map)
    }

    /// Writes the uid, or `<name>` for a resource without one.
    pub(crate) fn fmt_as(&self, name: &str, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.uid {
            Some(uid) => f.write_str(uid),
            None => write!(f, "<{name} {}>", Value::Object(self.fields_json())),
        }
    }

    fn fields_json(&self) -> Map<String, Value> {
        self.fields
            .iter()
            .map(|(k, v)| (k.clone(), v.to_json()))
            .collect()
    }
}

fn uid_from_json(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

impl Serialize for Resource {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_as(<Self as ApiResource>::NAME, f)
    }
}

/// A resource type of the Sen.se API.
///
/// Implementors wrap a [`Resource`] and declare their discriminator tag; the
/// trait derives the REST addresses from it. Operations are added by the
/// capability traits ([`Readable`](crate::rest::Readable),
/// [`Listable`](crate::rest::Listable), [`Writable`](crate::rest::Writable),
/// [`Deletable`](crate::rest::Deletable)).
///
/// # Associated Constants
///
/// - `NAME`: The type name used in errors and display (e.g., "Node")
/// - `OBJECT`: The discriminator tag (e.g., "node"); `None` for the untyped resource
/// - `SECONDARY_KEY`: A field that addresses the resource under its parent
pub trait ApiResource: Clone + fmt::Debug + fmt::Display + Send + Sync + Sized {
    /// The type name (e.g., "Node").
    const NAME: &'static str;

    /// The discriminator tag, `None` for the untyped resource.
    const OBJECT: Option<&'static str>;

    /// Field that addresses a parent-bound instance in place of its uid.
    const SECONDARY_KEY: Option<&'static str> = None;

    /// Wraps an untyped resource.
    fn from_resource(resource: Resource) -> Self;

    /// Returns the underlying resource.
    fn resource(&self) -> &Resource;

    /// Returns the underlying resource mutably.
    fn resource_mut(&mut self) -> &mut Resource;

    /// Creates an addressable handle by uid. No request is made.
    #[must_use]
    fn new(uid: impl Into<String>) -> Self {
        Self::from_resource(Resource::with_uid(uid))
    }

    /// Creates an empty instance with no uid.
    #[must_use]
    fn empty() -> Self {
        Self::from_resource(Resource::new())
    }

    /// Builds an instance from a JSON object.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Parse`] if a date field cannot be parsed.
    fn hydrate(values: &Map<String, Value>) -> Result<Self, ResourceError> {
        Resource::hydrate(values).map(Self::from_resource)
    }

    /// Returns the uid, if set.
    fn uid(&self) -> Option<&str> {
        self.resource().uid()
    }

    /// Returns a field value.
    fn get(&self, field: &str) -> Option<&FieldValue> {
        self.resource().get(field)
    }

    /// Sets a field, returning the previous value.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Configuration`] for `uid` and `id`.
    fn set(
        &mut self,
        field: impl Into<String>,
        value: impl Into<FieldValue>,
    ) -> Result<Option<FieldValue>, ResourceError> {
        self.resource_mut().set(field, value)
    }

    /// Returns the lowercased, percent-encoded tag.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::NotSupported`] for the untyped resource.
    fn class_name() -> Result<String, ResourceError> {
        Self::OBJECT
            .map(|object| urlencoding::encode(&object.to_lowercase()).into_owned())
            .ok_or(ResourceError::NotSupported {
                resource: Self::NAME,
                operation: "class_name",
            })
    }

    /// Returns the flat collection URL, `/{tag}s/`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::NotSupported`] for the untyped resource.
    fn class_url() -> Result<String, ResourceError> {
        Ok(format!("/{}s/", Self::class_name()?))
    }

    /// Returns the collection URL, nested under the parent when bound.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::NotSupported`] for the untyped resource.
    fn collection_url(&self) -> Result<String, ResourceError> {
        match self.resource().parent() {
            Some(parent) => Ok(format!(
                "{}{}s/",
                parent.instance_url(),
                Self::class_name()?
            )),
            None => Self::class_url(),
        }
    }

    /// Returns the instance URL of this resource.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Configuration`] if the resource cannot be addressed.
    fn instance_url(&self) -> Result<String, ResourceError> {
        self.instance_url_for(None)
    }

    /// Returns the instance URL, addressed by `uid` when given.
    ///
    /// A parent-bound resource with its secondary key set and no explicit
    /// `uid` resolves under the parent; every other case resolves flat by uid.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Configuration`] when neither `uid`, the stored
    /// uid, nor a parent with a secondary key is available. Empty strings
    /// count as missing.
    fn instance_url_for(&self, uid: Option<&str>) -> Result<String, ResourceError> {
        let uid = uid.filter(|uid| !uid.is_empty());
        if uid.is_none() {
            if let Some(key) = scoped_key::<Self>(self) {
                let key = urlencoding::encode(key);
                return Ok(format!("{}{key}/", self.collection_url()?));
            }
        }

        let uid = uid
            .or_else(|| self.uid().filter(|uid| !uid.is_empty()))
            .ok_or_else(|| ResourceError::Configuration {
                resource: Self::NAME,
                reason: "no uid and no parent-scoped key".to_string(),
            })?;

        Ok(format!("{}{}/", Self::class_url()?, urlencoding::encode(uid)))
    }

    /// Converts back to a JSON object.
    fn to_json(&self) -> Value {
        self.resource().to_json()
    }
}

/// Returns the secondary key value when the resource is bound to a parent.
fn scoped_key<T: ApiResource>(resource: &T) -> Option<&str> {
    resource.resource().parent()?;
    let field = T::SECONDARY_KEY?;
    resource
        .get(field)
        .and_then(FieldValue::as_str)
        .filter(|key| !key.is_empty())
}

impl ApiResource for Resource {
    const NAME: &'static str = "Resource";
    const OBJECT: Option<&'static str> = None;

    fn from_resource(resource: Resource) -> Self {
        resource
    }

    fn resource(&self) -> &Resource {
        self
    }

    fn resource_mut(&mut self) -> &mut Resource {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("not an object"),
        }
    }

    #[test]
    fn test_hydrate_takes_uid_then_id() {
        let r = Resource::hydrate(&object(json!({"uid": "a", "label": "x"}))).unwrap();
        assert_eq!(r.uid(), Some("a"));
        assert_eq!(r.get("label").and_then(FieldValue::as_str), Some("x"));

        let r = Resource::hydrate(&object(json!({"id": 42}))).unwrap();
        assert_eq!(r.uid(), Some("42"));

        let r = Resource::hydrate(&object(json!({"label": "x"}))).unwrap();
        assert_eq!(r.uid(), None);
    }

    #[test]
    fn test_refresh_overwrites_fields_but_keeps_uid() {
        let mut r = Resource::hydrate(&object(json!({"uid": "a", "label": "x", "old": 1}))).unwrap();
        r.refresh_from(&object(json!({"uid": "b", "label": "y"})))
            .unwrap();

        assert_eq!(r.uid(), Some("a"));
        assert_eq!(r.get("label").and_then(FieldValue::as_str), Some("y"));
        assert!(!r.contains("old"));
    }

    #[test]
    fn test_failed_refresh_leaves_resource_untouched() {
        let mut r = Resource::hydrate(&object(json!({"label": "x"}))).unwrap();
        let result = r.refresh_from(&object(json!({"uid": "b", "createdAt": "garbage"})));

        assert!(matches!(result, Err(ResourceError::Parse { .. })));
        assert_eq!(r.uid(), None);
        assert_eq!(r.get("label").and_then(FieldValue::as_str), Some("x"));
    }

    #[test]
    fn test_empty_uid_cannot_be_addressed() {
        let r = Resource::with_uid("");
        assert!(matches!(
            r.instance_url(),
            Err(ResourceError::Configuration { resource: "Resource", .. })
        ));
        assert!(matches!(
            Resource::new().instance_url_for(Some("")),
            Err(ResourceError::Configuration { .. })
        ));
    }

    #[test]
    fn test_set_rejects_uid_fields() {
        let mut r = Resource::with_uid("a");
        assert!(matches!(
            r.set("uid", "b"),
            Err(ResourceError::Configuration { .. })
        ));
        assert!(r.set("id", "b").is_err());
        assert_eq!(r.uid(), Some("a"));

        assert_eq!(r.set("label", "x").unwrap(), None);
        assert_eq!(
            r.set("label", "y").unwrap(),
            Some(FieldValue::from("x"))
        );
    }

    #[test]
    fn test_display_renders_uid_or_generic_form() {
        assert_eq!(Resource::with_uid("abc").to_string(), "abc");

        let mut r = Resource::new();
        r.set("label", "x").unwrap();
        assert_eq!(r.to_string(), r#"<Resource {"label":"x"}>"#);
    }

    #[test]
    fn test_untyped_resource_has_no_class_name() {
        assert!(matches!(
            Resource::class_name(),
            Err(ResourceError::NotSupported { resource: "Resource", .. })
        ));
        assert!(Resource::with_uid("a").instance_url().is_err());
    }

    #[test]
    fn test_to_json_includes_uid() {
        let r = Resource::hydrate(&object(json!({"uid": "a", "count": 3}))).unwrap();
        assert_eq!(r.to_json(), json!({"uid": "a", "count": 3}));
    }
}
