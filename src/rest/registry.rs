//! Discriminator-driven hydration.
//!
//! Every JSON object the API returns names its type in the `object` field.
//! The registry maps each known tag to a factory that hydrates the matching
//! concrete type into an [`AnyResource`]. Unknown or missing tags are not an
//! error: they hydrate into [`AnyResource::Generic`], since the API may add
//! resource kinds this library does not model yet.

use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

use crate::rest::resources::{
    Application, Device, Event, Feed, Node, Person, Subscription, User,
};
use crate::rest::{ApiResource, Page, Resource, ResourceError};

/// Hydrates one concrete type from a JSON object.
pub type Factory = fn(&Map<String, Value>) -> Result<AnyResource, ResourceError>;

macro_rules! any_resource {
    ($($variant:ident),+ $(,)?) => {
        /// A hydrated resource of any known type.
        #[derive(Clone, Debug, PartialEq)]
        pub enum AnyResource {
            $(
                #[allow(missing_docs)]
                $variant($variant),
            )+
            /// A resource with a missing or unregistered discriminator.
            Generic(Resource),
        }

        impl AnyResource {
            /// Returns the underlying untyped resource.
            #[must_use]
            pub fn as_resource(&self) -> &Resource {
                match self {
                    $(Self::$variant(r) => r.resource(),)+
                    Self::Generic(r) => r,
                }
            }

            /// Returns the type name (e.g., "Node").
            #[must_use]
            pub const fn name(&self) -> &'static str {
                match self {
                    $(Self::$variant(_) => $variant::NAME,)+
                    Self::Generic(_) => Resource::NAME,
                }
            }
        }

        $(
            impl From<$variant> for AnyResource {
                fn from(value: $variant) -> Self {
                    Self::$variant(value)
                }
            }

            impl TryFrom<AnyResource> for $variant {
                type Error = AnyResource;

                fn try_from(value: AnyResource) -> Result<Self, Self::Error> {
                    match value {
                        AnyResource::$variant(r) => Ok(r),
                        other => Err(other),
                    }
                }
            }
        )+

        fn build_registry() -> HashMap<&'static str, Factory> {
            let mut registry = HashMap::new();
            $(register::<$variant>(&mut registry);)+
            registry
        }
    };
}

any_resource!(User, Node, Feed, Subscription, Event, Device, Application, Person, Page);

impl From<Resource> for AnyResource {
    fn from(value: Resource) -> Self {
        Self::Generic(value)
    }
}

impl AnyResource {
    /// Returns the uid, if set.
    #[must_use]
    pub fn uid(&self) -> Option<&str> {
        self.as_resource().uid()
    }

    /// Returns a field value.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&crate::rest::FieldValue> {
        self.as_resource().get(field)
    }

    /// Converts back to a JSON object.
    #[must_use]
    pub fn to_json(&self) -> Value {
        self.as_resource().to_json()
    }
}

impl Serialize for AnyResource {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.as_resource().serialize(serializer)
    }
}

impl fmt::Display for AnyResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.as_resource().fmt_as(self.name(), f)
    }
}

fn register<T>(registry: &mut HashMap<&'static str, Factory>)
where
    T: ApiResource + Into<AnyResource>,
{
    if let Some(tag) = T::OBJECT {
        registry.insert(tag, factory::<T>);
    }
}

fn factory<T>(values: &Map<String, Value>) -> Result<AnyResource, ResourceError>
where
    T: ApiResource + Into<AnyResource>,
{
    T::hydrate(values).map(Into::into)
}

/// Returns the process-wide registry, built on first use.
pub fn registry() -> &'static HashMap<&'static str, Factory> {
    static REGISTRY: OnceLock<HashMap<&'static str, Factory>> = OnceLock::new();
    REGISTRY.get_or_init(build_registry)
}

/// Looks up the factory for a discriminator tag.
#[must_use]
pub fn lookup(tag: &str) -> Option<Factory> {
    registry().get(tag).copied()
}

/// Hydrates a JSON object into the type named by its `object` field.
///
/// # Errors
///
/// Returns [`ResourceError::Parse`] if a date field cannot be parsed.
///
/// # Example
///
/// ```rust
/// use sense_api::rest::{hydrate_any, AnyResource};
/// use serde_json::json;
///
/// let value = json!({"object": "node", "uid": "x"});
/// let node = hydrate_any(value.as_object().unwrap()).unwrap();
/// assert!(matches!(node, AnyResource::Node(_)));
///
/// let value = json!({"object": "gizmo", "uid": "y"});
/// let other = hydrate_any(value.as_object().unwrap()).unwrap();
/// assert!(matches!(other, AnyResource::Generic(_)));
/// ```
pub fn hydrate_any(values: &Map<String, Value>) -> Result<AnyResource, ResourceError> {
    let tag = values.get("object").and_then(Value::as_str);
    if let Some(factory) = tag.and_then(lookup) {
        return factory(values);
    }
    tracing::trace!(tag = ?tag, "no registered resource type, hydrating untyped resource");
    Resource::hydrate(values).map(AnyResource::Generic)
}
