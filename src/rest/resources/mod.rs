//! Concrete Sen.se API resources.
//!
//! | tag | type | capabilities |
//! |---|---|---|
//! | `user` | [`User`] | singleton [`Readable`](crate::rest::Readable), [`User::api_key`] |
//! | `node` | [`Node`] | `Readable`, `Listable`, [`Node::feeds`] |
//! | `feed` | [`Feed`] | `Readable`, `Listable`, [`Feed::events`] |
//! | `subscription` | [`Subscription`] | `Readable`, `Listable`, `Writable`, `Deletable` |
//! | `event` | [`Event`] | list and create through [`Feed::events`] |
//! | `device` | [`Device`] | `Readable`, `Listable` |
//! | `application` | [`Application`] | `Readable`, `Listable` |
//! | `person` | [`Person`] | `Readable`, `Listable` |
//!
//! # Example
//!
//! ```rust,ignore
//! use sense_api::rest::{Listable, Readable};
//! use sense_api::rest::resources::{Node, User};
//! use serde_json::json;
//!
//! let params = json!({"expand": ["devices"]}).as_object().cloned();
//! let user = User::retrieve(&client, None, params).await?;
//!
//! let node = Node::retrieve(&client, Some("node-uid"), None).await?;
//! let motion = node.feeds()?.retrieve(&client, "motion", None).await?;
//! let events = motion.events()?.list(&client, None).await?;
//! ```

use serde_json::Value;

use crate::rest::FieldValue;

/// Defines a resource type wrapping a [`Resource`](crate::rest::Resource).
macro_rules! resource_type {
    (
        $(#[$meta:meta])*
        $name:ident, $object:literal $(, secondary_key = $key:literal)?
    ) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq)]
        pub struct $name {
            resource: $crate::rest::Resource,
        }

        impl $crate::rest::ApiResource for $name {
            const NAME: &'static str = stringify!($name);
            const OBJECT: Option<&'static str> = Some($object);
            $(const SECONDARY_KEY: Option<&'static str> = Some($key);)?

            fn from_resource(resource: $crate::rest::Resource) -> Self {
                Self { resource }
            }

            fn resource(&self) -> &$crate::rest::Resource {
                &self.resource
            }

            fn resource_mut(&mut self) -> &mut $crate::rest::Resource {
                &mut self.resource
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serde::Serialize::serialize(&self.resource, serializer)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                self.resource
                    .fmt_as(<Self as $crate::rest::ApiResource>::NAME, f)
            }
        }
    };
}

mod application;
mod device;
mod event;
mod feed;
mod node;
mod person;
mod subscription;
mod user;

pub use application::Application;
pub use device::Device;
pub use event::Event;
pub use feed::Feed;
pub use node::Node;
pub use person::Person;
pub use subscription::Subscription;
pub use user::User;

/// Collects the uids a field refers to, as a JSON array of strings.
///
/// Nested resources contribute their uid and strings are taken as uids;
/// anything else is dropped. A missing field yields an empty array.
pub(crate) fn uid_list(value: Option<&FieldValue>) -> Value {
    let uids: Vec<Value> = match value {
        Some(FieldValue::List(items)) => items
            .iter()
            .filter_map(FieldValue::uid_ref)
            .map(|uid| Value::String(uid.to_string()))
            .collect(),
        Some(single) => single
            .uid_ref()
            .map(|uid| Value::String(uid.to_string()))
            .into_iter()
            .collect(),
        None => Vec::new(),
    };
    Value::Array(uids)
}

/// Returns a field as JSON, `null` when missing.
pub(crate) fn field_json(value: Option<&FieldValue>) -> Value {
    value.map_or(Value::Null, FieldValue::to_json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rest::coerce;
    use serde_json::json;

    #[test]
    fn test_uid_list_keeps_resources_and_strings() {
        let value = coerce(
            "subscribes",
            &json!([{"object": "feed", "uid": "f1"}, "f2", 3, {"object": "feed"}]),
        )
        .unwrap();
        assert_eq!(uid_list(Some(&value)), json!(["f1", "f2"]));
    }

    #[test]
    fn test_flat_collection_urls() {
        use crate::rest::ApiResource;

        assert_eq!(Device::class_url().unwrap(), "/devices/");
        assert_eq!(Application::class_url().unwrap(), "/applications/");
        assert_eq!(Person::class_url().unwrap(), "/persons/");
        assert_eq!(Event::class_url().unwrap(), "/events/");
        assert_eq!(Person::new("p1").instance_url().unwrap(), "/persons/p1/");
    }

    #[test]
    fn test_uid_list_of_missing_field_is_empty() {
        assert_eq!(uid_list(None), json!([]));
    }
}
