//! Node resource implementation.
//!
//! A node is a physical or virtual object publishing and subscribing to
//! feeds. Its feeds are addressed through [`Node::feeds`].

use crate::rest::resources::{field_json, uid_list, Feed};
use crate::rest::{ApiResource, Listable, Nested, Params, Readable, ResourceError};

resource_type!(
    /// A node of the current user.
    Node, "node"
);

impl Readable for Node {}
impl Listable for Node {}

impl Node {
    /// Returns the feeds collection of this node.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Configuration`] if the node has no uid.
    ///
    /// # Example
    ///
    /// ```rust
    /// use sense_api::rest::ApiResource;
    /// use sense_api::rest::resources::Node;
    ///
    /// let feeds = Node::new("n1").feeds().unwrap();
    /// assert_eq!(feeds.collection_url().unwrap(), "/nodes/n1/feeds/");
    /// ```
    pub fn feeds(&self) -> Result<Nested<Feed>, ResourceError> {
        Nested::of(self)
    }

    /// Returns the update shape: `label`, and `subscribes`/`publishes` as uid lists.
    #[must_use]
    pub fn serialize(&self) -> Params {
        let mut params = Params::new();
        params.insert("label".to_string(), field_json(self.get("label")));
        params.insert("subscribes".to_string(), uid_list(self.get("subscribes")));
        params.insert("publishes".to_string(), uid_list(self.get("publishes")));
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    #[test]
    fn test_node_urls() {
        assert_eq!(Node::class_url().unwrap(), "/nodes/");
        assert_eq!(Node::new("n1").instance_url().unwrap(), "/nodes/n1/");
        assert_eq!(
            Node::new("a b/c").instance_url().unwrap(),
            "/nodes/a%20b%2Fc/"
        );
    }

    #[test]
    fn test_node_without_uid_cannot_be_addressed() {
        assert!(matches!(
            Node::empty().instance_url(),
            Err(ResourceError::Configuration { resource: "Node", .. })
        ));
        assert!(Node::empty().feeds().is_err());
    }

    #[test]
    fn test_serialize_keeps_only_uids() {
        let values = json!({
            "object": "node",
            "uid": "n1",
            "label": "Kitchen",
            "subscribes": [{"object": "feed", "uid": "f1"}, "f2"],
            "publishes": [{"object": "feed", "uid": "f3"}],
            "createdAt": "2015-03-11T09:45:12Z"
        });
        let node = Node::hydrate(values.as_object().unwrap()).unwrap();

        assert_eq!(
            Value::Object(node.serialize()),
            json!({"label": "Kitchen", "subscribes": ["f1", "f2"], "publishes": ["f3"]})
        );
    }
}
