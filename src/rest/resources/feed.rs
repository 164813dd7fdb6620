//! Feed resource implementation.
//!
//! A feed is a stream of events of one type published by a node. It can be
//! addressed flat by uid (`/feeds/{uid}/`) or under its node by type
//! (`/nodes/{node}/feeds/{type}/`); both designate the same feed.

use crate::rest::resources::Event;
use crate::rest::{ApiResource, FieldValue, Listable, Nested, Readable, ResourceError};

resource_type!(
    /// A feed of a node, addressed by uid or by `type` under its node.
    Feed, "feed", secondary_key = "type"
);

impl Readable for Feed {}
impl Listable for Feed {}

impl Feed {
    /// Returns the feed type (e.g., "motion"), if known.
    #[must_use]
    pub fn feed_type(&self) -> Option<&str> {
        self.get("type").and_then(FieldValue::as_str)
    }

    /// Returns the events collection of this feed.
    ///
    /// Events hang off the feed's own instance URL, whichever way the feed
    /// is addressed.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Configuration`] if the feed cannot be addressed.
    pub fn events(&self) -> Result<Nested<Event>, ResourceError> {
        Nested::of(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rest::resources::Node;

    #[test]
    fn test_flat_feed_url() {
        assert_eq!(Feed::class_url().unwrap(), "/feeds/");
        assert_eq!(Feed::new("abc").instance_url().unwrap(), "/feeds/abc/");
        assert_eq!(
            Feed::new("abc").instance_url_for(Some("xyz")).unwrap(),
            "/feeds/xyz/"
        );
    }

    #[test]
    fn test_feed_bound_to_node_by_type() {
        let feeds = Node::new("n1").feeds().unwrap();
        let motion = feeds.with_key("motion").unwrap();

        assert_eq!(motion.uid(), None);
        assert_eq!(motion.feed_type(), Some("motion"));
        assert_eq!(motion.collection_url().unwrap(), "/nodes/n1/feeds/");
        assert_eq!(motion.instance_url().unwrap(), "/nodes/n1/feeds/motion/");
    }

    #[test]
    fn test_feed_bound_to_node_by_uid_resolves_flat() {
        let feed = Node::new("node-uid").feeds().unwrap().with_uid("feed-uid");
        assert_eq!(feed.instance_url().unwrap(), "/feeds/feed-uid/");
    }

    #[test]
    fn test_bound_feed_with_uid_and_type_resolves_under_node() {
        let feed = Node::new("n1")
            .feeds()
            .unwrap()
            .bind(Some("feed-uid"), Some("motion"))
            .unwrap();
        assert_eq!(feed.uid(), Some("feed-uid"));
        assert_eq!(feed.instance_url().unwrap(), "/nodes/n1/feeds/motion/");
        assert_eq!(
            feed.instance_url_for(Some("feed-uid")).unwrap(),
            "/feeds/feed-uid/"
        );
    }

    #[test]
    fn test_bound_feed_without_uid_or_type_fails() {
        let feeds = Node::new("n1").feeds().unwrap();
        assert!(matches!(
            feeds.bind(None, None),
            Err(ResourceError::Configuration { resource: "Feed", .. })
        ));
    }

    #[test]
    fn test_empty_uid_or_type_is_not_an_address() {
        let feeds = Node::new("n1").feeds().unwrap();
        assert!(matches!(
            feeds.with_key(""),
            Err(ResourceError::Configuration { resource: "Feed", .. })
        ));
        assert!(matches!(
            feeds.bind(Some(""), Some("")),
            Err(ResourceError::Configuration { .. })
        ));
        assert!(matches!(
            feeds.with_uid("").instance_url(),
            Err(ResourceError::Configuration { .. })
        ));
        assert!(matches!(
            Node::new("").instance_url(),
            Err(ResourceError::Configuration { resource: "Node", .. })
        ));
        assert!(matches!(
            Node::new("").feeds(),
            Err(ResourceError::Configuration { .. })
        ));
        assert_eq!(
            Feed::new("abc").instance_url_for(Some("")).unwrap(),
            "/feeds/abc/"
        );
    }

    #[test]
    fn test_feed_type_without_parent_is_not_a_key() {
        let mut feed = Feed::empty();
        feed.set("type", "motion").unwrap();
        assert!(matches!(
            feed.instance_url(),
            Err(ResourceError::Configuration { .. })
        ));
    }

    #[test]
    fn test_events_rebase_on_feed_instance_url() {
        let flat = Feed::new("f1").events().unwrap();
        assert_eq!(flat.collection_url().unwrap(), "/feeds/f1/events/");

        let scoped = Node::new("n1")
            .feeds()
            .unwrap()
            .with_key("motion")
            .unwrap()
            .events()
            .unwrap();
        assert_eq!(
            scoped.collection_url().unwrap(),
            "/nodes/n1/feeds/motion/events/"
        );
    }

    #[test]
    fn test_events_of_unaddressable_feed_fail() {
        assert!(Feed::empty().events().is_err());
    }
}
