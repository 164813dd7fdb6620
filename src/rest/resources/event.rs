//! Event resource implementation.

use crate::rest::{ApiResource, FieldValue};

resource_type!(
    /// An event of a feed.
    ///
    /// Events have no top-level endpoint; they are listed and created through
    /// [`Feed::events`](crate::rest::resources::Feed::events).
    Event, "event"
);

impl Event {
    /// Returns the event payload.
    #[must_use]
    pub fn data(&self) -> Option<&FieldValue> {
        self.get("data")
    }
}
