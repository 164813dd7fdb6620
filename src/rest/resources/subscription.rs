//! Subscription resource implementation.
//!
//! A subscription forwards the events of the feeds it subscribes to to a
//! gateway URL. It is the only resource that can be created, updated and
//! deleted.
//!
//! # Example
//!
//! ```rust,ignore
//! use sense_api::rest::{Deletable, Readable, Writable};
//! use sense_api::rest::resources::Subscription;
//! use serde_json::json;
//!
//! let fields = json!({
//!     "label": "my subscription",
//!     "gatewayUrl": "https://example.com/events/",
//!     "subscribes": ["feed-uid"]
//! });
//! let subscription = Subscription::create(&client, fields.as_object().unwrap().clone()).await?;
//!
//! let mut subscription = Subscription::retrieve(&client, Some("sub-uid"), None).await?;
//! subscription.set("gatewayUrl", "https://example.com/another_endpoint/")?;
//! subscription.save(&client).await?;
//! subscription.delete(&client).await?;
//! ```

use crate::rest::resources::{field_json, uid_list};
use crate::rest::{ApiResource, Deletable, Listable, Params, Readable, Writable};

resource_type!(
    /// A subscription delivering feed events to a gateway URL.
    Subscription, "subscription"
);

impl Readable for Subscription {}
impl Listable for Subscription {}
impl Deletable for Subscription {}

impl Writable for Subscription {
    fn serialize(&self) -> Params {
        let mut params = Params::new();
        params.insert("label".to_string(), field_json(self.get("label")));
        params.insert("gatewayUrl".to_string(), field_json(self.get("gatewayUrl")));
        params.insert("subscribes".to_string(), uid_list(self.get("subscribes")));
        params
    }
}
