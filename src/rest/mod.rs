//! Resource modeling and hydration for the Sen.se API.
//!
//! This module provides:
//!
//! - **[`Resource`] and [`ApiResource`]**: Field storage, hydration and URL derivation
//! - **[`coerce`] and [`FieldValue`]**: Typed field values (timestamps, nested resources, lists)
//! - **[`AnyResource`] and [`hydrate_any`]**: Discriminator-driven dispatch through a registry
//! - **Capabilities**: [`Readable`], [`Listable`], [`Writable`], [`Deletable`]
//! - **[`Page`] and [`PageIter`]**: Pagination and lazy iteration across pages
//! - **[`Nested`]**: Collections scoped under a parent resource
//! - **[`ResourceError`]**: Error types for resource operations
//!
//! # Example
//!
//! ```rust,ignore
//! use sense_api::{ApiKey, HttpClient, SenseConfig};
//! use sense_api::rest::{Deletable, Listable, Readable, Writable};
//! use sense_api::rest::resources::{Node, Subscription};
//!
//! let config = SenseConfig::builder()
//!     .api_key(ApiKey::new("my-token").unwrap())
//!     .build()?;
//! let client = HttpClient::new(&config)?;
//!
//! // Retrieve a single node
//! let node = Node::retrieve(&client, Some("node-uid"), None).await?;
//!
//! // Address a feed by node + type without fetching it first
//! let motion = node.feeds()?.with_key("motion")?;
//! let events = motion.events()?.list(&client, None).await?;
//!
//! // Iterate over every subscription
//! let mut subscriptions = Subscription::all(&client, None)?;
//! while let Some(subscription) = subscriptions.try_next().await? {
//!     println!("{subscription}");
//! }
//! ```

mod capabilities;
mod errors;
mod nested;
mod page;
mod params;
mod registry;
mod resource;
mod value;

pub mod resources;

// Public exports
pub use capabilities::{Deletable, Listable, Readable, Writable};
pub use errors::ResourceError;
pub use nested::Nested;
pub use page::{Page, PageIter};
pub use params::{expand, to_query_pairs, Params};
pub use registry::{hydrate_any, lookup, registry, AnyResource, Factory};
pub use resource::{ApiResource, ParentScope, Resource};
pub use value::{coerce, parse_timestamp, FieldValue, DATE_FIELDS};
