//! # Sen.se API Rust Client
//!
//! A Rust client for the Sen.se API, giving application code a typed,
//! object-like view over remote users, nodes, feeds, subscriptions and events.
//!
//! ## Overview
//!
//! This library provides:
//! - Type-safe configuration via [`SenseConfig`] and [`SenseConfigBuilder`]
//! - Token and HMAC-signed token authentication via [`auth::Credentials`]
//! - An async HTTP client behind the [`Transport`] trait
//! - Discriminator-driven hydration of JSON into typed resources via [`rest`]
//! - URL derivation for flat, nested and singleton resources
//! - Page navigation and lazy iteration over paginated collections
//!
//! ## Quick Start
//!
//! ```rust
//! use sense_api::{ApiKey, SenseConfig};
//!
//! let config = SenseConfig::builder()
//!     .api_key(ApiKey::new("your-api-key").unwrap())
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.api_url().as_ref(), "https://sen.se/api/v2");
//! ```
//!
//! ## Working with Resources
//!
//! ```rust,ignore
//! use sense_api::{ApiKey, HttpClient, SenseConfig};
//! use sense_api::rest::{Deletable, Listable, Readable, Writable};
//! use sense_api::rest::resources::{Feed, Node, Subscription, User};
//! use serde_json::json;
//!
//! let client = HttpClient::new(&config)?;
//!
//! // Singleton resource with eager-loaded relation
//! let params = json!({"expand": ["devices"]}).as_object().cloned();
//! let user = User::retrieve(&client, None, params).await?;
//!
//! // Create, update and delete a subscription
//! let fields = json!({
//!     "label": "my subscription",
//!     "gatewayUrl": "https://example.com/events/",
//!     "subscribes": ["feed-uid"]
//! });
//! let mut subscription = Subscription::create(&client, fields.as_object().unwrap().clone()).await?;
//! subscription.set("gatewayUrl", "https://example.com/another_endpoint/")?;
//! subscription.save(&client).await?;
//! subscription.delete(&client).await?;
//!
//! // Address a feed by node + type without fetching it first
//! let motion = Node::new("node-uid").feeds()?.with_key("motion")?;
//! let events = motion.events()?.list(&client, None).await?;
//!
//! // List with filters, then page or iterate
//! let filters = json!({"resource__type": "device"}).as_object().cloned();
//! let first_page = Node::list(&client, filters).await?;
//! let second_page = first_page.next(&client).await?;
//!
//! let mut nodes = Node::all(&client, None)?;
//! while let Some(node) = nodes.try_next().await? {
//!     println!("{node}");
//! }
//! ```
//!
//! ## Logging
//!
//! The client emits `tracing` events (requests and responses at `debug`,
//! page fetches and registry fallbacks at `trace`). Install a subscriber in
//! the application to see them.

pub mod auth;
pub mod clients;
pub mod config;
pub mod error;
pub mod rest;

// Re-export public types at crate root for convenience
pub use config::{ApiKey, ApiSecret, ApiUrl, SenseConfig, SenseConfigBuilder, DEFAULT_API_URL};
pub use error::ConfigError;

// Re-export HTTP client types
pub use clients::{
    DataType, HttpClient, HttpError, HttpMethod, HttpRequest, HttpRequestBuilder, HttpResponse,
    HttpResponseError, InvalidHttpRequestError, Transport,
};

// Re-export resource types
pub use rest::{AnyResource, ApiResource, Page, ResourceError};
