//! Configuration types for the Sen.se API client.
//!
//! # Overview
//!
//! - [`SenseConfig`]: The configuration consumed by the HTTP client
//! - [`SenseConfigBuilder`]: A builder for constructing [`SenseConfig`] instances
//! - [`ApiKey`]: A validated API key newtype
//! - [`ApiSecret`]: A validated shared secret with masked debug output
//! - [`ApiUrl`]: A validated API base URL
//!
//! # Example
//!
//! ```rust
//! use sense_api::{SenseConfig, ApiKey};
//!
//! let config = SenseConfig::builder()
//!     .api_key(ApiKey::new("my-api-key").unwrap())
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.api_url().as_ref(), "https://sen.se/api/v2");
//! ```

mod newtypes;

pub use newtypes::{ApiKey, ApiSecret, ApiUrl, DEFAULT_API_URL};

use crate::error::ConfigError;

/// Configuration for the Sen.se API client.
///
/// The configuration is read, never mutated, while requests are in flight.
/// Build a new one to change credentials or endpoint.
///
/// # Authentication
///
/// When only an [`ApiKey`] is configured, requests carry a static token.
/// When an [`ApiSecret`] is configured as well, the token is signed with
/// HMAC-SHA256 (see [`crate::auth::Credentials`]).
#[derive(Clone, Debug, Default)]
pub struct SenseConfig {
    api_url: ApiUrl,
    api_key: Option<ApiKey>,
    api_secret: Option<ApiSecret>,
    user_agent_prefix: Option<String>,
}

impl SenseConfig {
    /// Creates a new builder for constructing a `SenseConfig`.
    #[must_use]
    pub fn builder() -> SenseConfigBuilder {
        SenseConfigBuilder::new()
    }

    /// Returns the API base URL.
    #[must_use]
    pub const fn api_url(&self) -> &ApiUrl {
        &self.api_url
    }

    /// Returns the API key, if configured.
    #[must_use]
    pub const fn api_key(&self) -> Option<&ApiKey> {
        self.api_key.as_ref()
    }

    /// Returns the shared secret, if configured.
    #[must_use]
    pub const fn api_secret(&self) -> Option<&ApiSecret> {
        self.api_secret.as_ref()
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }
}

// Verify SenseConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<SenseConfig>();
};

/// Builder for constructing [`SenseConfig`] instances.
///
/// # Defaults
///
/// - `api_url`: `https://sen.se/api/v2`
/// - `api_key`: `None` (requests are sent unauthenticated)
/// - `api_secret`: `None`
/// - `user_agent_prefix`: `None`
///
/// # Example
///
/// ```rust
/// use sense_api::{SenseConfig, ApiKey, ApiSecret, ApiUrl};
///
/// let config = SenseConfig::builder()
///     .api_url(ApiUrl::new("http://127.0.0.1:8200/api/v2").unwrap())
///     .api_key(ApiKey::new("key").unwrap())
///     .api_secret(ApiSecret::new("secret").unwrap())
///     .user_agent_prefix("MyApp/1.0")
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Default)]
pub struct SenseConfigBuilder {
    api_url: Option<ApiUrl>,
    api_key: Option<ApiKey>,
    api_secret: Option<ApiSecret>,
    user_agent_prefix: Option<String>,
}

impl SenseConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the API base URL.
    #[must_use]
    pub fn api_url(mut self, url: ApiUrl) -> Self {
        self.api_url = Some(url);
        self
    }

    /// Sets the API key.
    #[must_use]
    pub fn api_key(mut self, key: ApiKey) -> Self {
        self.api_key = Some(key);
        self
    }

    /// Sets the shared secret used to sign the API key.
    #[must_use]
    pub fn api_secret(mut self, secret: ApiSecret) -> Self {
        self.api_secret = Some(secret);
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Builds the [`SenseConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyApiKey`] if a secret is configured without
    /// a key to sign.
    pub fn build(self) -> Result<SenseConfig, ConfigError> {
        if self.api_secret.is_some() && self.api_key.is_none() {
            return Err(ConfigError::EmptyApiKey);
        }

        Ok(SenseConfig {
            api_url: self.api_url.unwrap_or_default(),
            api_key: self.api_key,
            api_secret: self.api_secret,
            user_agent_prefix: self.user_agent_prefix,
        })
    }
}
