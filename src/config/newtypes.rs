//! Validated newtype wrappers for configuration values.
//!
//! This module provides type-safe wrappers around string values that validate
//! their contents on construction. Invalid values are rejected with clear error messages.

use crate::error::ConfigError;
use std::fmt;

/// The production API endpoint used when no URL is configured.
pub const DEFAULT_API_URL: &str = "https://sen.se/api/v2";

/// A validated Sen.se API key.
///
/// # Example
///
/// ```rust
/// use sense_api::ApiKey;
///
/// let key = ApiKey::new("my-api-key").unwrap();
/// assert_eq!(key.as_ref(), "my-api-key");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Creates a new validated API key.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyApiKey`] if the key is empty.
    pub fn new(key: impl Into<String>) -> Result<Self, ConfigError> {
        let key = key.into();
        if key.is_empty() {
            return Err(ConfigError::EmptyApiKey);
        }
        Ok(Self(key))
    }
}

impl AsRef<str> for ApiKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A validated shared secret used to derive HMAC tokens.
///
/// The `Debug` implementation masks the secret value, displaying only
/// `ApiSecret(*****)`.
///
/// # Example
///
/// ```rust
/// use sense_api::ApiSecret;
///
/// let secret = ApiSecret::new("my-secret").unwrap();
/// assert_eq!(format!("{:?}", secret), "ApiSecret(*****)");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct ApiSecret(String);

impl ApiSecret {
    /// Creates a new validated API secret.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyApiSecret`] if the secret is empty.
    pub fn new(secret: impl Into<String>) -> Result<Self, ConfigError> {
        let secret = secret.into();
        if secret.is_empty() {
            return Err(ConfigError::EmptyApiSecret);
        }
        Ok(Self(secret))
    }
}

impl AsRef<str> for ApiSecret {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiSecret(*****)")
    }
}

/// A validated base URL for the API.
///
/// The URL must carry an `http` or `https` scheme and a host. Trailing
/// slashes are removed so resource paths (which start with `/`) can be
/// appended directly.
///
/// # Example
///
/// ```rust
/// use sense_api::ApiUrl;
///
/// let url = ApiUrl::new("https://sen.se/api/v2/").unwrap();
/// assert_eq!(url.as_ref(), "https://sen.se/api/v2");
/// assert_eq!(url.join("/nodes/"), "https://sen.se/api/v2/nodes/");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiUrl(String);

impl ApiUrl {
    /// Creates a new validated API URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidApiUrl`] if the URL has no `http(s)`
    /// scheme or no host.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let url = url.into();
        let url = url.trim().trim_end_matches('/').to_string();

        let rest = url
            .strip_prefix("https://")
            .or_else(|| url.strip_prefix("http://"))
            .ok_or_else(|| ConfigError::InvalidApiUrl { url: url.clone() })?;

        let host = rest.split(['/', '?', '#']).next().unwrap_or_default();
        if host.is_empty() {
            return Err(ConfigError::InvalidApiUrl { url: url.clone() });
        }

        Ok(Self(url))
    }

    /// Joins a resource path onto this base URL.
    ///
    /// Absolute URLs (such as pagination links returned by the server) are
    /// returned unchanged.
    #[must_use]
    pub fn join(&self, path: &str) -> String {
        if is_absolute(path) {
            return path.to_string();
        }
        if path.starts_with('/') {
            format!("{}{path}", self.0)
        } else {
            format!("{}/{path}", self.0)
        }
    }
}

impl Default for ApiUrl {
    fn default() -> Self {
        Self(DEFAULT_API_URL.to_string())
    }
}

impl AsRef<str> for ApiUrl {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

fn is_absolute(path: &str) -> bool {
    path.starts_with("http://") || path.starts_with("https://")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_key_rejects_empty_string() {
        let result = ApiKey::new("");
        assert!(matches!(result, Err(ConfigError::EmptyApiKey)));
    }

    #[test]
    fn test_api_secret_rejects_empty_string() {
        let result = ApiSecret::new("");
        assert!(matches!(result, Err(ConfigError::EmptyApiSecret)));
    }

    #[test]
    fn test_api_secret_masks_value_in_debug() {
        let secret = ApiSecret::new("super-secret").unwrap();
        let debug_output = format!("{secret:?}");
        assert_eq!(debug_output, "ApiSecret(*****)");
        assert!(!debug_output.contains("super-secret"));
    }

    #[test]
    fn test_api_url_trims_trailing_slash() {
        let url = ApiUrl::new("http://127.0.0.1:8200/api/v2/").unwrap();
        assert_eq!(url.as_ref(), "http://127.0.0.1:8200/api/v2");
    }

    #[test]
    fn test_api_url_rejects_invalid() {
        for bad in ["", "sen.se/api/v2", "ftp://sen.se", "https://", "https:///api"] {
            assert!(
                matches!(ApiUrl::new(bad), Err(ConfigError::InvalidApiUrl { .. })),
                "expected {bad:?} to be rejected"
            );
        }
    }

    #[test]
    fn test_api_url_default_is_production() {
        assert_eq!(ApiUrl::default().as_ref(), DEFAULT_API_URL);
    }

    #[test]
    fn test_join_relative_and_absolute_paths() {
        let url = ApiUrl::new("https://sen.se/api/v2").unwrap();
        assert_eq!(url.join("/nodes/"), "https://sen.se/api/v2/nodes/");
        assert_eq!(url.join("user/"), "https://sen.se/api/v2/user/");
        assert_eq!(
            url.join("https://sen.se/api/v2/nodes/?page=2"),
            "https://sen.se/api/v2/nodes/?page=2"
        );
    }
}
