//! Error types for the Sen.se API client.
//!
//! This module contains error types used for configuration and validation
//! errors. Errors raised while talking to the API live in
//! [`clients::HttpError`](crate::clients::HttpError) and
//! [`rest::ResourceError`](crate::rest::ResourceError).
//!
//! # Example
//!
//! ```rust
//! use sense_api::{ApiKey, ConfigError};
//!
//! let result = ApiKey::new("");
//! assert!(matches!(result, Err(ConfigError::EmptyApiKey)));
//! ```

use thiserror::Error;

/// Errors that can occur while building client configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// API key cannot be empty.
    #[error("API key cannot be empty. Please provide a valid Sen.se API key.")]
    EmptyApiKey,

    /// API secret cannot be empty.
    #[error("API secret cannot be empty. Omit the secret to use plain token authentication.")]
    EmptyApiSecret,

    /// API URL is invalid.
    #[error("Invalid API URL '{url}'. Please provide a URL with scheme (e.g., 'https://sen.se/api/v2').")]
    InvalidApiUrl {
        /// The invalid URL that was provided.
        url: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_api_key_error_message() {
        let message = ConfigError::EmptyApiKey.to_string();
        assert!(message.contains("API key cannot be empty"));
    }

    #[test]
    fn test_invalid_api_url_error_message() {
        let error = ConfigError::InvalidApiUrl {
            url: "sen.se".to_string(),
        };
        let message = error.to_string();
        assert!(message.contains("'sen.se'"));
        assert!(message.contains("scheme"));
    }

    #[test]
    fn test_error_implements_std_error() {
        let error = ConfigError::EmptyApiSecret;
        let _: &dyn std::error::Error = &error;
    }
}
