//! Authentication for Sen.se API requests.
//!
//! Every request carries an `Authorization` header built from the configured
//! credentials. Two schemes are supported and chosen automatically:
//!
//! - **Token**: `Token <api_key>`, used when only an API key is configured.
//! - **HMAC**: `Token <api_key>:<signature>`, used when a shared secret is
//!   configured. The signature is `base64(HMAC-SHA256(secret, api_key))`.
//!
//! # Example
//!
//! ```rust
//! use sense_api::{ApiKey, SenseConfig};
//! use sense_api::auth::Credentials;
//!
//! let config = SenseConfig::builder()
//!     .api_key(ApiKey::new("my-token").unwrap())
//!     .build()
//!     .unwrap();
//!
//! let credentials = Credentials::from_config(&config).unwrap();
//! assert_eq!(credentials.authorization_header(), "Token my-token");
//! ```

pub mod hmac;

use std::fmt;

use crate::config::{ApiKey, ApiSecret, SenseConfig};

/// Credentials attached to outgoing requests.
#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    /// A static token sent as-is.
    Token(ApiKey),
    /// A token signed with a shared secret.
    Hmac {
        /// The API key being signed.
        key: ApiKey,
        /// The shared secret used as HMAC key.
        secret: ApiSecret,
    },
}

impl Credentials {
    /// Selects the credential scheme for a configuration.
    ///
    /// Returns `None` when no API key is configured.
    #[must_use]
    pub fn from_config(config: &SenseConfig) -> Option<Self> {
        let key = config.api_key()?.clone();
        Some(match config.api_secret() {
            Some(secret) => Self::Hmac {
                key,
                secret: secret.clone(),
            },
            None => Self::Token(key),
        })
    }

    /// Returns the value of the `Authorization` header.
    #[must_use]
    pub fn authorization_header(&self) -> String {
        match self {
            Self::Token(key) => format!("Token {}", key.as_ref()),
            Self::Hmac { key, secret } => {
                let signature = hmac::compute_signature(key.as_ref(), secret.as_ref());
                format!("Token {}:{signature}", key.as_ref())
            }
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Token(_) => f.write_str("Credentials::Token(*****)"),
            Self::Hmac { .. } => f.write_str("Credentials::Hmac(*****)"),
        }
    }
}
