//! HMAC-SHA256 token signing.
//!
//! When a shared secret is configured, the API key is not sent alone: it is
//! accompanied by a signature computed with the secret over the key value.
//!
//! # Example
//!
//! ```rust
//! use sense_api::auth::hmac::compute_signature;
//!
//! let signature = compute_signature("message", "key");
//! assert_eq!(signature, "bp7ym3X//Ft6uuUn1Y/a2y/kLnIZARl2kXNDBl9Y7Uo=");
//! ```

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Computes an HMAC-SHA256 signature of `message` keyed by `secret`.
///
/// The signature is returned base64-encoded (RFC 4648 standard alphabet).
#[must_use]
#[allow(clippy::missing_panics_doc)] // HMAC accepts any key size, so this never panics
pub fn compute_signature(message: &str, secret: &str) -> String {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC can take key of any size");
    mac.update(message.as_bytes());
    STANDARD.encode(mac.finalize().into_bytes())
}
