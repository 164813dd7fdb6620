//! Error types for resource operations.
//!
//! Every capability method returns [`ResourceError`]. Transport failures and
//! non-2xx responses arrive as [`ResourceError::Http`], unchanged; the other
//! variants are raised locally before or after the request.
//!
//! # Example
//!
//! ```rust,ignore
//! use sense_api::rest::{ResourceError, Readable};
//! use sense_api::rest::resources::Node;
//!
//! match Node::retrieve(&client, Some("abc"), None).await {
//!     Ok(node) => println!("Found: {node}"),
//!     Err(ResourceError::Http(e)) if e.status() == Some(404) => println!("no such node"),
//!     Err(e) => println!("Other error: {e}"),
//! }
//! ```

use thiserror::Error;

use crate::clients::{HttpError, HttpResponse, InvalidHttpRequestError};

/// Error type for resource operations.
///
/// # Example
///
/// ```rust
/// use sense_api::rest::ResourceError;
///
/// let error = ResourceError::Configuration {
///     resource: "Feed",
///     reason: "no uid or parent-scoped type".to_string(),
/// };
/// assert!(error.to_string().contains("Feed"));
/// ```
#[derive(Debug, Error)]
pub enum ResourceError {
    /// The resource cannot be addressed, or an untyped resource was asked
    /// for an identity it does not have.
    #[error("Cannot address {resource}: {reason}")]
    Configuration {
        /// The type name of the resource (e.g., "Node").
        resource: &'static str,
        /// What is missing.
        reason: String,
    },

    /// A date field holds a value that is not a timestamp.
    #[error("Cannot parse field '{field}' value '{value}' as a timestamp")]
    Parse {
        /// The field name.
        field: String,
        /// The raw value.
        value: String,
        /// The underlying parser error.
        #[source]
        source: chrono::ParseError,
    },

    /// The transport failed or the API answered with a non-2xx status.
    #[error(transparent)]
    Http(#[from] HttpError),

    /// The resource type does not provide the operation.
    #[error("{resource} does not support {operation}")]
    NotSupported {
        /// The type name of the resource.
        resource: &'static str,
        /// The operation being attempted.
        operation: &'static str,
    },

    /// The response body does not have the expected shape.
    #[error("Unexpected response body for {resource}: {reason}")]
    UnexpectedBody {
        /// The type name of the resource.
        resource: &'static str,
        /// What was wrong with the body.
        reason: String,
    },
}

impl ResourceError {
    /// Returns the HTTP status code when the error came from a response.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Http(e) => e.status(),
            _ => None,
        }
    }

    /// Maps a non-2xx response to [`ResourceError::Http`], passing 2xx through.
    ///
    /// # Errors
    ///
    /// Returns the status code and body of a non-2xx response.
    pub fn check_status(response: HttpResponse) -> Result<HttpResponse, Self> {
        response
            .error_for_status()
            .map_err(|e| Self::Http(HttpError::Response(e)))
    }
}

impl From<InvalidHttpRequestError> for ResourceError {
    fn from(error: InvalidHttpRequestError) -> Self {
        Self::Http(HttpError::InvalidRequest(error))
    }
}
