//! HTTP client types for Sen.se API communication.
//!
//! This module provides the transport layer the resource engine calls into.
//!
//! # Overview
//!
//! - [`Transport`]: The capability to perform a request and get a status + JSON body
//! - [`HttpClient`]: The `reqwest`-backed [`Transport`]
//! - [`HttpRequest`]: A request to be sent to the API
//! - [`HttpResponse`]: A parsed response from the API
//! - [`HttpMethod`]: Supported HTTP methods (GET, POST, PUT, DELETE)
//! - [`DataType`]: Content types for request bodies
//!
//! # Example
//!
//! ```rust,ignore
//! use sense_api::{SenseConfig, ApiKey};
//! use sense_api::clients::{HttpClient, HttpRequest, HttpMethod};
//!
//! let config = SenseConfig::builder()
//!     .api_key(ApiKey::new("my-token").unwrap())
//!     .build()
//!     .unwrap();
//! let client = HttpClient::new(&config)?;
//!
//! let request = HttpRequest::builder(HttpMethod::Get, "/nodes/")
//!     .build()
//!     .unwrap();
//!
//! let response = client.send(request).await?;
//! ```

mod errors;
mod http_client;
mod http_request;
mod http_response;

pub use errors::{HttpError, HttpResponseError, InvalidHttpRequestError};
pub use http_client::{HttpClient, Transport, SDK_VERSION};
pub use http_request::{flatten_object, DataType, HttpMethod, HttpRequest, HttpRequestBuilder};
pub use http_response::HttpResponse;
