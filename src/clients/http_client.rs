//! HTTP client for Sen.se API communication.
//!
//! This module provides the [`Transport`] trait, the capability the resource
//! layer calls into, and [`HttpClient`], its `reqwest`-backed implementation.

use std::collections::HashMap;

use crate::auth::Credentials;
use crate::clients::errors::HttpError;
use crate::clients::http_request::{DataType, HttpMethod, HttpRequest};
use crate::clients::http_response::HttpResponse;
use crate::config::{ApiUrl, SenseConfig};

/// Library version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Performs HTTP requests on behalf of resources.
///
/// Implementations return every response, whatever its status, as `Ok`;
/// only failures to obtain a response are errors. Mapping non-2xx statuses to
/// errors is left to the caller.
///
/// # Example
///
/// ```rust,ignore
/// struct Recorder { /* ... */ }
///
/// impl Transport for Recorder {
///     async fn request(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
///         self.seen.lock().unwrap().push(request);
///         Ok(self.responses.lock().unwrap().pop_front().unwrap())
///     }
/// }
/// ```
#[allow(async_fn_in_trait)]
pub trait Transport: Send + Sync {
    /// Sends a request and returns the parsed response.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the request is invalid or no response could
    /// be obtained.
    async fn request(&self, request: HttpRequest) -> Result<HttpResponse, HttpError>;
}

/// HTTP client for making requests to the Sen.se API.
///
/// The client handles:
/// - URL construction from the configured API URL (absolute URLs pass through)
/// - Default headers including `User-Agent`, `Accept` and `Authorization`
/// - JSON and form body encoding
///
/// There is no retry logic: every failure surfaces to the caller.
///
/// # Thread Safety
///
/// `HttpClient` is `Send + Sync`, making it safe to share across async tasks.
///
/// # Example
///
/// ```rust,ignore
/// use sense_api::{ApiKey, HttpClient, SenseConfig};
///
/// let config = SenseConfig::builder()
///     .api_key(ApiKey::new("my-token").unwrap())
///     .build()
///     .unwrap();
/// let client = HttpClient::new(&config)?;
/// ```
#[derive(Debug)]
pub struct HttpClient {
    /// The internal reqwest HTTP client.
    client: reqwest::Client,
    /// API base URL (e.g., `https://sen.se/api/v2`).
    api_url: ApiUrl,
    /// Default headers to include in all requests.
    default_headers: HashMap<String, String>,
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl HttpClient {
    /// Creates a new HTTP client from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Network`] if the underlying reqwest client cannot
    /// be created (e.g., TLS initialization failure).
    pub fn new(config: &SenseConfig) -> Result<Self, HttpError> {
        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        let user_agent =
            format!("{user_agent_prefix}Sense API Library v{SDK_VERSION} | Rust {rust_version}");

        let mut default_headers = HashMap::new();
        default_headers.insert("User-Agent".to_string(), user_agent);
        default_headers.insert("Accept".to_string(), "application/json".to_string());

        if let Some(credentials) = Credentials::from_config(config) {
            default_headers.insert(
                "Authorization".to_string(),
                credentials.authorization_header(),
            );
        }

        let client = reqwest::Client::builder().use_rustls_tls().build()?;

        Ok(Self {
            client,
            api_url: config.api_url().clone(),
            default_headers,
        })
    }

    /// Returns the API base URL for this client.
    #[must_use]
    pub const fn api_url(&self) -> &ApiUrl {
        &self.api_url
    }

    /// Returns the default headers for this client.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Sends an HTTP request to the API.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if request validation fails (`InvalidRequest`)
    /// or a network error occurs (`Network`). Non-2xx responses are returned
    /// as `Ok`.
    pub async fn send(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        request.verify()?;

        let url = self.api_url.join(&request.path);

        let mut headers = self.default_headers.clone();
        if let Some(extra) = &request.extra_headers {
            for (key, value) in extra {
                headers.insert(key.clone(), value.clone());
            }
        }

        let mut req_builder = match request.http_method {
            HttpMethod::Get => self.client.get(&url),
            HttpMethod::Post => self.client.post(&url),
            HttpMethod::Put => self.client.put(&url),
            HttpMethod::Delete => self.client.delete(&url),
        };

        for (key, value) in &headers {
            req_builder = req_builder.header(key, value);
        }

        if let Some(query) = &request.query {
            req_builder = req_builder.query(query);
        }

        match (request.body_type, &request.body) {
            (Some(DataType::Form), Some(_)) => {
                req_builder = req_builder.form(&request.form_pairs());
            }
            (Some(DataType::Json), Some(body)) => {
                req_builder = req_builder
                    .header("Content-Type", DataType::Json.as_content_type())
                    .body(body.to_string());
            }
            _ => {}
        }

        tracing::debug!(method = %request.http_method, url = %url, "sending request");

        let res = req_builder.send().await?;

        let code = res.status().as_u16();
        let res_headers = Self::parse_response_headers(res.headers());
        let body_text = res.text().await?;

        tracing::debug!(status = code, url = %url, "received response");

        Ok(HttpResponse::new(
            code,
            res_headers,
            HttpResponse::parse_body(&body_text),
        ))
    }

    /// Parses response headers into a `HashMap`.
    fn parse_response_headers(
        headers: &reqwest::header::HeaderMap,
    ) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            let key = name.as_str().to_lowercase();
            let value = value.to_str().unwrap_or_default().to_string();
            result.entry(key).or_default().push(value);
        }
        result
    }
}

impl Transport for HttpClient {
    async fn request(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        self.send(request).await
    }
}
