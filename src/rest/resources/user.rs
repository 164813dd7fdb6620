//! User resource implementation.
//!
//! The user is a singleton: there is exactly one per credential, always at
//! `/user/`. Any uid passed to `retrieve` is ignored.
//!
//! # Example
//!
//! ```rust,ignore
//! use sense_api::rest::Readable;
//! use sense_api::rest::resources::User;
//! use serde_json::json;
//!
//! let token = User::api_key(&client, "username", "password").await?;
//!
//! let params = json!({"expand": ["devices"]}).as_object().cloned();
//! let user = User::retrieve(&client, None, params).await?;
//! ```

use std::fmt;

use serde::{Serialize, Serializer};
use serde_json::{json, Value};

use crate::clients::{DataType, HttpMethod, HttpRequest, Transport};
use crate::rest::capabilities::{into_object, send};
use crate::rest::{ApiResource, Params, Readable, Resource, ResourceError};

/// The user owning the current credentials.
#[derive(Clone, Debug, PartialEq)]
pub struct User {
    resource: Resource,
}

impl ApiResource for User {
    const NAME: &'static str = "User";
    const OBJECT: Option<&'static str> = Some("user");

    fn from_resource(resource: Resource) -> Self {
        Self { resource }
    }

    fn resource(&self) -> &Resource {
        &self.resource
    }

    fn resource_mut(&mut self) -> &mut Resource {
        &mut self.resource
    }

    fn class_url() -> Result<String, ResourceError> {
        Ok(format!("/{}/", Self::class_name()?))
    }

    fn collection_url(&self) -> Result<String, ResourceError> {
        Self::class_url()
    }

    fn instance_url_for(&self, _uid: Option<&str>) -> Result<String, ResourceError> {
        Self::class_url()
    }
}

impl Serialize for User {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.resource.serialize(serializer)
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.resource.fmt_as(Self::NAME, f)
    }
}

impl Readable for User {
    async fn retrieve<C: Transport>(
        client: &C,
        _uid: Option<&str>,
        params: Option<Params>,
    ) -> Result<Self, ResourceError> {
        let mut user = Self::empty();
        user.refresh(client, params).await?;
        Ok(user)
    }
}

impl User {
    /// Exchanges account credentials for an API key.
    ///
    /// The request goes through `client`, so any `Authorization` header it is
    /// configured with is sent as well. Pass a client built without an API key
    /// to post the credentials alone.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] on a non-2xx response,
    /// [`ResourceError::UnexpectedBody`] if the response has no `token`.
    pub async fn api_key<C: Transport>(
        client: &C,
        username: &str,
        password: &str,
    ) -> Result<String, ResourceError> {
        let request = HttpRequest::builder(HttpMethod::Post, format!("{}api_key/", Self::class_url()?))
            .body(json!({"username": username, "password": password}))
            .body_type(DataType::Form)
            .build()?;
        let response = send(client, request).await?;
        let body = into_object(response.body, Self::NAME)?;

        match body.get("token") {
            Some(Value::String(token)) => Ok(token.clone()),
            _ => Err(ResourceError::UnexpectedBody {
                resource: Self::NAME,
                reason: "no token in api_key response".to_string(),
            }),
        }
    }
}
