//! Capability traits: the operations a resource type declares.
//!
//! A concrete type implements the capabilities the API grants it:
//!
//! - [`Readable`]: `retrieve` by uid and in-place `refresh`
//! - [`Listable`]: `list` one page, lazily iterate `all` pages
//! - [`Writable`]: `create` from form fields and `save` its serialized shape
//! - [`Deletable`]: `delete` the instance
//!
//! Operations a type does not declare simply do not exist on it. Every
//! method takes the [`Transport`] to use and maps non-2xx responses to
//! [`ResourceError::Http`].

use serde_json::{Map, Value};

use crate::clients::{DataType, HttpMethod, HttpRequest, HttpResponse, Transport};
use crate::rest::page::{Page, PageIter};
use crate::rest::params::{to_query_pairs, Params};
use crate::rest::{ApiResource, ResourceError};

/// Sends a request and rejects non-2xx responses.
pub(crate) async fn send<C: Transport>(
    client: &C,
    request: HttpRequest,
) -> Result<HttpResponse, ResourceError> {
    let response = client.request(request).await?;
    ResourceError::check_status(response)
}

/// Issues a GET with optional parameters and returns the JSON object body.
pub(crate) async fn get_object<C: Transport>(
    client: &C,
    path: &str,
    params: Option<Params>,
    resource: &'static str,
) -> Result<Map<String, Value>, ResourceError> {
    let mut builder = HttpRequest::builder(HttpMethod::Get, path);
    if let Some(params) = params {
        let query = to_query_pairs(params);
        if !query.is_empty() {
            builder = builder.query(query);
        }
    }
    let response = send(client, builder.build()?).await?;
    into_object(response.body, resource)
}

/// Extracts the JSON object from a response body.
pub(crate) fn into_object(
    body: Value,
    resource: &'static str,
) -> Result<Map<String, Value>, ResourceError> {
    match body {
        Value::Object(map) => Ok(map),
        other => Err(ResourceError::UnexpectedBody {
            resource,
            reason: format!("expected a JSON object, got {other}"),
        }),
    }
}

/// A resource that can be fetched by uid.
///
/// # Example
///
/// ```rust,ignore
/// use sense_api::rest::Readable;
/// use sense_api::rest::resources::Node;
///
/// let node = Node::retrieve(&client, Some("node-uid"), None).await?;
/// println!("Found: {node}");
/// ```
#[allow(async_fn_in_trait)]
pub trait Readable: ApiResource {
    /// Fetches the instance addressed by `uid`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Configuration`] if no uid is given,
    /// [`ResourceError::Http`] on a non-2xx response.
    async fn retrieve<C: Transport>(
        client: &C,
        uid: Option<&str>,
        params: Option<Params>,
    ) -> Result<Self, ResourceError> {
        let mut instance = match uid {
            Some(uid) => Self::new(uid),
            None => Self::empty(),
        };
        instance.refresh(client, params).await?;
        Ok(instance)
    }

    /// Re-fetches this instance and overwrites its fields.
    ///
    /// The uid and parent scope are kept.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Configuration`] if the instance cannot be
    /// addressed, [`ResourceError::Http`] on a non-2xx response.
    async fn refresh<C: Transport>(
        &mut self,
        client: &C,
        params: Option<Params>,
    ) -> Result<(), ResourceError> {
        let url = self.instance_url()?;
        let body = get_object(client, &url, params, Self::NAME).await?;
        self.resource_mut().refresh_from(&body)
    }
}

/// A resource with a paginated collection.
///
/// # Example
///
/// ```rust,ignore
/// use sense_api::rest::Listable;
/// use sense_api::rest::resources::Node;
///
/// let first_page = Node::list(&client, None).await?;
/// let second_page = first_page.next(&client).await?;
///
/// let mut nodes = Node::all(&client, None)?;
/// while let Some(node) = nodes.try_next().await? {
///     println!("{node}");
/// }
/// ```
#[allow(async_fn_in_trait)]
pub trait Listable: ApiResource {
    /// Fetches the first page of the collection.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] on a non-2xx response.
    async fn list<C: Transport>(client: &C, params: Option<Params>) -> Result<Page, ResourceError> {
        Page::fetch(client, &Self::class_url()?, params).await
    }

    /// Returns a lazy iterator over every item of every page.
    ///
    /// No request is made until the first item is pulled.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::NotSupported`] for the untyped resource.
    fn all<C: Transport>(
        client: &C,
        params: Option<Params>,
    ) -> Result<PageIter<'_, C>, ResourceError> {
        Ok(PageIter::new(client, Self::class_url()?, params))
    }
}

/// A resource that can be created and updated.
///
/// # Example
///
/// ```rust,ignore
/// use sense_api::rest::{Readable, Writable};
/// use sense_api::rest::resources::Subscription;
///
/// let mut subscription = Subscription::retrieve(&client, Some("sub-uid"), None).await?;
/// subscription.set("gatewayUrl", "https://example.com/another_endpoint/")?;
/// if let Some(saved) = subscription.save(&client).await? {
///     println!("saved {saved}");
/// }
/// ```
#[allow(async_fn_in_trait)]
pub trait Writable: ApiResource {
    /// The shape sent by [`save`](Self::save).
    fn serialize(&self) -> Params;

    /// Creates a resource from form fields.
    ///
    /// Array values are sent as repeated keys.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] on a non-2xx response.
    async fn create<C: Transport>(client: &C, fields: Params) -> Result<Self, ResourceError> {
        let request = HttpRequest::builder(HttpMethod::Post, Self::class_url()?)
            .body(Value::Object(fields))
            .body_type(DataType::Form)
            .build()?;
        let response = send(client, request).await?;
        Self::hydrate(&into_object(response.body, Self::NAME)?)
    }

    /// Sends the serialized shape of this instance to its instance URL.
    ///
    /// Returns the updated instance on HTTP 200, `None` on any other 2xx
    /// status (e.g., 204 with no body).
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Configuration`] if the instance cannot be
    /// addressed, [`ResourceError::Http`] on a non-2xx response.
    async fn save<C: Transport>(&self, client: &C) -> Result<Option<Self>, ResourceError> {
        let request = HttpRequest::builder(HttpMethod::Put, self.instance_url()?)
            .body(Value::Object(self.serialize()))
            .body_type(DataType::Form)
            .build()?;
        let response = send(client, request).await?;
        if response.code != 200 {
            return Ok(None);
        }

        let mut saved = self.clone();
        saved
            .resource_mut()
            .refresh_from(&into_object(response.body, Self::NAME)?)?;
        Ok(Some(saved))
    }
}

/// A resource that can be deleted.
#[allow(async_fn_in_trait)]
pub trait Deletable: ApiResource {
    /// Deletes this instance. Any response body is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Configuration`] if the instance cannot be
    /// addressed, [`ResourceError::Http`] on a non-2xx response.
    async fn delete<C: Transport>(&self, client: &C) -> Result<(), ResourceError> {
        let request = HttpRequest::builder(HttpMethod::Delete, self.instance_url()?).build()?;
        send(client, request).await?;
        Ok(())
    }
}
