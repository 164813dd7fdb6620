//! Collections scoped under a parent resource.
//!
//! [`Nested<T>`] addresses the `T` collection of one parent instance, such as
//! the feeds of a node (`/nodes/{uid}/feeds/`) or the events of a feed
//! (`{feed instance URL}events/`). Instances it creates carry the parent
//! scope and derive their URLs from it.

use std::fmt;
use std::marker::PhantomData;

use serde_json::Value;

use crate::clients::{DataType, HttpMethod, HttpRequest, Transport};
use crate::rest::capabilities::{get_object, into_object, send};
use crate::rest::page::{Page, PageIter};
use crate::rest::params::Params;
use crate::rest::resources::Event;
use crate::rest::{ApiResource, ParentScope, Resource, ResourceError};

/// The `T` collection of one parent instance.
pub struct Nested<T> {
    parent: ParentScope,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Clone for Nested<T> {
    fn clone(&self) -> Self {
        Self {
            parent: self.parent.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T> fmt::Debug for Nested<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Nested")
            .field("parent", &self.parent)
            .finish()
    }
}

impl<T: ApiResource> Nested<T> {
    /// Creates a scope under the given parent.
    #[must_use]
    pub const fn new(parent: ParentScope) -> Self {
        Self {
            parent,
            _marker: PhantomData,
        }
    }

    /// Captures the scope of a parent instance.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Configuration`] if the parent cannot be addressed.
    pub fn of<P: ApiResource>(parent: &P) -> Result<Self, ResourceError> {
        ParentScope::of(parent).map(Self::new)
    }

    /// Returns the parent scope.
    #[must_use]
    pub const fn parent(&self) -> &ParentScope {
        &self.parent
    }

    /// Returns the scoped collection URL, `{parent}{tag}s/`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::NotSupported`] for the untyped resource.
    pub fn collection_url(&self) -> Result<String, ResourceError> {
        Ok(format!(
            "{}{}s/",
            self.parent.instance_url(),
            T::class_name()?
        ))
    }

    fn bound(&self, uid: Option<&str>) -> Resource {
        let resource = match uid {
            Some(uid) => Resource::with_uid(uid),
            None => Resource::new(),
        };
        resource.with_parent(self.parent.clone())
    }

    /// Creates a bound handle addressed by uid. No request is made.
    #[must_use]
    pub fn with_uid(&self, uid: &str) -> T {
        T::from_resource(self.bound(Some(uid)))
    }

    /// Creates a bound handle addressed by the secondary key (e.g., a feed
    /// `type`). No request is made.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::NotSupported`] if `T` has no secondary key.
    pub fn with_key(&self, key: &str) -> Result<T, ResourceError> {
        self.bind(None, Some(key))
    }

    /// Creates a bound handle from a uid, a secondary key, or both.
    ///
    /// The secondary key takes precedence for URL derivation.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Configuration`] if neither is given (empty
    /// strings count as missing),
    /// [`ResourceError::NotSupported`] for a key when `T` has no secondary key.
    pub fn bind(&self, uid: Option<&str>, key: Option<&str>) -> Result<T, ResourceError> {
        let uid = uid.filter(|uid| !uid.is_empty());
        let key = key.filter(|key| !key.is_empty());
        if uid.is_none() && key.is_none() {
            return Err(ResourceError::Configuration {
                resource: T::NAME,
                reason: "a bound instance needs a uid or a parent-scoped key".to_string(),
            });
        }

        let mut resource = self.bound(uid);
        if let Some(key) = key {
            let field = T::SECONDARY_KEY.ok_or(ResourceError::NotSupported {
                resource: T::NAME,
                operation: "with_key",
            })?;
            resource.set(field, key)?;
        }
        Ok(T::from_resource(resource))
    }

    /// Fetches the first page of the scoped collection.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] on a non-2xx response.
    pub async fn list<C: Transport>(
        &self,
        client: &C,
        params: Option<Params>,
    ) -> Result<Page, ResourceError> {
        Page::fetch(client, &self.collection_url()?, params).await
    }

    /// Returns a lazy iterator over every item of the scoped collection.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::NotSupported`] for the untyped resource.
    pub fn all<'c, C: Transport>(
        &self,
        client: &'c C,
        params: Option<Params>,
    ) -> Result<PageIter<'c, C>, ResourceError> {
        Ok(PageIter::new(client, self.collection_url()?, params))
    }

    /// Fetches one bound instance by its secondary key, or by uid when `T`
    /// has no secondary key.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] on a non-2xx response.
    pub async fn retrieve<C: Transport>(
        &self,
        client: &C,
        key: &str,
        params: Option<Params>,
    ) -> Result<T, ResourceError> {
        let mut instance = if T::SECONDARY_KEY.is_some() {
            self.with_key(key)?
        } else {
            self.with_uid(key)
        };
        let body = get_object(client, &instance.instance_url()?, params, T::NAME).await?;
        instance.resource_mut().refresh_from(&body)?;
        Ok(instance)
    }
}

impl Nested<Event> {
    /// Posts a new event as JSON and returns it hydrated.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] on a non-2xx response.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use serde_json::json;
    ///
    /// let feed = Feed::new("feed-uid");
    /// let data = json!({"data": {"key": "value"}, "dateEvent": "2015-03-11T09:45:12"});
    /// let event = feed.events()?.create(&client, data.as_object().unwrap().clone()).await?;
    /// ```
    pub async fn create<C: Transport>(
        &self,
        client: &C,
        data: Params,
    ) -> Result<Event, ResourceError> {
        let request = HttpRequest::builder(HttpMethod::Post, self.collection_url()?)
            .body(Value::Object(data))
            .body_type(DataType::Json)
            .build()?;
        let response = send(client, request).await?;
        let mut event = Event::from_resource(self.bound(None));
        event
            .resource_mut()
            .refresh_from(&into_object(response.body, Event::NAME)?)?;
        Ok(event)
    }
}
