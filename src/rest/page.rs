//! Pages of list results and lazy iteration across them.
//!
//! A [`Page`] is the resource the API returns for every collection request
//! (`"object": "list"`): a batch of `objects`, the `totalObjects` count across
//! all pages and `links.next`/`links.prev` as absolute URLs or `null`.
//!
//! [`PageIter`] walks the items of consecutive pages, fetching one page at a
//! time and only when the previous one is exhausted.
//!
//! # Example
//!
//! ```rust,ignore
//! use sense_api::rest::Listable;
//! use sense_api::rest::resources::Node;
//!
//! // Page per page navigation
//! let first_page = Node::list(&client, None).await?;
//! if let Some(second_page) = first_page.next(&client).await? {
//!     println!("{} nodes in total", second_page.total_objects());
//! }
//!
//! // Navigation with an iterator
//! let mut nodes = Node::all(&client, None)?;
//! while let Some(node) = nodes.try_next().await? {
//!     assert!(node.uid().is_some());
//! }
//! ```

use std::fmt;

use crate::clients::Transport;
use crate::rest::capabilities::get_object;
use crate::rest::params::Params;
use crate::rest::registry::AnyResource;
use crate::rest::{ApiResource, FieldValue, Resource, ResourceError};

/// One page of a paginated collection.
#[derive(Clone, Debug, PartialEq)]
pub struct Page {
    resource: Resource,
}

impl ApiResource for Page {
    const NAME: &'static str = "Page";
    const OBJECT: Option<&'static str> = Some("list");

    fn from_resource(resource: Resource) -> Self {
        Self { resource }
    }

    fn resource(&self) -> &Resource {
        &self.resource
    }

    fn resource_mut(&mut self) -> &mut Resource {
        &mut self.resource
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<Page {} of {} objects>",
            self.objects().count(),
            self.total_objects()
        )
    }
}

impl Page {
    /// Fetches a page from a collection path or an absolute link.
    pub(crate) async fn fetch<C: Transport>(
        client: &C,
        path: &str,
        params: Option<Params>,
    ) -> Result<Self, ResourceError> {
        tracing::trace!(path, "fetching page");
        let body = get_object(client, path, params, Self::NAME).await?;
        Self::hydrate(&body)
    }

    /// Iterates over the resources on this page, in order.
    pub fn objects(&self) -> impl Iterator<Item = &AnyResource> {
        self.get("objects")
            .and_then(FieldValue::as_list)
            .unwrap_or_default()
            .iter()
            .filter_map(FieldValue::as_resource)
    }

    /// Consumes the page, returning its resources in order.
    #[must_use]
    pub fn into_objects(mut self) -> Vec<AnyResource> {
        match self.resource.remove("objects") {
            Some(FieldValue::List(items)) => items
                .into_iter()
                .filter_map(FieldValue::into_resource)
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Returns the server-reported total across all pages.
    #[must_use]
    pub fn total_objects(&self) -> u64 {
        self.get("totalObjects")
            .and_then(FieldValue::as_u64)
            .unwrap_or_default()
    }

    /// Returns the absolute URL of the next page.
    #[must_use]
    pub fn next_link(&self) -> Option<&str> {
        self.link("next")
    }

    /// Returns the absolute URL of the previous page.
    #[must_use]
    pub fn prev_link(&self) -> Option<&str> {
        self.link("prev")
    }

    /// Returns `true` when there is no previous page.
    #[must_use]
    pub fn is_first(&self) -> bool {
        self.prev_link().is_none()
    }

    /// Returns `true` when there is no next page.
    #[must_use]
    pub fn is_last(&self) -> bool {
        self.next_link().is_none()
    }

    fn link(&self, rel: &str) -> Option<&str> {
        self.get("links")?
            .as_resource()?
            .get(rel)
            .and_then(FieldValue::as_str)
    }

    /// Fetches the next page, or returns `None` without a request on the last page.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] on a non-2xx response.
    pub async fn next<C: Transport>(&self, client: &C) -> Result<Option<Self>, ResourceError> {
        match self.next_link() {
            Some(link) => Self::fetch(client, link, None).await.map(Some),
            None => Ok(None),
        }
    }

    /// Fetches the previous page, or returns `None` without a request on the first page.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] on a non-2xx response.
    pub async fn prev<C: Transport>(&self, client: &C) -> Result<Option<Self>, ResourceError> {
        match self.prev_link() {
            Some(link) => Self::fetch(client, link, None).await.map(Some),
            None => Ok(None),
        }
    }

    /// Iterates lazily over the items of this page and the pages after it.
    #[must_use]
    pub fn into_items<C: Transport>(self, client: &C) -> PageIter<'_, C> {
        let mut iter = PageIter {
            client,
            buffer: Vec::new().into_iter(),
            cursor: Cursor::Exhausted,
        };
        iter.load(self);
        iter
    }
}

/// Where the next page comes from.
#[derive(Debug)]
enum Cursor {
    Start {
        path: String,
        params: Option<Params>,
    },
    Link(String),
    Exhausted,
}

/// A single-pass, forward-only iterator over the items of consecutive pages.
///
/// Holds the items of one page; the next page is fetched only when they run
/// out. Stopping early is simply not calling [`try_next`](Self::try_next)
/// again. An error ends the iteration.
pub struct PageIter<'c, C> {
    client: &'c C,
    buffer: std::vec::IntoIter<AnyResource>,
    cursor: Cursor,
}

impl<C> fmt::Debug for PageIter<'_, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PageIter")
            .field("buffered", &self.buffer.len())
            .field("cursor", &self.cursor)
            .finish_non_exhaustive()
    }
}

impl<'c, C: Transport> PageIter<'c, C> {
    /// Creates an iterator starting at a collection path. No request is made.
    #[must_use]
    pub fn new(client: &'c C, path: impl Into<String>, params: Option<Params>) -> Self {
        Self {
            client,
            buffer: Vec::new().into_iter(),
            cursor: Cursor::Start {
                path: path.into(),
                params,
            },
        }
    }

    /// Returns the next item, fetching the next page when the current one is exhausted.
    ///
    /// Returns `Ok(None)` once the last page has been consumed.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] if a page fetch fails.
    pub async fn try_next(&mut self) -> Result<Option<AnyResource>, ResourceError> {
        loop {
            if let Some(item) = self.buffer.next() {
                return Ok(Some(item));
            }
            let page = match std::mem::replace(&mut self.cursor, Cursor::Exhausted) {
                Cursor::Start { path, params } => Page::fetch(self.client, &path, params).await?,
                Cursor::Link(link) => Page::fetch(self.client, &link, None).await?,
                Cursor::Exhausted => return Ok(None),
            };
            self.load(page);
        }
    }

    /// Drains the iterator into a vector, fetching every remaining page.
    ///
    /// # Errors
    ///
    /// Returns the first page fetch error.
    pub async fn collect_all(mut self) -> Result<Vec<AnyResource>, ResourceError> {
        let mut items = Vec::new();
        while let Some(item) = self.try_next().await? {
            items.push(item);
        }
        Ok(items)
    }
}

impl<C> PageIter<'_, C> {
    fn load(&mut self, page: Page) {
        self.cursor = page
            .next_link()
            .map_or(Cursor::Exhausted, |link| Cursor::Link(link.to_string()));
        self.buffer = page.into_objects().into_iter();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn page(value: &Value) -> Page {
        Page::hydrate(value.as_object().unwrap()).unwrap()
    }

    #[test]
    fn test_page_accessors() {
        let page = page(&json!({
            "object": "list",
            "totalObjects": 9,
            "links": {"next": "https://sen.se/api/v2/nodes/?page=2", "prev": null},
            "objects": [
                {"object": "node", "uid": "n1"},
                {"object": "node", "uid": "n2"}
            ]
        }));

        assert_eq!(page.total_objects(), 9);
        assert_eq!(page.next_link(), Some("https://sen.se/api/v2/nodes/?page=2"));
        assert_eq!(page.prev_link(), None);
        assert!(page.is_first());
        assert!(!page.is_last());

        let uids: Vec<&str> = page.objects().filter_map(AnyResource::uid).collect();
        assert_eq!(uids, vec!["n1", "n2"]);
        assert!(page.objects().all(|o| matches!(o, AnyResource::Node(_))));
    }

    #[test]
    fn test_page_without_links_is_first_and_last() {
        let page = page(&json!({"object": "list", "totalObjects": 0, "objects": []}));
        assert!(page.is_first());
        assert!(page.is_last());
        assert_eq!(page.objects().count(), 0);
        assert!(page.into_objects().is_empty());
    }

    #[test]
    fn test_into_objects_keeps_order() {
        let page = page(&json!({
            "object": "list",
            "objects": [{"uid": "a"}, {"uid": "b"}, {"uid": "c"}]
        }));
        let uids: Vec<String> = page
            .into_objects()
            .iter()
            .filter_map(|o| o.uid().map(str::to_string))
            .collect();
        assert_eq!(uids, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_display_summarises_page() {
        let page = page(&json!({"object": "list", "totalObjects": 9, "objects": [{"uid": "a"}]}));
        assert_eq!(page.to_string(), "<Page 1 of 9 objects>");
    }
}
