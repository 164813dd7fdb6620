//! Integration tests for page navigation and lazy iteration.
//!
//! These tests drive the resource layer through an in-memory transport so
//! that the exact number of requests can be asserted.

mod common;

use common::{nodes_page, params, RecordingTransport};
use sense_api::rest::resources::{Feed, Node};
use sense_api::rest::{AnyResource, ApiResource, Listable, Page};
use sense_api::HttpMethod;
use serde_json::json;

const PAGE_2: &str = "https://sen.se/api/v2/nodes/?page=2";

// ============================================================================
// Page navigation
// ============================================================================

#[tokio::test]
async fn test_list_hydrates_a_page() {
    let transport = RecordingTransport::new().respond(200, nodes_page("n", 5, Some(PAGE_2), None));

    let page = Node::list(&transport, None).await.unwrap();

    assert_eq!(page.total_objects(), 9);
    assert_eq!(page.objects().count(), 5);
    assert!(page.objects().all(|o| matches!(o, AnyResource::Node(_))));
    assert!(page.is_first());
    assert!(!page.is_last());

    let requests = transport.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].http_method, HttpMethod::Get);
    assert_eq!(requests[0].path, "/nodes/");
    assert!(requests[0].query.is_none());
}

#[tokio::test]
async fn test_next_on_last_page_makes_no_request() {
    let transport = RecordingTransport::new().respond(200, nodes_page("n", 4, None, Some(PAGE_2)));
    let page = Node::list(&transport, None).await.unwrap();
    assert_eq!(transport.request_count(), 1);

    let next = page.next(&transport).await.unwrap();

    assert!(next.is_none());
    assert_eq!(transport.request_count(), 1);
}

#[tokio::test]
async fn test_prev_on_first_page_makes_no_request() {
    let transport = RecordingTransport::new().respond(200, nodes_page("n", 5, Some(PAGE_2), None));
    let page = Node::list(&transport, None).await.unwrap();

    assert!(page.prev(&transport).await.unwrap().is_none());
    assert_eq!(transport.request_count(), 1);
}

#[tokio::test]
async fn test_next_follows_absolute_link() {
    let transport = RecordingTransport::new()
        .respond(200, nodes_page("a", 5, Some(PAGE_2), None))
        .respond(
            200,
            nodes_page("b", 4, None, Some("https://sen.se/api/v2/nodes/?page=1")),
        );

    let first = Node::list(&transport, None).await.unwrap();
    let second = first.next(&transport).await.unwrap().unwrap();

    assert!(second.is_last());
    assert_eq!(
        second.prev_link(),
        Some("https://sen.se/api/v2/nodes/?page=1")
    );
    let uids: Vec<&str> = second.objects().filter_map(AnyResource::uid).collect();
    assert_eq!(uids, vec!["b0", "b1", "b2", "b3"]);

    let requests = transport.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[1].path, PAGE_2);
    assert!(requests[1].query.is_none());
}

// ============================================================================
// Lazy iteration
// ============================================================================

#[tokio::test]
async fn test_all_yields_every_item_in_order_with_one_fetch_per_page() {
    let transport = RecordingTransport::new()
        .respond(200, nodes_page("a", 5, Some(PAGE_2), None))
        .respond(200, nodes_page("b", 4, None, Some(PAGE_2)));

    let items = Node::all(&transport, None)
        .unwrap()
        .collect_all()
        .await
        .unwrap();

    let uids: Vec<&str> = items.iter().filter_map(AnyResource::uid).collect();
    assert_eq!(
        uids,
        vec!["a0", "a1", "a2", "a3", "a4", "b0", "b1", "b2", "b3"]
    );
    assert_eq!(transport.request_count(), 2);
}

#[tokio::test]
async fn test_all_is_lazy() {
    let transport = RecordingTransport::new()
        .respond(200, nodes_page("a", 5, Some(PAGE_2), None))
        .respond(200, nodes_page("b", 4, None, None));

    let mut nodes = Node::all(&transport, None).unwrap();
    assert_eq!(transport.request_count(), 0);

    for _ in 0..5 {
        assert!(nodes.try_next().await.unwrap().is_some());
    }
    assert_eq!(transport.request_count(), 1);

    assert!(nodes.try_next().await.unwrap().is_some());
    assert_eq!(transport.request_count(), 2);
}

#[tokio::test]
async fn test_all_stops_after_last_page() {
    let transport = RecordingTransport::new().respond(200, nodes_page("a", 2, None, None));

    let mut nodes = Node::all(&transport, None).unwrap();
    assert!(nodes.try_next().await.unwrap().is_some());
    assert!(nodes.try_next().await.unwrap().is_some());
    assert!(nodes.try_next().await.unwrap().is_none());
    assert!(nodes.try_next().await.unwrap().is_none());
    assert_eq!(transport.request_count(), 1);
}

#[tokio::test]
async fn test_all_skips_empty_pages_with_next_link() {
    let transport = RecordingTransport::new()
        .respond(200, nodes_page("a", 0, Some(PAGE_2), None))
        .respond(200, nodes_page("b", 1, None, None));

    let items = Node::all(&transport, None)
        .unwrap()
        .collect_all()
        .await
        .unwrap();

    assert_eq!(items.len(), 1);
    assert_eq!(transport.request_count(), 2);
}

#[tokio::test]
async fn test_all_surfaces_page_errors() {
    let transport = RecordingTransport::new()
        .respond(200, nodes_page("a", 1, Some(PAGE_2), None))
        .respond(503, json!({"detail": "unavailable"}));

    let mut nodes = Node::all(&transport, None).unwrap();
    assert!(nodes.try_next().await.unwrap().is_some());

    let error = nodes.try_next().await.unwrap_err();
    assert_eq!(error.status(), Some(503));
}

#[tokio::test]
async fn test_into_items_starts_from_fetched_page() {
    let transport = RecordingTransport::new()
        .respond(200, nodes_page("a", 5, Some(PAGE_2), None))
        .respond(200, nodes_page("b", 4, None, None));

    let page: Page = Node::list(&transport, None).await.unwrap();
    let items = page.into_items(&transport).collect_all().await.unwrap();

    assert_eq!(items.len(), 9);
    assert_eq!(transport.request_count(), 2);
}

// ============================================================================
// Parameters and nested collections
// ============================================================================

#[tokio::test]
async fn test_list_rewrites_expand_parameter() {
    let transport = RecordingTransport::new().respond(200, nodes_page("a", 0, None, None));

    Node::list(
        &transport,
        Some(params(json!({"expand": ["feeds", "owner"], "limit": 5}))),
    )
    .await
    .unwrap();

    let query = transport.requests()[0].query.clone().unwrap();
    assert_eq!(
        query,
        vec![
            ("expand[]".to_string(), "feeds".to_string()),
            ("expand[]".to_string(), "owner".to_string()),
            ("limit".to_string(), "5".to_string()),
        ]
    );
}

#[tokio::test]
async fn test_nested_feeds_list_uses_scoped_collection() {
    let transport = RecordingTransport::new().respond(
        200,
        json!({
            "object": "list",
            "links": {"next": null, "prev": null},
            "totalObjects": 1,
            "objects": [{"object": "feed", "uid": "f1", "type": "motion"}]
        }),
    );

    let page = Node::new("n1")
        .feeds()
        .unwrap()
        .list(&transport, None)
        .await
        .unwrap();

    assert_eq!(transport.requests()[0].path, "/nodes/n1/feeds/");
    let feed = Feed::try_from(page.into_objects().remove(0)).unwrap();
    assert_eq!(feed.feed_type(), Some("motion"));
}
