//! Shared fixtures for integration tests.
#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use sense_api::rest::Params;
use sense_api::{
    ApiKey, ApiUrl, HttpClient, HttpError, HttpRequest, HttpResponse, SenseConfig, Transport,
};
use serde_json::{json, Value};

pub const TEST_KEY: &str = "test-key";

/// Builds a client pointed at a mock server, authenticated with [`TEST_KEY`].
pub fn client_for(server_uri: &str) -> HttpClient {
    let config = SenseConfig::builder()
        .api_url(ApiUrl::new(format!("{server_uri}/api/v2")).unwrap())
        .api_key(ApiKey::new(TEST_KEY).unwrap())
        .build()
        .unwrap();
    HttpClient::new(&config).unwrap()
}

pub fn params(value: Value) -> Params {
    value.as_object().cloned().unwrap()
}

pub fn dummy_node(uid: &str) -> Value {
    json!({
        "object": "node",
        "url": format!("http://127.0.0.1:8200/api/v2/nodes/{uid}/"),
        "uid": uid,
        "createdAt": "2014-04-01T15:56:12",
        "updatedAt": "2014-07-12T12:16:12",
        "label": "node__dummy",
        "paused": false,
        "subscribes": [
            {
                "object": "feed",
                "uid": "OlkQpUi5x4rS8RyxNOpKYR9CrPrGuhWg",
                "label": "Profile",
                "type": "profile"
            }
        ],
        "publishes": [
            {
                "object": "feed",
                "uid": "AiX2oDNRjswKT9yxMAXNAgxcGBqeHX7P",
                "label": "Motion",
                "type": "motion"
            }
        ]
    })
}

pub fn dummy_user() -> Value {
    json!({
        "object": "user",
        "username": "user__dummy",
        "country": "FR",
        "createdAt": "2014-04-01T09:29:58",
        "updatedAt": "2014-04-01T09:29:58",
        "devices": [dummy_node("testuid")]
    })
}

pub fn dummy_subscription() -> Value {
    json!({
        "object": "subscription",
        "uid": "testuid",
        "createdAt": "2014-12-04T16:28:09",
        "updatedAt": "2014-12-04T16:28:09",
        "label": "subscription__dummy",
        "paused": false,
        "subscribes": [
            {
                "object": "feed",
                "uid": "eJXayFlDihokjC00D8NFXXeIQnjF4R5x",
                "label": "Presence",
                "type": "presence"
            }
        ],
        "publishes": [],
        "resource": {
            "object": "resource",
            "type": "subscription",
            "slug": "subscription"
        },
        "gatewayUrl": "https://yodel.eu"
    })
}

pub fn dummy_feed() -> Value {
    json!({
        "object": "feed",
        "uid": "testuid",
        "label": "Presence",
        "type": "presence"
    })
}

pub fn dummy_event() -> Value {
    json!({
        "profile": null,
        "dateServer": null,
        "signal": null,
        "dateEvent": "2014-04-16T12:39:11.542637",
        "data": {"message": "Mother was connected during 0:04:02.032074"},
        "payload": "Mother was connected during 0:04:02.032074",
        "nodeUid": "6gqyjjGi0WMYa12pzT7cPgQ3H6M9gKYr"
    })
}

/// A page of nodes with uids `{prefix}0..{prefix}{count}`.
pub fn nodes_page(prefix: &str, count: usize, next: Option<&str>, prev: Option<&str>) -> Value {
    let objects: Vec<Value> = (0..count)
        .map(|i| dummy_node(&format!("{prefix}{i}")))
        .collect();
    json!({
        "object": "list",
        "links": {"next": next, "prev": prev},
        "totalObjects": 9,
        "objects": objects
    })
}

/// An in-memory transport replaying queued responses and recording requests.
#[derive(Default)]
pub struct RecordingTransport {
    responses: Mutex<VecDeque<HttpResponse>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, code: u16, body: Value) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(HttpResponse::new(code, HashMap::new(), body));
        self
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl Transport for RecordingTransport {
    async fn request(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        self.requests.lock().unwrap().push(request);
        let response = self.responses.lock().unwrap().pop_front();
        Ok(response.unwrap_or_else(|| {
            HttpResponse::new(500, HashMap::new(), json!({"detail": "no response queued"}))
        }))
    }
}
