//! Test doubles and common utilities for API contract tests

#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use http_body_util::BodyExt;
use phonebook_api::{AppState, create_router};
use phonebook_core::{
    DirectoryStore, Entry, EntryId, Error, IdStrategy, MemoryDirectoryStore, NewEntry,
    Result, StoreConfig,
};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tower::ServiceExt;

/// A response reduced to what the tests look at
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl TestResponse {
    /// Parse the body as JSON
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).expect("body is JSON")
    }

    /// The body as text
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Router over a seeded store with sequential ids, plus a handle to the store
pub fn seeded_app() -> (Router, MemoryDirectoryStore) {
    let config = StoreConfig::default().with_id_strategy(IdStrategy::Sequential);
    let store = MemoryDirectoryStore::new(&config);
    (create_router(AppState::new(store.clone())), store)
}

/// Send one request through the router
pub async fn send(app: &Router, method: Method, uri: &str, body: Option<&str>) -> TestResponse {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let content_type = response
        .headers()
        .get("content-type")
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);
    let body = response.into_body().collect().await.unwrap().to_bytes().to_vec();

    TestResponse {
        status,
        content_type,
        body,
    }
}

/// Number of entries reported by GET /api/persons
pub async fn collection_size(app: &Router) -> usize {
    let response = send(app, Method::GET, "/api/persons", None).await;
    response.json().as_array().expect("array body").len()
}

/// A store whose every call fails with an uncategorized error
pub struct FailingStore {
    call_count: Arc<AtomicUsize>,
}

impl FailingStore {
    pub fn new() -> Self {
        Self {
            call_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Get the number of store calls made
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    /// Create a new FailingStore that shares counters with an existing one
    pub fn sharing_counters_with(other: &Self) -> Self {
        Self {
            call_count: Arc::clone(&other.call_count),
        }
    }

    fn fail<T>(&self) -> Result<T> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        Err(Error::Other("backend unavailable".to_string()))
    }
}

#[async_trait::async_trait]
impl DirectoryStore for FailingStore {
    async fn list_all(&self) -> Result<Vec<Entry>> {
        self.fail()
    }

    async fn find_by_id(&self, _id: EntryId) -> Result<Option<Entry>> {
        self.fail()
    }

    async fn create(&self, _new_entry: NewEntry) -> Result<Entry> {
        self.fail()
    }

    async fn replace(&self, _id: EntryId, _number: &str) -> Result<Entry> {
        self.fail()
    }

    async fn remove(&self, _id: EntryId) -> Result<bool> {
        self.fail()
    }

    async fn count(&self) -> Result<usize> {
        self.fail()
    }
}
