//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use rfs_core::config::AppConfig;
use rfs_database::MemoryItemStore;

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
}

impl TestApp {
    /// Create a new test application on a fresh in-memory store
    pub fn new() -> Self {
        let state = rfs_api::AppState::new(AppConfig::default(), Arc::new(MemoryItemStore::new()));
        Self {
            router: rfs_api::build_router(state),
        }
    }

    /// Make an HTTP request to the test app
    pub async fn request(&self, method: &str, path: &str, body: Option<Value>) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json")
            .body(Body::from(body_str))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }

    /// Id of the root folder
    pub async fn root_id(&self) -> i64 {
        let response = self.request("GET", "/api/folders/root", None).await;
        assert_eq!(response.status, StatusCode::OK);
        response.body["data"]["id"]
            .as_i64()
            .expect("No id in root response")
    }

    /// Create a folder and return its id
    pub async fn create_folder(&self, name: &str, parent_id: i64) -> i64 {
        let response = self
            .request(
                "POST",
                "/api/folders",
                Some(serde_json::json!({ "name": name, "parent_id": parent_id })),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
        response.body["data"]["id"]
            .as_i64()
            .expect("No id in create folder response")
    }

    /// Create a file and return its id
    pub async fn create_file(&self, name: &str, parent_id: i64) -> i64 {
        let response = self
            .request(
                "POST",
                "/api/files",
                Some(serde_json::json!({
                    "name": name,
                    "path": format!("/blobs/{name}"),
                    "parent_id": parent_id,
                })),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
        response.body["data"]["id"]
            .as_i64()
            .expect("No id in create file response")
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}
