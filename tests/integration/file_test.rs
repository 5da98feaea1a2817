//! Integration tests for file operations.

mod helpers;

use axum::http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_create_and_get_file() {
    let app = helpers::TestApp::new();
    let root = app.root_id().await;
    let id = app.create_file("report.pdf", root).await;

    let response = app.request("GET", &format!("/api/files/{id}"), None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["name"], "report.pdf");
    assert_eq!(response.body["data"]["path"], "/blobs/report.pdf");
    assert_eq!(response.body["data"]["parent_id"], root);
}

#[tokio::test]
async fn test_get_file_not_found() {
    let app = helpers::TestApp::new();

    let response = app.request("GET", "/api/files/123", None).await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_file_under_missing_parent() {
    let app = helpers::TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/files",
            Some(json!({ "name": "a", "path": "/blobs/a", "parent_id": 555 })),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_file_with_malformed_body() {
    let app = helpers::TestApp::new();

    let response = app
        .request("POST", "/api/files", Some(json!({ "name": "a" })))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_rename_file() {
    let app = helpers::TestApp::new();
    let root = app.root_id().await;
    let id = app.create_file("draft", root).await;

    let response = app
        .request("PUT", &format!("/api/files/{id}"), Some(json!({ "name": "final" })))
        .await;
    assert_eq!(response.status, StatusCode::NO_CONTENT);

    let response = app.request("GET", &format!("/api/files/{id}"), None).await;
    assert_eq!(response.body["data"]["name"], "final");
    assert_eq!(response.body["data"]["path"], "/blobs/draft");

    let response = app
        .request("PUT", "/api/files/9999", Some(json!({ "name": "x" })))
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_move_file() {
    let app = helpers::TestApp::new();
    let root = app.root_id().await;
    let dest = app.create_folder("dest", root).await;
    let id = app.create_file("a", root).await;

    let response = app
        .request(
            "PUT",
            &format!("/api/files/{id}/move"),
            Some(json!({ "destination_id": dest })),
        )
        .await;
    assert_eq!(response.status, StatusCode::NO_CONTENT);

    let response = app.request("GET", &format!("/api/files/{id}"), None).await;
    assert_eq!(response.body["data"]["parent_id"], dest);
}

#[tokio::test]
async fn test_move_file_to_missing_folder() {
    let app = helpers::TestApp::new();
    let root = app.root_id().await;
    let id = app.create_file("a", root).await;

    let response = app
        .request(
            "PUT",
            &format!("/api/files/{id}/move"),
            Some(json!({ "destination_id": 8080 })),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let response = app.request("GET", &format!("/api/files/{id}"), None).await;
    assert_eq!(response.body["data"]["parent_id"], root);
}

#[tokio::test]
async fn test_delete_file() {
    let app = helpers::TestApp::new();
    let root = app.root_id().await;
    let id = app.create_file("a", root).await;

    let response = app.request("DELETE", &format!("/api/files/{id}"), None).await;
    assert_eq!(response.status, StatusCode::NO_CONTENT);

    let response = app.request("DELETE", &format!("/api/files/{id}"), None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}
