//! Integration tests for folder operations.

mod helpers;

use axum::http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_health() {
    let app = helpers::TestApp::new();

    let response = app.request("GET", "/api/health", None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["status"], "ok");
    assert_eq!(response.body["data"]["store"], "memory");
}

#[tokio::test]
async fn test_root_content_starts_empty() {
    let app = helpers::TestApp::new();
    let root = app.root_id().await;

    let response = app.request("GET", "/api/folders", None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["success"], true);
    assert_eq!(response.body["data"]["current_folder"]["id"], root);
    assert_eq!(response.body["data"]["current_folder"]["name"], "Root folder");
    assert_eq!(response.body["data"]["folders"], json!([]));
    assert_eq!(response.body["data"]["files"], json!([]));
}

#[tokio::test]
async fn test_create_and_get_folder() {
    let app = helpers::TestApp::new();
    let root = app.root_id().await;
    let id = app.create_folder("Photos", root).await;

    let response = app.request("GET", &format!("/api/folders/{id}"), None).await;

    assert_eq!(response.status, StatusCode::OK);
    let current = &response.body["data"]["current_folder"];
    assert_eq!(current["name"], "Photos");
    assert_eq!(current["parent_id"], root);
}

#[tokio::test]
async fn test_create_folder_under_missing_parent() {
    let app = helpers::TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/folders",
            Some(json!({ "name": "orphan", "parent_id": 999 })),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_create_folder_with_empty_name() {
    let app = helpers::TestApp::new();
    let root = app.root_id().await;

    let response = app
        .request(
            "POST",
            "/api/folders",
            Some(json!({ "name": "", "parent_id": root })),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_get_folder_not_found() {
    let app = helpers::TestApp::new();

    let response = app.request("GET", "/api/folders/4242", None).await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["error"], "NOT_FOUND");
}

#[tokio::test]
async fn test_list_child_folders_and_files() {
    let app = helpers::TestApp::new();
    let root = app.root_id().await;
    let docs = app.create_folder("Docs", root).await;
    app.create_folder("Drafts", docs).await;
    app.create_file("notes.txt", docs).await;

    let folders = app
        .request("GET", &format!("/api/folders/{docs}/folders"), None)
        .await;
    assert_eq!(folders.status, StatusCode::OK);
    assert_eq!(folders.body["data"][0]["name"], "Drafts");

    let files = app
        .request("GET", &format!("/api/folders/{docs}/files"), None)
        .await;
    assert_eq!(files.status, StatusCode::OK);
    assert_eq!(files.body["data"][0]["name"], "notes.txt");

    let missing = app.request("GET", "/api/folders/777/files", None).await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_rename_folder() {
    let app = helpers::TestApp::new();
    let root = app.root_id().await;
    let id = app.create_folder("old", root).await;

    let response = app
        .request("PUT", &format!("/api/folders/{id}"), Some(json!({ "name": "new" })))
        .await;
    assert_eq!(response.status, StatusCode::NO_CONTENT);

    let response = app.request("GET", &format!("/api/folders/{id}"), None).await;
    assert_eq!(response.body["data"]["current_folder"]["name"], "new");
}

#[tokio::test]
async fn test_move_folder() {
    let app = helpers::TestApp::new();
    let root = app.root_id().await;
    let a = app.create_folder("a", root).await;
    let b = app.create_folder("b", root).await;

    let response = app
        .request(
            "PUT",
            &format!("/api/folders/{a}/move"),
            Some(json!({ "destination_id": b })),
        )
        .await;
    assert_eq!(response.status, StatusCode::NO_CONTENT);

    let response = app.request("GET", &format!("/api/folders/{a}"), None).await;
    assert_eq!(response.body["data"]["current_folder"]["parent_id"], b);
}

#[tokio::test]
async fn test_move_root_is_rejected() {
    let app = helpers::TestApp::new();
    let root = app.root_id().await;
    let a = app.create_folder("a", root).await;

    let response = app
        .request(
            "PUT",
            &format!("/api/folders/{root}/move"),
            Some(json!({ "destination_id": a })),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "ILLEGAL_OPERATION");
}

#[tokio::test]
async fn test_move_into_descendant_is_rejected() {
    let app = helpers::TestApp::new();
    let root = app.root_id().await;
    let a = app.create_folder("a", root).await;
    let b = app.create_folder("b", a).await;

    let response = app
        .request(
            "PUT",
            &format!("/api/folders/{a}/move"),
            Some(json!({ "destination_id": b })),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "ILLEGAL_OPERATION");
}

#[tokio::test]
async fn test_move_to_missing_destination() {
    let app = helpers::TestApp::new();
    let root = app.root_id().await;
    let a = app.create_folder("a", root).await;

    let response = app
        .request(
            "PUT",
            &format!("/api/folders/{a}/move"),
            Some(json!({ "destination_id": 31337 })),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_delete_folder_cascades() {
    let app = helpers::TestApp::new();
    let root = app.root_id().await;
    let photos = app.create_folder("Photos", root).await;
    let summer = app.create_folder("Summer", photos).await;
    let a_txt = app.create_file("a.txt", summer).await;

    let response = app
        .request("DELETE", &format!("/api/folders/{photos}"), None)
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["root"], photos);
    assert_eq!(response.body["data"]["files"], json!([a_txt]));

    for path in [
        format!("/api/folders/{photos}"),
        format!("/api/folders/{summer}"),
        format!("/api/files/{a_txt}"),
    ] {
        let response = app.request("GET", &path, None).await;
        assert_eq!(response.status, StatusCode::NOT_FOUND, "{path}");
    }
}

#[tokio::test]
async fn test_delete_root_is_rejected() {
    let app = helpers::TestApp::new();
    let root = app.root_id().await;

    let response = app
        .request("DELETE", &format!("/api/folders/{root}"), None)
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "ILLEGAL_OPERATION");
}

#[tokio::test]
async fn test_tree_and_breadcrumbs() {
    let app = helpers::TestApp::new();
    let root = app.root_id().await;
    let a = app.create_folder("a", root).await;
    let b = app.create_folder("b", a).await;
    app.create_file("f", b).await;

    let tree = app
        .request("GET", &format!("/api/folders/{root}/tree"), None)
        .await;
    assert_eq!(tree.status, StatusCode::OK);
    assert_eq!(tree.body["data"]["children"][0]["id"], a);
    assert_eq!(tree.body["data"]["children"][0]["children"][0]["file_count"], 1);

    let crumbs = app
        .request("GET", &format!("/api/folders/{b}/breadcrumbs"), None)
        .await;
    assert_eq!(crumbs.status, StatusCode::OK);
    let ids: Vec<i64> = crumbs.body["data"]
        .as_array()
        .expect("breadcrumbs array")
        .iter()
        .filter_map(|f| f["id"].as_i64())
        .collect();
    assert_eq!(ids, vec![root, a, b]);
}

#[tokio::test]
async fn test_non_numeric_id_is_rejected() {
    let app = helpers::TestApp::new();

    let response = app.request("GET", "/api/folders/abc", None).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}
