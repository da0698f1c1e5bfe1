//! Integration tests for public links.

mod helpers;

use axum::http::StatusCode;
use serde_json::{Value, json};

use helpers::{PUBLIC_BASE_URL, TestApp, TestUser};

async fn issue(app: &TestApp, user: &TestUser, id: &str) -> Value {
    let response = app
        .request(
            "POST",
            &format!("/api/files/{id}/public-link"),
            None,
            Some(&user.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    response.body
}

#[tokio::test]
async fn test_issue_and_public_download() {
    let app = TestApp::new().await;
    let alice = app.user("alice");
    let file = app.upload(&alice, "photo.png", b"\x89PNG fake").await;
    let id = file["id"].as_str().unwrap();

    let link = issue(&app, &alice, id).await;
    let token = link["token"].as_str().unwrap();
    assert_eq!(
        link["url"].as_str().unwrap(),
        format!("{PUBLIC_BASE_URL}/d/{token}")
    );

    let response = app.request("GET", &format!("/d/{token}"), None, None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.bytes, b"\x89PNG fake");
    assert_eq!(response.header("content-type"), "image/png");

    let list = app
        .request("GET", "/api/files", None, Some(&alice.token))
        .await;
    let item = &list.body["items"][0];
    assert_eq!(item["has_public_link"], true);
    assert_eq!(item["public_token"], token);
    assert!(!item["last_downloaded_at"].is_null());
}

#[tokio::test]
async fn test_reissue_rotates_token() {
    let app = TestApp::new().await;
    let alice = app.user("alice");
    let file = app.upload(&alice, "notes.txt", b"hello").await;
    let id = file["id"].as_str().unwrap();

    let old = issue(&app, &alice, id).await["token"]
        .as_str()
        .unwrap()
        .to_string();
    let new = issue(&app, &alice, id).await["token"]
        .as_str()
        .unwrap()
        .to_string();
    assert_ne!(old, new);

    let stale = app.request("GET", &format!("/d/{old}"), None, None).await;
    assert_eq!(stale.status, StatusCode::NOT_FOUND);

    let fresh = app.request("GET", &format!("/d/{new}"), None, None).await;
    assert_eq!(fresh.status, StatusCode::OK);
}

#[tokio::test]
async fn test_revoke_disables_link() {
    let app = TestApp::new().await;
    let alice = app.user("alice");
    let file = app.upload(&alice, "notes.txt", b"hello").await;
    let id = file["id"].as_str().unwrap();
    let token = issue(&app, &alice, id).await["token"]
        .as_str()
        .unwrap()
        .to_string();

    let response = app
        .request(
            "POST",
            &format!("/api/files/{id}/public-link/delete"),
            None,
            Some(&alice.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, json!({ "status": "revoked" }));

    let download = app.request("GET", &format!("/d/{token}"), None, None).await;
    assert_eq!(download.status, StatusCode::NOT_FOUND);

    // Revoking a private file is a no-op.
    let again = app
        .request(
            "POST",
            &format!("/api/files/{id}/public-link/delete"),
            None,
            Some(&alice.token),
        )
        .await;
    assert_eq!(again.status, StatusCode::OK);

    let list = app
        .request("GET", "/api/files", None, Some(&alice.token))
        .await;
    assert_eq!(list.body["items"][0]["has_public_link"], false);
}

#[tokio::test]
async fn test_token_only_opens_its_own_file() {
    let app = TestApp::new().await;
    let alice = app.user("alice");
    let shared = app.upload(&alice, "shared.txt", b"shared").await;
    app.upload(&alice, "private.txt", b"private").await;

    let token = issue(&app, &alice, shared["id"].as_str().unwrap()).await["token"]
        .as_str()
        .unwrap()
        .to_string();

    let response = app.request("GET", &format!("/d/{token}"), None, None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.bytes, b"shared");
}

#[tokio::test]
async fn test_unknown_and_malformed_tokens_are_not_found() {
    let app = TestApp::new().await;

    for path in ["/d/doesnotexist", "/d/bad%20token", "/d/a.b"] {
        let response = app.request("GET", path, None, None).await;
        assert_eq!(response.status, StatusCode::NOT_FOUND, "{path}");
    }
}

#[tokio::test]
async fn test_deleted_file_link_is_gone() {
    let app = TestApp::new().await;
    let alice = app.user("alice");
    let file = app.upload(&alice, "notes.txt", b"hello").await;
    let id = file["id"].as_str().unwrap();
    let token = issue(&app, &alice, id).await["token"]
        .as_str()
        .unwrap()
        .to_string();

    let response = app
        .request(
            "POST",
            &format!("/api/files/{id}/delete"),
            None,
            Some(&alice.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let download = app.request("GET", &format!("/d/{token}"), None, None).await;
    assert_eq!(download.status, StatusCode::NOT_FOUND);
}
