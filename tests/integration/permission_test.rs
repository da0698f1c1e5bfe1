//! Integration tests for access control across users.

mod helpers;

use std::time::{SystemTime, UNIX_EPOCH};

use axum::http::StatusCode;
use serde_json::json;

use mycloud_auth::jwt::{Claims, JwtEncoder};
use mycloud_core::config::AuthConfig;
use mycloud_entity::user::UserRole;

use helpers::TestApp;

fn now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs() as i64
}

#[tokio::test]
async fn test_other_user_is_forbidden() {
    let app = TestApp::new().await;
    let alice = app.user("alice");
    let bob = app.user("bob");
    let file = app.upload(&alice, "secret.txt", b"secret").await;
    let id = file["id"].as_str().unwrap();

    let attempts = [
        ("GET", format!("/api/files/{id}/download"), None),
        (
            "PATCH",
            format!("/api/files/{id}"),
            Some(json!({ "comment": "mine now" })),
        ),
        ("DELETE", format!("/api/files/{id}/delete"), None),
        ("POST", format!("/api/files/{id}/delete"), None),
        ("POST", format!("/api/files/{id}/public-link"), None),
        ("POST", format!("/api/files/{id}/public-link/delete"), None),
    ];

    for (method, path, body) in attempts {
        let response = app.request(method, &path, body, Some(&bob.token)).await;
        assert_eq!(response.status, StatusCode::FORBIDDEN, "{method} {path}");
        assert_eq!(response.body["error"], "FORBIDDEN");
    }

    // Nothing changed.
    let list = app
        .request("GET", "/api/files", None, Some(&alice.token))
        .await;
    assert_eq!(list.body["count"], 1);
    assert_eq!(list.body["items"][0]["comment"], "");
    assert_eq!(list.body["items"][0]["has_public_link"], false);
}

#[tokio::test]
async fn test_admin_can_manage_any_file() {
    let app = TestApp::new().await;
    let alice = app.user("alice");
    let admin = app.admin("root");
    let file = app.upload(&alice, "notes.txt", b"hello").await;
    let id = file["id"].as_str().unwrap();

    let download = app
        .request(
            "GET",
            &format!("/api/files/{id}/download"),
            None,
            Some(&admin.token),
        )
        .await;
    assert_eq!(download.status, StatusCode::OK);
    assert_eq!(download.bytes, b"hello");

    let patch = app
        .request(
            "PATCH",
            &format!("/api/files/{id}"),
            Some(json!({ "comment": "reviewed" })),
            Some(&admin.token),
        )
        .await;
    assert_eq!(patch.status, StatusCode::OK);
    assert_eq!(patch.body["comment"], "reviewed");

    let link = app
        .request(
            "POST",
            &format!("/api/files/{id}/public-link"),
            None,
            Some(&admin.token),
        )
        .await;
    assert_eq!(link.status, StatusCode::OK);

    let delete = app
        .request(
            "DELETE",
            &format!("/api/files/{id}/delete"),
            None,
            Some(&admin.token),
        )
        .await;
    assert_eq!(delete.status, StatusCode::OK);
}

#[tokio::test]
async fn test_anonymous_is_unauthorized() {
    let app = TestApp::new().await;
    let alice = app.user("alice");
    let file = app.upload(&alice, "notes.txt", b"hello").await;
    let id = file["id"].as_str().unwrap();

    for (method, path) in [
        ("GET", format!("/api/files/{id}/download")),
        ("POST", format!("/api/files/{id}/delete")),
        ("POST", format!("/api/files/{id}/public-link")),
    ] {
        let response = app.request(method, &path, None, None).await;
        assert_eq!(response.status, StatusCode::UNAUTHORIZED, "{method} {path}");
    }
}

#[tokio::test]
async fn test_expired_token_is_rejected() {
    let app = TestApp::new().await;
    let token = app
        .encoder
        .encode_claims(&Claims {
            sub: uuid::Uuid::new_v4(),
            username: "alice".to_string(),
            role: UserRole::User,
            iat: now() - 7200,
            exp: now() - 3600,
        })
        .unwrap();

    let response = app.request("GET", "/api/files", None, Some(&token)).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_token_signed_with_other_secret_is_rejected() {
    let app = TestApp::new().await;
    let forger = JwtEncoder::new(&AuthConfig {
        jwt_secret: "some-other-secret-entirely".to_string(),
        ..Default::default()
    });
    let token = forger
        .generate(uuid::Uuid::new_v4(), "mallory", UserRole::Admin)
        .unwrap();

    let response = app.request("GET", "/api/files", None, Some(&token)).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_same_username_different_users_stay_isolated() {
    let app = TestApp::new().await;
    let first = app.user("sam");
    let second = app.user("sam");
    let file = app.upload(&first, "a.txt", b"first").await;
    app.upload(&second, "a.txt", b"second").await;

    let response = app
        .request(
            "GET",
            &format!("/api/files/{}/download", file["id"].as_str().unwrap()),
            None,
            Some(&second.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(app.blobs_on_disk(), 2);
}
