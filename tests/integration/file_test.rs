//! Integration tests for file operations.

mod helpers;

use axum::http::StatusCode;
use serde_json::json;

use helpers::{Part, TestApp, multipart_parts};

#[tokio::test]
async fn test_list_files_anonymous_is_empty() {
    let app = TestApp::new().await;
    let alice = app.user("alice");
    app.upload(&alice, "notes.txt", b"hello").await;

    let response = app.request("GET", "/api/files", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["count"], 0);
    assert_eq!(response.body["items"], json!([]));
    assert_eq!(response.body["data"], json!([]));
    assert_eq!(response.body["results"], json!([]));
}

#[tokio::test]
async fn test_list_files_with_bad_token_is_unauthorized() {
    let app = TestApp::new().await;

    let response = app
        .request("GET", "/api/files", None, Some("not.a.jwt"))
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["error"], "UNAUTHORIZED");
}

#[tokio::test]
async fn test_upload_requires_token() {
    let app = TestApp::new().await;

    let response = app
        .upload_parts(&[Part::file("notes.txt", b"hello")], None)
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(app.blobs_on_disk(), 0);
}

#[tokio::test]
async fn test_upload_returns_record() {
    let app = TestApp::new().await;
    let alice = app.user("alice");

    let response = app
        .upload_parts(
            &[
                Part::text("comment", "quarterly numbers"),
                Part::file("report.pdf", b"%PDF-1.4 fake"),
            ],
            Some(&alice.token),
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    let file = &response.body;
    assert_eq!(file["original_name"], "report.pdf");
    assert_eq!(file["size"], 13);
    assert_eq!(file["comment"], "quarterly numbers");
    assert_eq!(file["has_public_link"], false);
    assert!(file["public_token"].is_null());
    assert!(file["last_downloaded_at"].is_null());
    assert!(file.get("disk_name").is_none());
    assert!(file.get("rel_dir").is_none());
    assert_eq!(app.blobs_on_disk(), 1);
}

#[tokio::test]
async fn test_upload_comment_after_file_part() {
    let app = TestApp::new().await;
    let alice = app.user("alice");

    let response = app
        .upload_parts(
            &[
                Part::file("notes.txt", b"hello"),
                Part::text("comment", "late"),
            ],
            Some(&alice.token),
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["comment"], "late");
}

#[tokio::test]
async fn test_upload_without_file_part_is_rejected() {
    let app = TestApp::new().await;
    let alice = app.user("alice");

    let response = app
        .upload_parts(&[Part::text("comment", "no file")], Some(&alice.token))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_oversize_upload_leaves_nothing_behind() {
    let app = TestApp::new().await;
    let alice = app.user("alice");
    let content = vec![7u8; app.max_upload_bytes() as usize + 10];

    let response = app
        .upload_parts(&[Part::file("big.bin", &content)], Some(&alice.token))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["message"], "File too large");
    assert_eq!(app.blobs_on_disk(), 0);

    let list = app
        .request("GET", "/api/files", None, Some(&alice.token))
        .await;
    assert_eq!(list.body["count"], 0);
}

#[tokio::test]
async fn test_truncated_form_after_file_part_leaves_nothing_behind() {
    let app = TestApp::new().await;
    let alice = app.user("alice");
    let body = multipart_parts(&[
        Part::file("notes.txt", b"hello"),
        Part::text("extra", "cut off here"),
    ]);

    let response = app.upload_raw(body, Some(&alice.token)).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(app.blobs_on_disk(), 0);
    let list = app
        .request("GET", "/api/files", None, Some(&alice.token))
        .await;
    assert_eq!(list.body["count"], 0);
}

#[tokio::test]
async fn test_overlong_comment_is_rejected_on_upload_and_patch() {
    let app = TestApp::new().await;
    let alice = app.user("alice");
    let long = "c".repeat(20_000);

    for parts in [
        [Part::text("comment", &long), Part::file("a.txt", b"a")],
        [Part::file("a.txt", b"a"), Part::text("comment", &long)],
    ] {
        let response = app.upload_parts(&parts, Some(&alice.token)).await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(response.body["message"], "Comment is too long");
    }
    assert_eq!(app.blobs_on_disk(), 0);
    let list = app
        .request("GET", "/api/files", None, Some(&alice.token))
        .await;
    assert_eq!(list.body["count"], 0);

    let file = app.upload(&alice, "b.txt", b"b").await;
    let response = app
        .request(
            "PATCH",
            &format!("/api/files/{}", file["id"].as_str().unwrap()),
            Some(json!({ "comment": long })),
            Some(&alice.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_upload_at_exact_limit_is_accepted() {
    let app = TestApp::new().await;
    let alice = app.user("alice");
    let content = vec![1u8; app.max_upload_bytes() as usize];

    let file = app.upload(&alice, "edge.bin", &content).await;
    assert_eq!(file["size"], app.max_upload_bytes());
}

#[tokio::test]
async fn test_list_is_scoped_to_owner_and_newest_first() {
    let app = TestApp::new().await;
    let alice = app.user("alice");
    let bob = app.user("bob");
    let admin = app.admin("root");

    let first = app.upload(&alice, "one.txt", b"1").await;
    let second = app.upload(&alice, "two.txt", b"2").await;
    app.upload(&bob, "bob.txt", b"b").await;

    let mine = app
        .request("GET", "/api/files", None, Some(&alice.token))
        .await;
    assert_eq!(mine.status, StatusCode::OK);
    assert_eq!(mine.body["count"], 2);
    assert_eq!(mine.body["items"][0]["id"], second["id"]);
    assert_eq!(mine.body["items"][1]["id"], first["id"]);
    assert_eq!(mine.body["items"], mine.body["data"]);
    assert_eq!(mine.body["items"], mine.body["results"]);

    let everything = app
        .request("GET", "/api/files", None, Some(&admin.token))
        .await;
    assert_eq!(everything.body["count"], 3);
}

#[tokio::test]
async fn test_download_streams_content_with_headers() {
    let app = TestApp::new().await;
    let alice = app.user("alice");
    let file = app.upload(&alice, "notes.txt", b"hello world").await;
    let id = file["id"].as_str().unwrap();

    let response = app
        .request(
            "GET",
            &format!("/api/files/{id}/download"),
            None,
            Some(&alice.token),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.bytes, b"hello world");
    assert_eq!(response.header("content-type"), "text/plain");
    assert_eq!(response.header("content-length"), "11");
    assert_eq!(
        response.header("content-disposition"),
        "attachment; filename=\"notes.txt\"; filename*=UTF-8''notes.txt"
    );

    let list = app
        .request("GET", "/api/files", None, Some(&alice.token))
        .await;
    assert!(!list.body["items"][0]["last_downloaded_at"].is_null());
}

#[tokio::test]
async fn test_download_percent_encodes_unicode_names() {
    let app = TestApp::new().await;
    let alice = app.user("alice");
    let file = app.upload(&alice, "cv.pdf", b"%PDF").await;
    let id = file["id"].as_str().unwrap();

    let renamed = app
        .request(
            "PATCH",
            &format!("/api/files/{id}"),
            Some(json!({ "original_name": "résumé final.pdf" })),
            Some(&alice.token),
        )
        .await;
    assert_eq!(renamed.status, StatusCode::OK);

    let response = app
        .request(
            "GET",
            &format!("/api/files/{id}/download"),
            None,
            Some(&alice.token),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.header("content-type"), "application/pdf");
    assert_eq!(
        response.header("content-disposition"),
        "attachment; filename=\"r%C3%A9sum%C3%A9%20final.pdf\"; filename*=UTF-8''r%C3%A9sum%C3%A9%20final.pdf"
    );
}

#[tokio::test]
async fn test_rename_keeps_extension_and_updates_comment() {
    let app = TestApp::new().await;
    let alice = app.user("alice");
    let file = app.upload(&alice, "report.pdf", b"%PDF").await;
    let id = file["id"].as_str().unwrap();

    let response = app
        .request(
            "PATCH",
            &format!("/api/files/{id}"),
            Some(json!({ "original_name": "summary", "comment": "final" })),
            Some(&alice.token),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["original_name"], "summary.pdf");
    assert_eq!(response.body["comment"], "final");
}

#[tokio::test]
async fn test_patch_ignores_read_only_fields() {
    let app = TestApp::new().await;
    let alice = app.user("alice");
    let file = app.upload(&alice, "notes.txt", b"hello").await;
    let id = file["id"].as_str().unwrap();

    let response = app
        .request(
            "PATCH",
            &format!("/api/files/{id}"),
            Some(json!({ "size": 999, "public_token": "forged", "comment": "ok" })),
            Some(&alice.token),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["size"], 5);
    assert!(response.body["public_token"].is_null());
    assert_eq!(response.body["comment"], "ok");
}

#[tokio::test]
async fn test_patch_blank_name_is_rejected() {
    let app = TestApp::new().await;
    let alice = app.user("alice");
    let file = app.upload(&alice, "notes.txt", b"hello").await;
    let id = file["id"].as_str().unwrap();

    let response = app
        .request(
            "PATCH",
            &format!("/api/files/{id}"),
            Some(json!({ "original_name": "   " })),
            Some(&alice.token),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_delete_removes_record_and_blob() {
    let app = TestApp::new().await;
    let alice = app.user("alice");
    let first = app.upload(&alice, "one.txt", b"1").await;
    let second = app.upload(&alice, "two.txt", b"2").await;
    assert_eq!(app.blobs_on_disk(), 2);

    let response = app
        .request(
            "DELETE",
            &format!("/api/files/{}/delete", first["id"].as_str().unwrap()),
            None,
            Some(&alice.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, json!({ "status": "deleted" }));

    let response = app
        .request(
            "POST",
            &format!("/api/files/{}/delete", second["id"].as_str().unwrap()),
            None,
            Some(&alice.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(app.blobs_on_disk(), 0);

    let download = app
        .request(
            "GET",
            &format!("/api/files/{}/download", first["id"].as_str().unwrap()),
            None,
            Some(&alice.token),
        )
        .await;
    assert_eq!(download.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unknown_and_malformed_ids_are_not_found() {
    let app = TestApp::new().await;
    let alice = app.user("alice");

    let response = app
        .request(
            "GET",
            "/api/files/00000000-0000-0000-0000-999999999999/download",
            None,
            Some(&alice.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    let response = app
        .request("GET", "/api/files/42/download", None, Some(&alice.token))
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_health() {
    let app = TestApp::new().await;

    let response = app.request("GET", "/api/health", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "ok");
    assert_eq!(response.body["database"], "ok");
    assert_eq!(response.body["storage"], "ok");
}
