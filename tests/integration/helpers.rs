//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::path::Path;
use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use mycloud_api::{AppState, build_app};
use mycloud_auth::jwt::JwtEncoder;
use mycloud_core::config::AppConfig;
use mycloud_core::traits::storage::StorageProvider;
use mycloud_database::MetadataStore;
use mycloud_entity::user::UserRole;
use mycloud_storage::LocalStorageProvider;

pub const PUBLIC_BASE_URL: &str = "https://files.test";
const BOUNDARY: &str = "mycloud-test-boundary";

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Shared state, for direct store access
    pub state: AppState,
    /// Token minting
    pub encoder: JwtEncoder,
    /// Storage root, removed on drop
    pub root: tempfile::TempDir,
}

/// A caller with a minted bearer token.
pub struct TestUser {
    pub id: Uuid,
    pub username: String,
    pub token: String,
}

/// Response status, headers, raw body, and parsed JSON (or `Null`).
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub bytes: Vec<u8>,
    pub body: Value,
}

impl TestResponse {
    pub fn header(&self, name: &str) -> &str {
        self.headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
    }
}

/// One multipart form part.
pub struct Part<'a> {
    pub name: &'a str,
    pub filename: Option<&'a str>,
    pub content: &'a [u8],
}

impl<'a> Part<'a> {
    pub fn file(filename: &'a str, content: &'a [u8]) -> Self {
        Self {
            name: "file",
            filename: Some(filename),
            content,
        }
    }

    pub fn text(name: &'a str, value: &'a str) -> Self {
        Self {
            name,
            filename: None,
            content: value.as_bytes(),
        }
    }
}

impl TestApp {
    /// Create a new test application with a 1 MiB upload cap.
    pub async fn new() -> Self {
        let root = tempfile::tempdir().expect("Failed to create storage root");

        let mut config = AppConfig::default();
        config.server.public_base_url = PUBLIC_BASE_URL.to_string();
        config.storage.root_path = root.path().to_string_lossy().into_owned();
        config.storage.max_upload_mb = 1;
        config.auth.jwt_secret = "integration-test-secret-0123456789".to_string();

        let storage: Arc<dyn StorageProvider> = Arc::new(
            LocalStorageProvider::new(&config.storage.root_path)
                .await
                .expect("Failed to init storage"),
        );
        let encoder = JwtEncoder::new(&config.auth);
        let state = AppState::from_parts(config, MetadataStore::in_memory(), storage);

        Self {
            router: build_app(state.clone()),
            state,
            encoder,
            root,
        }
    }

    /// Upload cap in bytes.
    pub fn max_upload_bytes(&self) -> u64 {
        self.state.config.storage.max_upload_bytes()
    }

    fn mint(&self, username: &str, role: UserRole) -> TestUser {
        let id = Uuid::new_v4();
        let token = self
            .encoder
            .generate(id, username, role)
            .expect("Failed to mint token");
        TestUser {
            id,
            username: username.to_string(),
            token,
        }
    }

    /// A regular user token.
    pub fn user(&self, username: &str) -> TestUser {
        self.mint(username, UserRole::User)
    }

    /// An admin token.
    pub fn admin(&self, username: &str) -> TestUser {
        self.mint(username, UserRole::Admin)
    }

    /// Send a request with an optional JSON body and bearer token.
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let mut req = Request::builder().method(method).uri(path);
        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {token}"));
        }

        let req = match body {
            Some(body) => req
                .header("Content-Type", "application/json")
                .body(Body::from(
                    serde_json::to_vec(&body).expect("Failed to serialize body"),
                )),
            None => req.body(Body::empty()),
        }
        .expect("Failed to build request");

        self.send(req).await
    }

    /// POST a multipart form to `/api/files`.
    pub async fn upload_parts(&self, parts: &[Part<'_>], token: Option<&str>) -> TestResponse {
        self.upload_raw(multipart_body(parts), token).await
    }

    /// POST an already encoded multipart body to `/api/files`.
    pub async fn upload_raw(&self, body: Vec<u8>, token: Option<&str>) -> TestResponse {
        let mut req = Request::builder()
            .method("POST")
            .uri("/api/files")
            .header(
                "Content-Type",
                format!("multipart/form-data; boundary={BOUNDARY}"),
            );
        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {token}"));
        }

        let req = req
            .body(Body::from(body))
            .expect("Failed to build request");
        self.send(req).await
    }

    /// Upload one file, asserting success, and return its JSON record.
    pub async fn upload(&self, user: &TestUser, filename: &str, content: &[u8]) -> Value {
        let response = self
            .upload_parts(&[Part::file(filename, content)], Some(&user.token))
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
        response.body
    }

    async fn send(&self, req: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to execute request");

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to read body")
            .to_bytes()
            .to_vec();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            headers,
            bytes,
            body,
        }
    }

    /// Number of regular files below the storage root.
    pub fn blobs_on_disk(&self) -> usize {
        count_files(self.root.path())
    }
}

fn count_files(dir: &Path) -> usize {
    std::fs::read_dir(dir)
        .map(|entries| {
            entries
                .filter_map(Result::ok)
                .map(|entry| {
                    let path = entry.path();
                    if path.is_dir() {
                        count_files(&path)
                    } else {
                        1
                    }
                })
                .sum()
        })
        .unwrap_or(0)
}

pub fn multipart_body(parts: &[Part<'_>]) -> Vec<u8> {
    let mut body = multipart_parts(parts);
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

/// Encoded parts without the closing boundary line.
pub fn multipart_parts(parts: &[Part<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match part.filename {
            Some(filename) => body.extend_from_slice(
                format!(
                    "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: application/octet-stream\r\n\r\n",
                    part.name, filename
                )
                .as_bytes(),
            ),
            None => body.extend_from_slice(
                format!(
                    "Content-Disposition: form-data; name=\"{}\"\r\n\r\n",
                    part.name
                )
                .as_bytes(),
            ),
        }
        body.extend_from_slice(part.content);
        body.extend_from_slice(b"\r\n");
    }
    body
}
