//! End-to-end tests for the download API
//!
//! Each test drives the full router (auth middleware included) against an
//! in-memory database and temp-dir asset files.

use std::io::{Cursor, Read};

use axum::body::Body;
use http::{Request, StatusCode, header};
use serde_json::{Value, json};
use tower::ServiceExt;
use zip::ZipArchive;

use pixvault::auth::JwtConfig;
use pixvault::core::{Config, ServerState, build_router};
use pixvault::db::models::ImageRecordCreate;

struct TestApp {
    state: ServerState,
    _work_dir: tempfile::TempDir,
    assets: tempfile::TempDir,
}

impl TestApp {
    async fn new() -> Self {
        let work_dir = tempfile::tempdir().expect("work dir");
        let assets = tempfile::tempdir().expect("asset dir");

        let config = Config {
            work_dir: work_dir.path().to_string_lossy().into_owned(),
            http_port: 0,
            jwt: JwtConfig {
                secret: "integration-test-secret-0123456789abcdef".to_string(),
                expiration_minutes: 60,
                issuer: "pixvault".to_string(),
                audience: "pixvault-clients".to_string(),
            },
            environment: "development".to_string(),
            log_dir: None,
        };

        let state = ServerState::initialize_in_memory(&config)
            .await
            .expect("state should initialize");

        Self {
            state,
            _work_dir: work_dir,
            assets,
        }
    }

    fn token(&self) -> String {
        self.state
            .jwt_service()
            .generate_token("user-1", "alice")
            .expect("token should mint")
    }

    /// Seed a record whose image and thumbnail files exist on disk
    async fn seed_image(&self, id: &str, file_name: &str, bytes: &[u8]) {
        let file_path = self.assets.path().join(file_name);
        std::fs::write(&file_path, bytes).expect("asset write");

        let thumb_path = self.assets.path().join(format!("thumb_{file_name}"));
        std::fs::write(&thumb_path, b"thumb-bytes").expect("thumb write");

        self.seed_record(
            id,
            Some(file_path.to_string_lossy().into_owned()),
            Some(thumb_path.to_string_lossy().into_owned()),
            Some(file_name.to_string()),
        )
        .await;
    }

    async fn seed_record(
        &self,
        id: &str,
        file_path: Option<String>,
        thumbnail_path: Option<String>,
        file_name: Option<String>,
    ) {
        self.state
            .images
            .create(
                id,
                ImageRecordCreate {
                    file_path,
                    thumbnail_path,
                    file_name,
                    created_at: 1_700_000_000_000,
                },
            )
            .await
            .expect("record should seed");
    }

    async fn get(&self, uri: &str) -> http::Response<Body> {
        let request = Request::builder()
            .uri(uri)
            .header(header::AUTHORIZATION, format!("Bearer {}", self.token()))
            .body(Body::empty())
            .unwrap();
        self.oneshot(request).await
    }

    async fn post_json(&self, uri: &str, body: Value) -> http::Response<Body> {
        self.post_raw(uri, body.to_string()).await
    }

    async fn post_raw(&self, uri: &str, body: impl Into<String>) -> http::Response<Body> {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::AUTHORIZATION, format!("Bearer {}", self.token()))
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.into()))
            .unwrap();
        self.oneshot(request).await
    }

    async fn oneshot(&self, request: Request<Body>) -> http::Response<Body> {
        build_router(self.state.clone())
            .oneshot(request)
            .await
            .expect("router call")
    }
}

async fn body_bytes(response: http::Response<Body>) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body read")
        .to_vec()
}

async fn body_json(response: http::Response<Body>) -> Value {
    serde_json::from_slice(&body_bytes(response).await).expect("json body")
}

fn header_value(response: &http::Response<Body>, name: header::HeaderName) -> String {
    response
        .headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

// ==================== Auth ====================

#[tokio::test]
async fn health_is_public() {
    let app = TestApp::new().await;

    let request = Request::builder()
        .uri("/api/health")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["code"], 0);
    assert_eq!(body["data"]["status"], "ok");
}

#[tokio::test]
async fn download_without_token_is_unauthorized() {
    let app = TestApp::new().await;
    app.seed_image("img_1", "cat.png", b"png-bytes").await;

    let request = Request::builder()
        .uri("/download/image/img_1")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["category"], "auth_error");
}

#[tokio::test]
async fn download_with_garbage_token_is_unauthorized() {
    let app = TestApp::new().await;

    let request = Request::builder()
        .uri("/download/image/img_1")
        .header(header::AUTHORIZATION, "Bearer not.a.token")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["category"], "auth_error");
}

// ==================== Single image ====================

#[tokio::test]
async fn single_download_streams_file_with_attachment() {
    let app = TestApp::new().await;
    app.seed_image("img_1", "cat.png", b"png-bytes").await;

    let response = app.get("/download/image/img_1").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        header_value(&response, header::CONTENT_TYPE),
        "image/png"
    );
    assert_eq!(
        header_value(&response, header::CONTENT_DISPOSITION),
        "attachment; filename=\"cat.png\""
    );
    assert_eq!(body_bytes(response).await, b"png-bytes");
}

#[tokio::test]
async fn single_download_unknown_id_is_validation_error() {
    let app = TestApp::new().await;

    let response = app.get("/download/image/missing").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    // Missing record is a request problem, never a file problem
    assert_eq!(body["category"], "validation_error");
    assert_eq!(body["details"]["image_id"], "missing");
}

#[tokio::test]
async fn single_download_record_without_file_is_file_error() {
    let app = TestApp::new().await;
    app.seed_record("img_nofile", None, None, Some("cat.png".to_string()))
        .await;

    let response = app.get("/download/image/img_nofile").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["category"], "file_error");
}

#[tokio::test]
async fn single_download_dangling_path_is_file_error() {
    let app = TestApp::new().await;
    app.seed_record(
        "img_dangling",
        Some("/nonexistent/cat.png".to_string()),
        None,
        Some("cat.png".to_string()),
    )
    .await;

    let response = app.get("/download/image/img_dangling").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["category"], "file_error");
}

// ==================== Thumbnail ====================

#[tokio::test]
async fn thumbnail_download_is_prefixed() {
    let app = TestApp::new().await;
    app.seed_image("img_1", "cat.png", b"png-bytes").await;

    let response = app.get("/download/thumbnail/img_1").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        header_value(&response, header::CONTENT_DISPOSITION),
        "attachment; filename=\"thumb_cat.png\""
    );
    assert_eq!(body_bytes(response).await, b"thumb-bytes");
}

#[tokio::test]
async fn thumbnail_unknown_id_is_validation_error() {
    let app = TestApp::new().await;

    let response = app.get("/download/thumbnail/missing").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["category"], "validation_error");
}

#[tokio::test]
async fn thumbnail_missing_asset_is_file_error() {
    let app = TestApp::new().await;
    // Record has an image file but no thumbnail
    let file_path = app.assets.path().join("solo.png");
    std::fs::write(&file_path, b"png-bytes").unwrap();
    app.seed_record(
        "img_nothumb",
        Some(file_path.to_string_lossy().into_owned()),
        None,
        Some("solo.png".to_string()),
    )
    .await;

    let response = app.get("/download/thumbnail/img_nothumb").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["category"], "file_error");
}

// ==================== Batch ====================

#[tokio::test]
async fn batch_empty_id_list_is_validation_error() {
    let app = TestApp::new().await;

    let response = app
        .post_json("/download/images", json!({ "image_ids": [] }))
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["category"], "validation_error");
}

#[tokio::test]
async fn batch_body_without_ids_field_is_validation_error() {
    let app = TestApp::new().await;

    let response = app.post_json("/download/images", json!({})).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["category"], "validation_error");
}

#[tokio::test]
async fn batch_malformed_body_keeps_error_envelope() {
    let app = TestApp::new().await;

    let response = app.post_raw("/download/images", "not a json body").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["category"], "validation_error");
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn batch_bundles_found_and_skips_missing() {
    let app = TestApp::new().await;
    app.seed_image("img_a", "a.png", b"alpha").await;
    // img_b has no record at all; img_c has a record but a dangling file
    app.seed_record(
        "img_c",
        Some("/nonexistent/c.png".to_string()),
        None,
        Some("c.png".to_string()),
    )
    .await;

    let response = app
        .post_json(
            "/download/images",
            json!({ "image_ids": ["img_a", "img_b", "img_c"] }),
        )
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        header_value(&response, header::CONTENT_TYPE),
        "application/zip"
    );
    assert_eq!(
        header_value(&response, header::CONTENT_DISPOSITION),
        "attachment; filename=\"images.zip\""
    );

    let bytes = body_bytes(response).await;
    let mut archive = ZipArchive::new(Cursor::new(bytes)).expect("zip parses");
    assert_eq!(archive.len(), 1);

    let mut data = Vec::new();
    archive
        .by_name("a.png")
        .expect("entry keeps its file name")
        .read_to_end(&mut data)
        .unwrap();
    assert_eq!(data, b"alpha");
}

#[tokio::test]
async fn batch_with_only_missing_ids_is_empty_archive() {
    let app = TestApp::new().await;

    let response = app
        .post_json("/download/images", json!({ "image_ids": ["ghost"] }))
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = body_bytes(response).await;
    let archive = ZipArchive::new(Cursor::new(bytes)).expect("zip parses");
    assert_eq!(archive.len(), 0);
}
