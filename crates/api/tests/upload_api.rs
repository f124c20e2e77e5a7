//! HTTP-level integration tests for listing image uploads.
//!
//! Multipart bodies are built by hand with a fixed boundary so the tests
//! have no extra client-side dependencies.

mod common;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request, StatusCode};
use common::{body_json, signup_user};
use sqlx::PgPool;
use tower::ServiceExt;

const BOUNDARY: &str = "test-boundary-7MA4YWxkTrZu0gW";

/// Build a multipart body with a single `file` field.
fn multipart_body(filename: &str, content_type: &str, bytes: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
    body.extend_from_slice(
        format!("Content-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\n")
            .as_bytes(),
    );
    body.extend_from_slice(format!("Content-Type: {content_type}\r\n\r\n").as_bytes());
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
    body
}

async fn upload(
    app: axum::Router,
    token: &str,
    filename: &str,
    content_type: &str,
    bytes: &[u8],
) -> axum::http::Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/v1/uploads/listing-image")
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .header(
            CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(multipart_body(filename, content_type, bytes)))
        .expect("request should build");
    app.oneshot(request).await.expect("request should not fail")
}

/// A small PNG uploads successfully; the returned URL points under
/// `/uploads/` and the file lands on disk keyed by the uploader's id.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_upload_image_success(pool: PgPool) {
    let config = common::test_config();
    let dir = config.upload_dir.clone();

    let app = common::build_test_app_with_config(pool.clone(), config.clone());
    let (token, signup_json) = signup_user(app, "Uploader", "upload@campus.edu").await;
    let user_id = signup_json["user"]["id"].as_i64().unwrap();

    let app = common::build_test_app_with_config(pool, config);
    let response = upload(app, &token, "cover.png", "image/png", b"\x89PNG fake bytes").await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    let url = json["data"]["url"].as_str().unwrap();
    assert!(url.contains(&format!("/uploads/{user_id}/")));
    assert!(url.ends_with("-cover.png"));

    // The uploader's key namespace exists on disk.
    assert!(dir.join(user_id.to_string()).is_dir());
}

/// A declared non-image type is rejected with 400 and nothing is stored.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_upload_non_image_rejected(pool: PgPool) {
    let config = common::test_config();
    let dir = config.upload_dir.clone();

    let app = common::build_test_app_with_config(pool.clone(), config.clone());
    let (token, _) = signup_user(app, "Uploader", "upload@campus.edu").await;

    let app = common::build_test_app_with_config(pool, config);
    let response = upload(app, &token, "notes.pdf", "application/pdf", b"%PDF-1.4").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(!dir.exists());
}

/// A payload over 5 MiB is rejected.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_upload_oversized_image_rejected(pool: PgPool) {
    let config = common::test_config();
    let app = common::build_test_app_with_config(pool.clone(), config.clone());
    let (token, _) = signup_user(app, "Uploader", "upload@campus.edu").await;

    let big = vec![0u8; 5 * 1024 * 1024 + 1];
    let app = common::build_test_app_with_config(pool, config);
    let response = upload(app, &token, "huge.jpg", "image/jpeg", &big).await;

    // Either our own validation (400) or the body-limit layer (413): the
    // upload must not succeed.
    assert!(
        response.status() == StatusCode::BAD_REQUEST
            || response.status() == StatusCode::PAYLOAD_TOO_LARGE,
        "oversized upload must be rejected, got {}",
        response.status()
    );
}

/// A filename with path components is sanitized into a flat key.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_upload_filename_sanitized(pool: PgPool) {
    let config = common::test_config();
    let app = common::build_test_app_with_config(pool.clone(), config.clone());
    let (token, _) = signup_user(app, "Uploader", "upload@campus.edu").await;

    let app = common::build_test_app_with_config(pool, config);
    let response = upload(
        app,
        &token,
        "../../etc/passwd.png",
        "image/png",
        b"fake image",
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    let url = json["data"]["url"].as_str().unwrap();
    assert!(!url.contains(".."));
    assert!(url.ends_with("-passwd.png"));
}

/// Uploads require authentication.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_upload_requires_auth(pool: PgPool) {
    let app = common::build_test_app(pool);
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/v1/uploads/listing-image")
        .header(
            CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(multipart_body("a.png", "image/png", b"x")))
        .expect("request should build");
    let response = request_app(app, request).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

async fn request_app(app: axum::Router, request: Request<Body>) -> axum::http::Response<Body> {
    app.oneshot(request).await.expect("request should not fail")
}
