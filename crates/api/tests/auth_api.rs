//! HTTP-level integration tests for the auth endpoints.
//!
//! Covers signup (validation, duplicate email, auto-login), login (wrong
//! password, lockout), token refresh with rotation, logout, and session
//! lookup.

mod common;

use axum::http::StatusCode;
use common::{body_json, get_auth, post_json, post_json_auth, signup_user};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Signup
// ---------------------------------------------------------------------------

/// Signup creates the account and logs it in: 201 with tokens + user info.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_signup_returns_tokens_and_user(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/auth/signup",
        serde_json::json!({
            "name": "Asha Verma",
            "email": "asha@campus.edu",
            "password": "secret-pass-1",
            "department": "CSE",
            "semester": "4",
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert!(json["access_token"].is_string());
    assert!(json["refresh_token"].is_string());
    assert!(json["expires_in"].is_number());
    assert_eq!(json["user"]["email"], "asha@campus.edu");
    assert_eq!(json["user"]["name"], "Asha Verma");
}

/// Signup rejects a too-short password with 400 and a field error; no
/// account is created.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_signup_short_password_rejected(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/v1/auth/signup",
        serde_json::json!({
            "name": "Asha Verma",
            "email": "asha@campus.edu",
            "password": "12345",
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert!(json["fields"]["password"].is_string());

    // The failed signup must not leave a user row behind.
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 0);
}

/// A whitespace-padded name is stored trimmed; a whitespace-only name is
/// rejected outright.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_signup_name_is_trimmed(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/v1/auth/signup",
        serde_json::json!({
            "name": "  Asha Verma  ",
            "email": "asha@campus.edu",
            "password": "secret-pass-1",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["user"]["name"], "Asha Verma");

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/auth/signup",
        serde_json::json!({
            "name": "     ",
            "email": "blank@campus.edu",
            "password": "secret-pass-1",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert!(json["fields"]["name"].is_string());
}

/// Signup rejects a one-character name.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_signup_short_name_rejected(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/auth/signup",
        serde_json::json!({
            "name": "A",
            "email": "a@campus.edu",
            "password": "secret-pass-1",
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// A second signup with the same email maps the unique constraint to 409.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_signup_duplicate_email_conflict(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    signup_user(app, "First User", "dup@campus.edu").await;

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/auth/signup",
        serde_json::json!({
            "name": "Second User",
            "email": "dup@campus.edu",
            "password": "secret-pass-1",
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

/// The sign-in event is published only once the session row is persisted;
/// a failed signup publishes nothing.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_signed_in_event_follows_persisted_session(pool: PgPool) {
    let bus = std::sync::Arc::new(bookswap_events::EventBus::default());
    let mut rx = bus.subscribe();

    let app = common::build_test_app_with_bus(pool.clone(), std::sync::Arc::clone(&bus));
    signup_user(app, "Event User", "event@campus.edu").await;

    // By the time the event is observable, the session must already exist.
    let event = rx.try_recv().expect("successful signup must publish");
    assert_eq!(event.event_type, "session.signed_in");
    let sessions: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM user_sessions")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(sessions, 1);

    // A rejected signup (duplicate email) publishes no sign-in event.
    let app = common::build_test_app_with_bus(pool, bus);
    let response = post_json(
        app,
        "/api/v1/auth/signup",
        serde_json::json!({
            "name": "Dup User",
            "email": "event@campus.edu",
            "password": "secret-pass-1",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert!(
        rx.try_recv().is_err(),
        "failed signup must not publish a sign-in event"
    );
}

// ---------------------------------------------------------------------------
// Login
// ---------------------------------------------------------------------------

/// Login with the signup password succeeds and returns fresh tokens.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_login_success(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    signup_user(app, "Login User", "login@campus.edu").await;

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/auth/login",
        serde_json::json!({ "email": "login@campus.edu", "password": "secret-pass-1" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json["access_token"].is_string());
    assert_eq!(json["user"]["name"], "Login User");
}

/// Login with a wrong password returns 401 without leaking which part was
/// wrong.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_login_wrong_password(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    signup_user(app, "Wrong PW", "wrongpw@campus.edu").await;

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/auth/login",
        serde_json::json!({ "email": "wrongpw@campus.edu", "password": "not-the-password" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// Login with an unknown email returns the same 401 as a bad password.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_login_unknown_email(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/auth/login",
        serde_json::json!({ "email": "ghost@campus.edu", "password": "whatever-pass" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// Five consecutive failures lock the account: the sixth attempt is
/// rejected with 403 even when the password is correct.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_login_lockout_after_failed_attempts(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    signup_user(app, "Lock Me", "lockme@campus.edu").await;

    for _ in 0..5 {
        let app = common::build_test_app(pool.clone());
        let response = post_json(
            app,
            "/api/v1/auth/login",
            serde_json::json!({ "email": "lockme@campus.edu", "password": "bad-password" }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/auth/login",
        serde_json::json!({ "email": "lockme@campus.edu", "password": "secret-pass-1" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

// ---------------------------------------------------------------------------
// Refresh / logout / session
// ---------------------------------------------------------------------------

/// Refresh exchanges a valid refresh token for new tokens; the old refresh
/// token is revoked (rotation) and cannot be used twice.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_refresh_rotates_token(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (_token, signup_json) = signup_user(app, "Refresher", "refresh@campus.edu").await;
    let refresh_token = signup_json["refresh_token"].as_str().unwrap().to_string();

    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/v1/auth/refresh",
        serde_json::json!({ "refresh_token": refresh_token }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json["refresh_token"].is_string());
    assert_ne!(json["refresh_token"].as_str().unwrap(), refresh_token);

    // Replay of the rotated-out token fails.
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/auth/refresh",
        serde_json::json!({ "refresh_token": refresh_token }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// Refresh with a garbage token is rejected.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_refresh_invalid_token(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/auth/refresh",
        serde_json::json!({ "refresh_token": "not-a-real-token" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// Logout revokes all sessions: the refresh token stops working.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_logout_revokes_sessions(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (token, signup_json) = signup_user(app, "Leaver", "leaver@campus.edu").await;
    let refresh_token = signup_json["refresh_token"].as_str().unwrap().to_string();

    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(app, "/api/v1/auth/logout", serde_json::json!({}), &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/auth/refresh",
        serde_json::json!({ "refresh_token": refresh_token }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// Session returns the account and profile for the bearer of a valid token.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_session_returns_user_and_profile(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (token, _) = signup_user(app, "Session User", "session@campus.edu").await;

    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/auth/session", &token).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["user"]["email"], "session@campus.edu");
    assert_eq!(json["profile"]["name"], "Session User");
    assert_eq!(json["profile"]["email"], "session@campus.edu");
}

/// Protected endpoints reject requests without a token.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_session_requires_token(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = common::get(app, "/api/v1/auth/session").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
