pub mod auth;
pub mod health;
pub mod listing;
pub mod notification;
pub mod profile;
pub mod upload;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/signup                       create account + profile (public)
/// /auth/login                        login (public)
/// /auth/refresh                      rotate refresh token (public)
/// /auth/logout                       revoke sessions (requires auth)
/// /auth/session                      current user + profile (requires auth)
///
/// /listings                          catalog with filters (GET), create (POST, auth)
/// /listings/courses                  distinct course tags (GET)
/// /listings/{id}                     detail (GET), full update (PUT, owner)
/// /listings/{id}/contact             mailto link (GET, auth)
/// /listings/{id}/status              status change (PATCH, owner)
/// /listings/{id}                     delete (DELETE, owner)
///
/// /me/listings                       caller's listings, any status (auth)
/// /me/profile                        get, update profile (auth)
///
/// /notifications                     notification feed (auth)
///
/// /uploads/listing-image             image upload, multipart (POST, auth)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Authentication: signup, login, token refresh, session info.
        .nest("/auth", auth::router())
        // Public catalog + owner-scoped listing mutations.
        .nest("/listings", listing::router())
        // Caller-scoped resources (dashboard, profile).
        .nest("/me", profile::router())
        // Notification feed.
        .nest("/notifications", notification::router())
        // Listing image uploads.
        .nest("/uploads", upload::router())
}
