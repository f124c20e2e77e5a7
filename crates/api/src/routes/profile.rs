//! Route definitions for caller-scoped resources mounted at `/me`.
//!
//! All endpoints require authentication.

use axum::routing::get;
use axum::Router;

use crate::handlers::{listing, profile};
use crate::state::AppState;

/// Routes mounted at `/me`.
///
/// ```text
/// GET /profile   -> get_me
/// PUT /profile   -> update_me
/// GET /listings  -> list_mine (dashboard: any status, newest first)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/profile", get(profile::get_me).put(profile::update_me))
        .route("/listings", get(listing::list_mine))
}
