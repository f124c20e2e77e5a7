//! Route definitions for the `/listings` resource.

use axum::routing::{get, patch};
use axum::Router;

use crate::handlers::listing;
use crate::state::AppState;

/// Routes mounted at `/listings`.
///
/// ```text
/// GET    /              -> list_catalog (public, ?query=&category=&course=)
/// POST   /              -> create_listing (requires auth)
/// GET    /courses       -> list_courses (public)
/// GET    /{id}          -> get_listing (public)
/// PUT    /{id}          -> update_listing (owner only)
/// DELETE /{id}          -> delete_listing (owner only)
/// GET    /{id}/contact  -> get_contact_link (requires auth)
/// PATCH  /{id}/status   -> update_status (owner only)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(listing::list_catalog).post(listing::create_listing),
        )
        .route("/courses", get(listing::list_courses))
        .route(
            "/{id}",
            get(listing::get_listing)
                .put(listing::update_listing)
                .delete(listing::delete_listing),
        )
        .route("/{id}/contact", get(listing::get_contact_link))
        .route("/{id}/status", patch(listing::update_status))
}
