//! Route definitions for the `/uploads` resource.

use axum::extract::DefaultBodyLimit;
use axum::routing::post;
use axum::Router;

use crate::handlers::upload;
use crate::state::AppState;

/// Request body cap for uploads: the 5 MiB image limit plus headroom for
/// multipart framing. Axum's 2 MB default would reject valid images before
/// the handler ran.
const UPLOAD_BODY_LIMIT: usize = 6 * 1024 * 1024;

/// Routes mounted at `/uploads`.
///
/// ```text
/// POST /listing-image -> upload_listing_image (multipart, requires auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/listing-image", post(upload::upload_listing_image))
        .layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT))
}
