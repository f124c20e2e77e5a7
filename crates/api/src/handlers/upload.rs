//! Handler for listing image uploads.

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::Json;
use bookswap_core::image::{storage_key, validate_image};
use chrono::Utc;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Response body for a successful upload.
#[derive(Debug, Serialize)]
pub struct UploadedImage {
    pub url: String,
}

/// POST /api/v1/uploads/listing-image
///
/// Accepts a single multipart field named `file`. The declared content type
/// must be `image/*` and the payload at most 5 MiB. Keys are namespaced by
/// the uploader's user id so files never collide across users.
pub async fn upload_listing_image(
    State(state): State<AppState>,
    auth_user: AuthUser,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<DataResponse<UploadedImage>>)> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Malformed multipart body: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let content_type = field
            .content_type()
            .ok_or_else(|| AppError::BadRequest("File content type is required".into()))?
            .to_string();

        let filename = field
            .file_name()
            .ok_or_else(|| AppError::BadRequest("File name is required".into()))?
            .to_string();

        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(format!("Failed to read upload: {e}")))?;

        validate_image(&content_type, bytes.len())?;

        let key = storage_key(auth_user.user_id, Utc::now().timestamp_millis(), &filename);
        state.image_store.put(&key, &bytes).await?;

        let url = state.image_store.public_url(&key);

        return Ok((
            StatusCode::CREATED,
            Json(DataResponse::new(UploadedImage { url })),
        ));
    }

    Err(AppError::BadRequest(
        "Multipart field 'file' is required".into(),
    ))
}
