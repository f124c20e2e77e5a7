//! Handlers for the authenticated user's profile.

use axum::extract::State;
use axum::Json;
use bookswap_core::error::CoreError;
use bookswap_db::models::profile::{Profile, UpdateProfile};
use bookswap_db::repositories::ProfileRepo;
use serde::Deserialize;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::handlers::none_if_empty;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `PUT /me/profile`. Email is immutable and not accepted.
#[derive(Debug, Deserialize, Validate)]
pub struct ProfileInput {
    #[validate(length(min = 2, max = 100, message = "Name must be at least 2 characters"))]
    pub name: String,
    pub department: Option<String>,
    pub semester: Option<String>,
    pub phone: Option<String>,
}

/// GET /api/v1/me/profile
pub async fn get_me(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Json<DataResponse<Profile>>> {
    let profile = ProfileRepo::find_by_user_id(&state.pool, auth_user.user_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Profile",
            id: auth_user.user_id,
        })?;

    Ok(Json(DataResponse::new(profile)))
}

/// PUT /api/v1/me/profile
///
/// Replace the editable profile fields. Empty optional strings are stored
/// as NULL.
pub async fn update_me(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(mut input): Json<ProfileInput>,
) -> AppResult<Json<DataResponse<Profile>>> {
    // Validate the name as it will be stored; "   " must fail the length
    // check rather than be written as an empty string.
    input.name = input.name.trim().to_string();
    input.validate()?;

    let update = UpdateProfile {
        name: input.name,
        department: none_if_empty(input.department),
        semester: none_if_empty(input.semester),
        phone: none_if_empty(input.phone),
    };

    let profile = ProfileRepo::update_by_user_id(&state.pool, auth_user.user_id, &update)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Profile",
            id: auth_user.user_id,
        }))?;

    Ok(Json(DataResponse::new(profile)))
}
