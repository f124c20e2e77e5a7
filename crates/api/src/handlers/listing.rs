//! Handlers for the `/listings` resource: public catalog, detail, contact
//! link, and the owner-scoped editor/dashboard operations.

use std::str::FromStr;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use bookswap_core::catalog::CatalogFilter;
use bookswap_core::contact::inquiry_mailto;
use bookswap_core::error::CoreError;
use bookswap_core::listing::{normalize_price, Category, ListingStatus};
use bookswap_core::types::{DbId, Timestamp};
use bookswap_db::models::listing::{CreateListing, Listing, UpdateListing};
use bookswap_db::repositories::{ListingRepo, ProfileRepo};
use bookswap_events::MarketEvent;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::handlers::none_if_empty;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /listings` and `PUT /listings/{id}`.
///
/// Price is only meaningful when the category is `sell`; any price sent with
/// another category is discarded on write.
#[derive(Debug, Deserialize, Validate)]
pub struct ListingInput {
    #[validate(length(min = 1, max = 255, message = "Title is required"))]
    pub title: String,
    #[validate(length(min = 1, max = 255, message = "Author is required"))]
    pub author: String,
    pub edition: Option<String>,
    pub description: Option<String>,
    pub category: String,
    #[validate(range(min = 0.0, message = "Price must not be negative"))]
    pub price: Option<f64>,
    pub course_tag: Option<String>,
    pub image_url: Option<String>,
}

impl ListingInput {
    /// Trim title and author so the length checks see the value as it
    /// will be stored. A whitespace-only title must fail, not persist as
    /// an empty string.
    fn trim_required_fields(&mut self) {
        self.title = self.title.trim().to_string();
        self.author = self.author.trim().to_string();
    }
}

/// Request body for `PATCH /listings/{id}/status`.
#[derive(Debug, Deserialize)]
pub struct StatusInput {
    pub status: String,
}

/// One catalog card: a listing summary plus its computed price label.
#[derive(Debug, Serialize)]
pub struct CatalogItem {
    pub id: DbId,
    pub title: String,
    pub author: String,
    pub category: String,
    pub price: Option<f64>,
    pub course_tag: Option<String>,
    pub image_url: Option<String>,
    pub status: String,
    pub owner_name: String,
    pub label: String,
    pub created_at: Timestamp,
}

/// Owner contact block embedded in [`ListingDetail`].
#[derive(Debug, Serialize)]
pub struct OwnerInfo {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub department: Option<String>,
    pub semester: Option<String>,
}

/// Full listing detail with owner contact information.
#[derive(Debug, Serialize)]
pub struct ListingDetail {
    pub id: DbId,
    pub title: String,
    pub author: String,
    pub edition: Option<String>,
    pub description: Option<String>,
    pub category: String,
    pub price: Option<f64>,
    pub course_tag: Option<String>,
    pub image_url: Option<String>,
    pub status: String,
    pub label: String,
    pub created_at: Timestamp,
    pub owner: OwnerInfo,
}

/// Response body for `GET /listings/{id}/contact`.
#[derive(Debug, Serialize)]
pub struct ContactLink {
    pub mailto: String,
}

// ---------------------------------------------------------------------------
// Public catalog
// ---------------------------------------------------------------------------

/// GET /api/v1/listings
///
/// Full catalog, newest first, filtered by the three conjunctive query
/// parameters (`query`, `category`, `course`). No parameters returns the
/// whole catalog unchanged.
pub async fn list_catalog(
    State(state): State<AppState>,
    Query(filter): Query<CatalogFilter>,
) -> AppResult<Json<DataResponse<Vec<CatalogItem>>>> {
    let rows = ListingRepo::list_catalog(&state.pool).await?;

    let items = rows
        .into_iter()
        .filter(|row| {
            filter.matches(
                &row.title,
                &row.author,
                &row.category,
                row.course_tag.as_deref(),
            )
        })
        .map(|row| {
            let label = price_label(&row.category, row.price)?;
            Ok(CatalogItem {
                id: row.id,
                title: row.title,
                author: row.author,
                category: row.category,
                price: row.price,
                course_tag: row.course_tag,
                image_url: row.image_url,
                status: row.status,
                owner_name: row.owner_name,
                label,
                created_at: row.created_at,
            })
        })
        .collect::<AppResult<Vec<_>>>()?;

    Ok(Json(DataResponse::new(items)))
}

/// GET /api/v1/listings/courses
///
/// Distinct course tags currently present in the catalog, for the course
/// filter dropdown. Untagged listings contribute nothing.
pub async fn list_courses(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<String>>>> {
    let tags = ListingRepo::distinct_course_tags(&state.pool).await?;
    Ok(Json(DataResponse::new(tags)))
}

/// GET /api/v1/listings/{id}
pub async fn get_listing(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<ListingDetail>>> {
    let row = ListingRepo::find_detail(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Listing",
            id,
        })?;

    let label = price_label(&row.category, row.price)?;

    Ok(Json(DataResponse::new(ListingDetail {
        id: row.id,
        title: row.title,
        author: row.author,
        edition: row.edition,
        description: row.description,
        category: row.category,
        price: row.price,
        course_tag: row.course_tag,
        image_url: row.image_url,
        status: row.status,
        label,
        created_at: row.created_at,
        owner: OwnerInfo {
            id: row.owner_id,
            name: row.owner_name,
            email: row.owner_email,
            department: row.owner_department,
            semester: row.owner_semester,
        },
    })))
}

/// GET /api/v1/listings/{id}/contact
///
/// Pre-composed `mailto:` link addressed to the owner. Available regardless
/// of listing status; the status badge is advisory only.
pub async fn get_contact_link(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<ContactLink>>> {
    let row = ListingRepo::find_detail(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Listing",
            id,
        })?;

    let mailto = inquiry_mailto(&row.owner_email, &row.owner_name, &row.title);

    Ok(Json(DataResponse::new(ContactLink { mailto })))
}

// ---------------------------------------------------------------------------
// Editor (create / update)
// ---------------------------------------------------------------------------

/// POST /api/v1/listings
///
/// Create a listing owned by the authenticated user. New listings always
/// start `available`.
pub async fn create_listing(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(mut input): Json<ListingInput>,
) -> AppResult<(StatusCode, Json<DataResponse<Listing>>)> {
    input.trim_required_fields();
    input.validate()?;

    let profile = ProfileRepo::find_by_user_id(&state.pool, auth_user.user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Forbidden("Profile not found".into())))?;

    let category = Category::from_str(&input.category)?;
    let price = normalize_price(category, input.price);

    let create = CreateListing {
        owner_id: profile.id,
        title: input.title,
        author: input.author,
        edition: none_if_empty(input.edition),
        description: none_if_empty(input.description),
        category: category.as_str().to_string(),
        price,
        course_tag: none_if_empty(input.course_tag),
        image_url: none_if_empty(input.image_url),
    };

    let listing = ListingRepo::create(&state.pool, &create).await?;

    state.event_bus.publish(
        MarketEvent::new("listing.created")
            .with_subject("listing", listing.id)
            .with_actor(auth_user.user_id),
    );

    Ok((StatusCode::CREATED, Json(DataResponse::new(listing))))
}

/// PUT /api/v1/listings/{id}
///
/// Full replacement of a listing's editable fields. Status and owner are
/// untouched. 404 if the listing does not exist, 403 if owned by someone
/// else.
pub async fn update_listing(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
    Json(mut input): Json<ListingInput>,
) -> AppResult<Json<DataResponse<Listing>>> {
    input.trim_required_fields();
    input.validate()?;

    require_ownership(&state, auth_user.user_id, id).await?;

    let category = Category::from_str(&input.category)?;
    let price = normalize_price(category, input.price);

    let update = UpdateListing {
        title: input.title,
        author: input.author,
        edition: none_if_empty(input.edition),
        description: none_if_empty(input.description),
        category: category.as_str().to_string(),
        price,
        course_tag: none_if_empty(input.course_tag),
        image_url: none_if_empty(input.image_url),
    };

    let listing =
        ListingRepo::update(&state.pool, id, &update)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "Listing",
                id,
            })?;

    state.event_bus.publish(
        MarketEvent::new("listing.updated")
            .with_subject("listing", listing.id)
            .with_actor(auth_user.user_id),
    );

    Ok(Json(DataResponse::new(listing)))
}

// ---------------------------------------------------------------------------
// Dashboard (owner-scoped)
// ---------------------------------------------------------------------------

/// GET /api/v1/me/listings
///
/// All listings owned by the authenticated user, newest first, any status.
pub async fn list_mine(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Json<DataResponse<Vec<Listing>>>> {
    let profile = ProfileRepo::find_by_user_id(&state.pool, auth_user.user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Forbidden("Profile not found".into())))?;

    let listings = ListingRepo::list_by_owner(&state.pool, profile.id).await?;
    Ok(Json(DataResponse::new(listings)))
}

/// PATCH /api/v1/listings/{id}/status
///
/// Move a listing between `available`, `reserved`, and `taken`. Any
/// transition is allowed. The response carries the row as persisted, so
/// clients render only confirmed state.
pub async fn update_status(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<StatusInput>,
) -> AppResult<Json<DataResponse<Listing>>> {
    let status = ListingStatus::from_str(&input.status)?;

    require_ownership(&state, auth_user.user_id, id).await?;

    let listing = ListingRepo::update_status(&state.pool, id, status.as_str())
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Listing",
            id,
        })?;

    state.event_bus.publish(
        MarketEvent::new("listing.status_changed")
            .with_subject("listing", listing.id)
            .with_actor(auth_user.user_id)
            .with_payload(serde_json::json!({ "status": listing.status })),
    );

    Ok(Json(DataResponse::new(listing)))
}

/// DELETE /api/v1/listings/{id}
///
/// Permanently remove a listing. Returns 204 on success.
pub async fn delete_listing(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    require_ownership(&state, auth_user.user_id, id).await?;

    let deleted = ListingRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Listing",
            id,
        }));
    }

    state.event_bus.publish(
        MarketEvent::new("listing.deleted")
            .with_subject("listing", id)
            .with_actor(auth_user.user_id),
    );

    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Verify the listing exists and is owned by the caller's profile.
///
/// 404 when the listing is absent, 403 when it belongs to another user.
async fn require_ownership(state: &AppState, user_id: DbId, listing_id: DbId) -> AppResult<()> {
    let listing = ListingRepo::find_by_id(&state.pool, listing_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Listing",
            id: listing_id,
        })?;

    let profile = ProfileRepo::find_by_id(&state.pool, listing.owner_id)
        .await?
        .ok_or_else(|| AppError::InternalError("Listing owner profile missing".into()))?;

    if profile.user_id != user_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "You do not own this listing".into(),
        )));
    }

    Ok(())
}

/// Compute the display label for a stored category + price.
///
/// The database CHECK constraint guarantees the stored category parses, so a
/// failure here is a server bug, not bad input.
fn price_label(category: &str, price: Option<f64>) -> AppResult<String> {
    let category = Category::from_str(category)
        .map_err(|_| AppError::InternalError(format!("Unknown stored category '{category}'")))?;
    Ok(category.display_label(price))
}
