//! Listing entity models and query-shaped rows.

use bookswap_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Full row from the `listings` table.
///
/// `category` and `status` are the lowercase TEXT forms; parse through
/// `bookswap_core::listing` when the enum semantics are needed.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Listing {
    pub id: DbId,
    pub owner_id: DbId,
    pub title: String,
    pub author: String,
    pub edition: Option<String>,
    pub description: Option<String>,
    pub category: String,
    pub price: Option<f64>,
    pub course_tag: Option<String>,
    pub image_url: Option<String>,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Catalog row: a listing joined with its owner's display name.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CatalogRow {
    pub id: DbId,
    pub title: String,
    pub author: String,
    pub category: String,
    pub price: Option<f64>,
    pub course_tag: Option<String>,
    pub image_url: Option<String>,
    pub status: String,
    pub owner_name: String,
    pub created_at: Timestamp,
}

/// Detail row: a listing joined with the owner's contact information.
#[derive(Debug, Clone, FromRow)]
pub struct ListingDetailRow {
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
    pub created_at: Timestamp,
    pub owner_id: DbId,
    pub owner_name: String,
    pub owner_email: String,
    pub owner_department: Option<String>,
    pub owner_semester: Option<String>,
}

/// Write model for inserting a listing. Fields are already validated and
/// normalized (price cleared outside 'sell', empty optionals as `None`).
#[derive(Debug)]
pub struct CreateListing {
    pub owner_id: DbId,
    pub title: String,
    pub author: String,
    pub edition: Option<String>,
    pub description: Option<String>,
    pub category: String,
    pub price: Option<f64>,
    pub course_tag: Option<String>,
    pub image_url: Option<String>,
}

/// Write model for a full listing update (everything but owner and status).
#[derive(Debug)]
pub struct UpdateListing {
    pub title: String,
    pub author: String,
    pub edition: Option<String>,
    pub description: Option<String>,
    pub category: String,
    pub price: Option<f64>,
    pub course_tag: Option<String>,
    pub image_url: Option<String>,
}
