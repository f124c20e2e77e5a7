//! Profile entity model and DTOs.

use bookswap_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `profiles` table: the public identity linked to an
/// account. Exactly one profile per user.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Profile {
    pub id: DbId,
    pub user_id: DbId,
    pub name: String,
    pub email: String,
    pub department: Option<String>,
    pub semester: Option<String>,
    pub phone: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a profile (at signup, in the same transaction as the
/// user row).
#[derive(Debug)]
pub struct CreateProfile {
    pub name: String,
    pub email: String,
    pub department: Option<String>,
    pub semester: Option<String>,
}

/// DTO for the profile editor. Email is immutable and therefore absent.
#[derive(Debug)]
pub struct UpdateProfile {
    pub name: String,
    pub department: Option<String>,
    pub semester: Option<String>,
    pub phone: Option<String>,
}
