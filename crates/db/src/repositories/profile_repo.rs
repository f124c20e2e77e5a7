//! Repository for the `profiles` table.

use bookswap_core::types::DbId;
use sqlx::PgPool;

use crate::models::profile::{Profile, UpdateProfile};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, name, email, department, semester, phone, \
                        created_at, updated_at";

/// Provides read/update operations for profiles. Creation happens at
/// signup via [`UserRepo::create_with_profile`](crate::repositories::UserRepo::create_with_profile).
pub struct ProfileRepo;

impl ProfileRepo {
    /// Find a profile by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Profile>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM profiles WHERE id = $1");
        sqlx::query_as::<_, Profile>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Resolve the profile linked to an account.
    pub async fn find_by_user_id(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Option<Profile>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM profiles WHERE user_id = $1");
        sqlx::query_as::<_, Profile>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Update the profile linked to an account.
    ///
    /// Returns `None` if the account has no profile.
    pub async fn update_by_user_id(
        pool: &PgPool,
        user_id: DbId,
        input: &UpdateProfile,
    ) -> Result<Option<Profile>, sqlx::Error> {
        let query = format!(
            "UPDATE profiles SET
                name = $2,
                department = $3,
                semester = $4,
                phone = $5,
                updated_at = NOW()
             WHERE user_id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Profile>(&query)
            .bind(user_id)
            .bind(&input.name)
            .bind(&input.department)
            .bind(&input.semester)
            .bind(&input.phone)
            .fetch_optional(pool)
            .await
    }
}
