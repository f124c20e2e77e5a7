//! Repository for the `listings` table.

use bookswap_core::types::DbId;
use sqlx::PgPool;

use crate::models::listing::{
    CatalogRow, CreateListing, Listing, ListingDetailRow, UpdateListing,
};

/// Column list shared across single-table queries to avoid repetition.
const COLUMNS: &str = "id, owner_id, title, author, edition, description, category, \
                        price, course_tag, image_url, status, created_at, updated_at";

/// Provides CRUD operations for listings.
pub struct ListingRepo;

impl ListingRepo {
    /// Insert a new listing, returning the created row.
    ///
    /// Status always starts as 'available' (schema default).
    pub async fn create(pool: &PgPool, input: &CreateListing) -> Result<Listing, sqlx::Error> {
        let query = format!(
            "INSERT INTO listings
                (owner_id, title, author, edition, description, category, price, course_tag, image_url)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Listing>(&query)
            .bind(input.owner_id)
            .bind(&input.title)
            .bind(&input.author)
            .bind(&input.edition)
            .bind(&input.description)
            .bind(&input.category)
            .bind(input.price)
            .bind(&input.course_tag)
            .bind(&input.image_url)
            .fetch_one(pool)
            .await
    }

    /// Fetch the full catalog joined with owner display names, newest first.
    ///
    /// Filtering is applied afterwards in memory (`bookswap_core::catalog`);
    /// this query deliberately returns the unfiltered set.
    pub async fn list_catalog(pool: &PgPool) -> Result<Vec<CatalogRow>, sqlx::Error> {
        sqlx::query_as::<_, CatalogRow>(
            "SELECT l.id, l.title, l.author, l.category, l.price, l.course_tag,
                    l.image_url, l.status, p.name AS owner_name, l.created_at
             FROM listings l
             JOIN profiles p ON p.id = l.owner_id
             ORDER BY l.created_at DESC",
        )
        .fetch_all(pool)
        .await
    }

    /// Distinct non-null course tags, for the course filter selector.
    pub async fn distinct_course_tags(pool: &PgPool) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT DISTINCT course_tag FROM listings
             WHERE course_tag IS NOT NULL
             ORDER BY course_tag",
        )
        .fetch_all(pool)
        .await
    }

    /// Find a listing by ID (single table, no join).
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Listing>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM listings WHERE id = $1");
        sqlx::query_as::<_, Listing>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a listing joined with the owner's contact information.
    pub async fn find_detail(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ListingDetailRow>, sqlx::Error> {
        sqlx::query_as::<_, ListingDetailRow>(
            "SELECT l.id, l.title, l.author, l.edition, l.description, l.category,
                    l.price, l.course_tag, l.image_url, l.status, l.created_at,
                    p.id AS owner_id, p.name AS owner_name, p.email AS owner_email,
                    p.department AS owner_department, p.semester AS owner_semester
             FROM listings l
             JOIN profiles p ON p.id = l.owner_id
             WHERE l.id = $1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// List a profile's own listings, newest first.
    pub async fn list_by_owner(pool: &PgPool, owner_id: DbId) -> Result<Vec<Listing>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM listings
             WHERE owner_id = $1
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Listing>(&query)
            .bind(owner_id)
            .fetch_all(pool)
            .await
    }

    /// Full update of a listing's editable fields.
    ///
    /// Returns `None` if no row with the given `id` exists. Ownership is
    /// checked by the caller before this is invoked.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateListing,
    ) -> Result<Option<Listing>, sqlx::Error> {
        let query = format!(
            "UPDATE listings SET
                title = $2,
                author = $3,
                edition = $4,
                description = $5,
                category = $6,
                price = $7,
                course_tag = $8,
                image_url = $9,
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Listing>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.author)
            .bind(&input.edition)
            .bind(&input.description)
            .bind(&input.category)
            .bind(input.price)
            .bind(&input.course_tag)
            .bind(&input.image_url)
            .fetch_optional(pool)
            .await
    }

    /// Set a listing's status, returning the updated row.
    ///
    /// Any value may move to any value; the lifecycle has no guards.
    pub async fn update_status(
        pool: &PgPool,
        id: DbId,
        status: &str,
    ) -> Result<Option<Listing>, sqlx::Error> {
        let query = format!(
            "UPDATE listings SET status = $2, updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Listing>(&query)
            .bind(id)
            .bind(status)
            .fetch_optional(pool)
            .await
    }

    /// Delete a listing. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM listings WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
