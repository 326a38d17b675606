//! Repository for the `custom_requests` table.

use sqlx::PgPool;
use tessella_core::types::DbId;

use crate::models::custom_request::{CreateCustomRequest, CustomRequest};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, email, phone, category, template_name, country, currency, \
    price, duration_months, page_count, extra_pages, domain_choice, domain_name, \
    theme_choice, custom_color, social_handles, message, extension, file_urls, created_at";

/// Provides insert/read/delete operations for custom requests.
///
/// There is no update method: orders are written once at submission and
/// never edited.
pub struct CustomRequestRepo;

impl CustomRequestRepo {
    /// Insert a fully assembled order, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateCustomRequest,
    ) -> Result<CustomRequest, sqlx::Error> {
        let query = format!(
            "INSERT INTO custom_requests
                (name, email, phone, category, template_name, country, currency, price,
                 duration_months, page_count, extra_pages, domain_choice, domain_name,
                 theme_choice, custom_color, social_handles, message, extension, file_urls)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15,
                     $16, $17, $18, $19)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CustomRequest>(&query)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.phone)
            .bind(&input.category)
            .bind(&input.template_name)
            .bind(&input.country)
            .bind(&input.currency)
            .bind(input.price)
            .bind(input.duration_months)
            .bind(input.page_count)
            .bind(&input.extra_pages)
            .bind(&input.domain_choice)
            .bind(&input.domain_name)
            .bind(&input.theme_choice)
            .bind(&input.custom_color)
            .bind(&input.social_handles)
            .bind(&input.message)
            .bind(&input.extension)
            .bind(&input.file_urls)
            .fetch_one(pool)
            .await
    }

    /// Find an order by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<CustomRequest>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM custom_requests WHERE id = $1");
        sqlx::query_as::<_, CustomRequest>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all orders, newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<CustomRequest>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM custom_requests ORDER BY created_at DESC");
        sqlx::query_as::<_, CustomRequest>(&query)
            .fetch_all(pool)
            .await
    }

    /// Count all orders. Used by tests to assert no partial writes.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM custom_requests")
            .fetch_one(pool)
            .await?;
        Ok(count)
    }

    /// Delete an order by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM custom_requests WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
