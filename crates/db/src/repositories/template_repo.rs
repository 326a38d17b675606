//! Repository for the `templates` table.

use sqlx::PgPool;
use tessella_core::types::DbId;

use crate::models::template::{CreateTemplate, Template, UpdateTemplate};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, category, price_ksh, price_usd, price_eur, price_gbp, \
    rate_per_month, rate_per_page, preview_url, image_url, created_at, updated_at";

/// Provides CRUD operations for templates.
pub struct TemplateRepo;

impl TemplateRepo {
    /// Insert a new template, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateTemplate) -> Result<Template, sqlx::Error> {
        let query = format!(
            "INSERT INTO templates
                (name, category, price_ksh, price_usd, price_eur, price_gbp,
                 rate_per_month, rate_per_page, preview_url, image_url)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Template>(&query)
            .bind(&input.name)
            .bind(&input.category)
            .bind(input.price_ksh)
            .bind(input.price_usd)
            .bind(input.price_eur)
            .bind(input.price_gbp)
            .bind(input.rate_per_month)
            .bind(input.rate_per_page)
            .bind(&input.preview_url)
            .bind(&input.image_url)
            .fetch_one(pool)
            .await
    }

    /// Find a template by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Template>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM templates WHERE id = $1");
        sqlx::query_as::<_, Template>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a template by its unique name.
    ///
    /// Order submissions reference templates by name, so this is the
    /// lookup the pricing step uses.
    pub async fn find_by_name(pool: &PgPool, name: &str) -> Result<Option<Template>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM templates WHERE name = $1");
        sqlx::query_as::<_, Template>(&query)
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    /// List templates, optionally filtered by category, newest first.
    pub async fn list(
        pool: &PgPool,
        category: Option<&str>,
    ) -> Result<Vec<Template>, sqlx::Error> {
        match category {
            Some(cat) => {
                let query = format!(
                    "SELECT {COLUMNS} FROM templates WHERE category = $1 ORDER BY created_at DESC"
                );
                sqlx::query_as::<_, Template>(&query)
                    .bind(cat)
                    .fetch_all(pool)
                    .await
            }
            None => {
                let query = format!("SELECT {COLUMNS} FROM templates ORDER BY created_at DESC");
                sqlx::query_as::<_, Template>(&query).fetch_all(pool).await
            }
        }
    }

    /// Update a template. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateTemplate,
    ) -> Result<Option<Template>, sqlx::Error> {
        let query = format!(
            "UPDATE templates SET
                name = COALESCE($2, name),
                category = COALESCE($3, category),
                price_ksh = COALESCE($4, price_ksh),
                price_usd = COALESCE($5, price_usd),
                price_eur = COALESCE($6, price_eur),
                price_gbp = COALESCE($7, price_gbp),
                rate_per_month = COALESCE($8, rate_per_month),
                rate_per_page = COALESCE($9, rate_per_page),
                preview_url = COALESCE($10, preview_url),
                image_url = COALESCE($11, image_url),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Template>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.category)
            .bind(input.price_ksh)
            .bind(input.price_usd)
            .bind(input.price_eur)
            .bind(input.price_gbp)
            .bind(input.rate_per_month)
            .bind(input.rate_per_page)
            .bind(&input.preview_url)
            .bind(&input.image_url)
            .fetch_optional(pool)
            .await
    }

    /// Delete a template by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM templates WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
