//! Repository for the `knowledge` table.

use sqlx::PgPool;
use tessella_core::types::DbId;

use crate::models::knowledge::{CreateKnowledgeEntry, KnowledgeEntry, UpdateKnowledgeEntry};

const COLUMNS: &str = "id, topic, content, created_at, updated_at";

/// Provides CRUD operations for knowledge-base entries.
pub struct KnowledgeRepo;

impl KnowledgeRepo {
    /// Insert a new entry, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateKnowledgeEntry,
    ) -> Result<KnowledgeEntry, sqlx::Error> {
        let query = format!(
            "INSERT INTO knowledge (topic, content)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, KnowledgeEntry>(&query)
            .bind(&input.topic)
            .bind(&input.content)
            .fetch_one(pool)
            .await
    }

    /// Find an entry by ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<KnowledgeEntry>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM knowledge WHERE id = $1");
        sqlx::query_as::<_, KnowledgeEntry>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all entries, optionally filtered by topic, oldest first.
    pub async fn list(
        pool: &PgPool,
        topic: Option<&str>,
    ) -> Result<Vec<KnowledgeEntry>, sqlx::Error> {
        match topic {
            Some(topic) => {
                let query = format!(
                    "SELECT {COLUMNS} FROM knowledge WHERE topic = $1 ORDER BY created_at ASC"
                );
                sqlx::query_as::<_, KnowledgeEntry>(&query)
                    .bind(topic)
                    .fetch_all(pool)
                    .await
            }
            None => {
                let query = format!("SELECT {COLUMNS} FROM knowledge ORDER BY created_at ASC");
                sqlx::query_as::<_, KnowledgeEntry>(&query)
                    .fetch_all(pool)
                    .await
            }
        }
    }

    /// Update an entry. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateKnowledgeEntry,
    ) -> Result<Option<KnowledgeEntry>, sqlx::Error> {
        let query = format!(
            "UPDATE knowledge SET
                topic = COALESCE($2, topic),
                content = COALESCE($3, content),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, KnowledgeEntry>(&query)
            .bind(id)
            .bind(&input.topic)
            .bind(&input.content)
            .fetch_optional(pool)
            .await
    }

    /// Delete an entry by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM knowledge WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
