//! Repository for the `messages` table.

use sqlx::PgPool;
use tessella_core::types::DbId;

use crate::models::message::{CreateMessage, Message};

const COLUMNS: &str = "id, user_id, sender, body, created_at";

/// Provides insert and thread-listing operations for chat messages.
pub struct MessageRepo;

impl MessageRepo {
    /// Insert a message, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateMessage) -> Result<Message, sqlx::Error> {
        let query = format!(
            "INSERT INTO messages (user_id, sender, body)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Message>(&query)
            .bind(input.user_id)
            .bind(&input.sender)
            .bind(&input.body)
            .fetch_one(pool)
            .await
    }

    /// List a visitor's thread, oldest first.
    pub async fn list_for_user(pool: &PgPool, user_id: DbId) -> Result<Vec<Message>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM messages WHERE user_id = $1 ORDER BY created_at ASC, id ASC"
        );
        sqlx::query_as::<_, Message>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }
}
