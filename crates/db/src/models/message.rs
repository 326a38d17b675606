//! Chat message entity model and DTO.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use tessella_core::types::{DbId, Timestamp};

/// A row from the `messages` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Message {
    pub id: DbId,
    pub user_id: DbId,
    /// `"visitor"` or `"admin"`.
    pub sender: String,
    pub body: String,
    pub created_at: Timestamp,
}

/// DTO for inserting a chat message.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateMessage {
    pub user_id: DbId,
    pub sender: String,
    pub body: String,
}
