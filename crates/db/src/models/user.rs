//! Chat visitor identity model and DTO.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use tessella_core::types::{DbId, Timestamp};

/// A row from the `users` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: DbId,
    pub name: Option<String>,
    pub email: String,
    pub created_at: Timestamp,
}

/// DTO for creating a chat visitor.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUser {
    pub name: Option<String>,
    pub email: String,
}
