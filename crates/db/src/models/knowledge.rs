//! Knowledge-base entry model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use tessella_core::types::{DbId, Timestamp};

/// A row from the `knowledge` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct KnowledgeEntry {
    pub id: DbId,
    pub topic: String,
    pub content: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a knowledge entry.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateKnowledgeEntry {
    pub topic: String,
    pub content: String,
}

/// DTO for updating a knowledge entry. All fields are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateKnowledgeEntry {
    pub topic: Option<String>,
    pub content: Option<String>,
}
