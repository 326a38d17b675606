//! Custom request (order) entity model and DTO.
//!
//! Rows are created once at submission and never updated; there is no
//! update DTO.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use tessella_core::types::{DbId, Timestamp};

/// A row from the `custom_requests` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CustomRequest {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub category: String,
    pub template_name: String,
    pub country: String,
    pub currency: String,
    pub price: f64,
    pub duration_months: i64,
    pub page_count: i64,
    pub extra_pages: Option<String>,
    pub domain_choice: String,
    pub domain_name: Option<String>,
    pub theme_choice: String,
    pub custom_color: Option<String>,
    pub social_handles: Vec<String>,
    pub message: Option<String>,
    /// Category-specific extension fields, filtered to the selected
    /// category's declared keys.
    pub extension: serde_json::Value,
    /// Public URLs of the uploaded files, in upload order.
    pub file_urls: Vec<String>,
    pub created_at: Timestamp,
}

/// DTO for inserting a fully assembled order record.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCustomRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub category: String,
    pub template_name: String,
    pub country: String,
    pub currency: String,
    pub price: f64,
    pub duration_months: i64,
    pub page_count: i64,
    pub extra_pages: Option<String>,
    pub domain_choice: String,
    pub domain_name: Option<String>,
    pub theme_choice: String,
    pub custom_color: Option<String>,
    pub social_handles: Vec<String>,
    pub message: Option<String>,
    pub extension: serde_json::Value,
    pub file_urls: Vec<String>,
}
