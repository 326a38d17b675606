//! Template entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use tessella_core::pricing::RateCard;
use tessella_core::types::{DbId, Timestamp};

/// A row from the `templates` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Template {
    pub id: DbId,
    pub name: String,
    pub category: String,
    pub price_ksh: f64,
    pub price_usd: f64,
    pub price_eur: f64,
    pub price_gbp: f64,
    pub rate_per_month: f64,
    pub rate_per_page: f64,
    pub preview_url: Option<String>,
    pub image_url: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Template {
    /// Pricing inputs for the quote calculator.
    pub fn rate_card(&self) -> RateCard {
        RateCard {
            price_ksh: self.price_ksh,
            price_usd: self.price_usd,
            price_eur: self.price_eur,
            price_gbp: self.price_gbp,
            rate_per_month: self.rate_per_month,
            rate_per_page: self.rate_per_page,
        }
    }
}

/// DTO for creating a new template.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTemplate {
    pub name: String,
    pub category: String,
    pub price_ksh: f64,
    pub price_usd: f64,
    pub price_eur: f64,
    pub price_gbp: f64,
    pub rate_per_month: f64,
    pub rate_per_page: f64,
    pub preview_url: Option<String>,
    pub image_url: Option<String>,
}

/// DTO for updating an existing template. All fields are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateTemplate {
    pub name: Option<String>,
    pub category: Option<String>,
    pub price_ksh: Option<f64>,
    pub price_usd: Option<f64>,
    pub price_eur: Option<f64>,
    pub price_gbp: Option<f64>,
    pub rate_per_month: Option<f64>,
    pub rate_per_page: Option<f64>,
    pub preview_url: Option<String>,
    pub image_url: Option<String>,
}
