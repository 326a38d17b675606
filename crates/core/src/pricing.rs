//! Quote computation for template orders.
//!
//! One pure function backs both the live price preview and the submission
//! pipeline, so the displayed and persisted amounts are bit-for-bit
//! identical for identical inputs.

use crate::currency::Currency;

// ---------------------------------------------------------------------------
// Input defaults
// ---------------------------------------------------------------------------

/// Fallback service duration when the input is missing or invalid.
pub const DEFAULT_DURATION_MONTHS: i64 = 12;

/// Fallback page count when the input is missing or invalid.
pub const DEFAULT_PAGE_COUNT: i64 = 5;

// ---------------------------------------------------------------------------
// Rate card
// ---------------------------------------------------------------------------

/// Per-template pricing inputs: one flat base price per currency plus the
/// two per-unit surcharges.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RateCard {
    pub price_ksh: f64,
    pub price_usd: f64,
    pub price_eur: f64,
    pub price_gbp: f64,
    pub rate_per_month: f64,
    pub rate_per_page: f64,
}

impl RateCard {
    /// Flat base price in the given currency.
    pub fn base_price(&self, currency: Currency) -> f64 {
        match currency {
            Currency::Ksh => self.price_ksh,
            Currency::Usd => self.price_usd,
            Currency::Eur => self.price_eur,
            Currency::Gbp => self.price_gbp,
        }
    }
}

// ---------------------------------------------------------------------------
// Coercion
// ---------------------------------------------------------------------------

/// Coerce an optional duration input to a usable value.
///
/// `None` and values below 1 fall back to [`DEFAULT_DURATION_MONTHS`].
pub fn coerce_duration(input: Option<i64>) -> i64 {
    match input {
        Some(v) if v >= 1 => v,
        _ => DEFAULT_DURATION_MONTHS,
    }
}

/// Coerce an optional page-count input to a usable value.
///
/// `None` and values below 1 fall back to [`DEFAULT_PAGE_COUNT`].
pub fn coerce_page_count(input: Option<i64>) -> i64 {
    match input {
        Some(v) if v >= 1 => v,
        _ => DEFAULT_PAGE_COUNT,
    }
}

// ---------------------------------------------------------------------------
// Quote
// ---------------------------------------------------------------------------

/// Compute the quoted price for a configuration.
///
/// `base_price(currency) + rate_per_month * duration + rate_per_page * pages`,
/// rounded to 2 decimal places.
pub fn quote(card: &RateCard, currency: Currency, duration_months: i64, page_count: i64) -> f64 {
    let raw = card.base_price(currency)
        + card.rate_per_month * duration_months as f64
        + card.rate_per_page * page_count as f64;
    round_2dp(raw)
}

/// Round a monetary amount to 2 decimal places.
pub fn round_2dp(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}
