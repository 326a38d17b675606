//! Country-to-currency resolution.
//!
//! Maps an ISO country code to the currency a visitor is quoted in. The
//! mapping is closed and total: any string (unknown, empty, lowercase)
//! resolves to a defined currency via the USD fallback, so callers never
//! handle an error case.

/// Euro-area country codes handled by the resolver.
const EURO_AREA: &[&str] = &["DE", "FR", "ES", "IT", "NL", "BE", "AT", "IE", "PT", "FI"];

/// Currency a template is priced in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Currency {
    Ksh,
    Usd,
    Eur,
    Gbp,
}

impl Currency {
    /// Display label shown next to a price.
    pub fn label(self) -> &'static str {
        match self {
            Self::Ksh => "KSH",
            Self::Usd => "USD",
            Self::Eur => "EUR",
            Self::Gbp => "GBP",
        }
    }

    /// Lowercase code matching the `price_{code}` template columns.
    pub fn code(self) -> &'static str {
        match self {
            Self::Ksh => "ksh",
            Self::Usd => "usd",
            Self::Eur => "eur",
            Self::Gbp => "gbp",
        }
    }
}

/// Resolve a country code to its quoting currency.
///
/// `KE` maps to KSH, `GB` to GBP, the euro-area codes to EUR, and
/// everything else (including unknown or empty input) falls back to USD.
/// Comparison is case-insensitive.
pub fn resolve_country(country: &str) -> Currency {
    let code = country.trim().to_ascii_uppercase();
    match code.as_str() {
        "KE" => Currency::Ksh,
        "GB" => Currency::Gbp,
        c if EURO_AREA.contains(&c) => Currency::Eur,
        _ => Currency::Usd,
    }
}
