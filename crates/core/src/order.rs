//! Order draft validation.
//!
//! Checks every required and conditionally-required field before the
//! submission pipeline touches the network. All violations surface as
//! [`CoreError::Validation`] naming the offending field.

use std::sync::OnceLock;

use regex::Regex;
use validator::ValidateEmail;

use crate::category::Category;
use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Thresholds
// ---------------------------------------------------------------------------

/// Page count above which the extra-pages description becomes required.
pub const EXTRA_PAGES_THRESHOLD: i64 = 5;

// ---------------------------------------------------------------------------
// Choice enums
// ---------------------------------------------------------------------------

/// How the customer wants their domain handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DomainChoice {
    RegisteredForMe,
    Custom,
}

impl DomainChoice {
    pub fn name(self) -> &'static str {
        match self {
            Self::RegisteredForMe => "registered_for_me",
            Self::Custom => "custom",
        }
    }

    pub fn from_name(name: &str) -> Result<Self, CoreError> {
        match name {
            "registered_for_me" => Ok(Self::RegisteredForMe),
            "custom" => Ok(Self::Custom),
            other => Err(CoreError::Validation(format!(
                "Unknown domain choice '{other}'. Must be one of: registered_for_me, custom"
            ))),
        }
    }
}

/// Theme selection for the ordered site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThemeChoice {
    Default,
    Custom,
}

impl ThemeChoice {
    pub fn name(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Custom => "custom",
        }
    }

    pub fn from_name(name: &str) -> Result<Self, CoreError> {
        match name {
            "default" => Ok(Self::Default),
            "custom" => Ok(Self::Custom),
            other => Err(CoreError::Validation(format!(
                "Unknown theme choice '{other}'. Must be one of: default, custom"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Draft
// ---------------------------------------------------------------------------

/// The user-supplied portion of an order, prior to pricing and upload.
///
/// Currency and price are intentionally absent: both are derived at
/// submission time and never accepted from the client.
#[derive(Debug, Clone)]
pub struct OrderDraft {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub category: Category,
    pub template_name: String,
    pub country: String,
    pub duration_months: i64,
    pub page_count: i64,
    pub extra_pages: Option<String>,
    pub domain_choice: DomainChoice,
    pub domain_name: Option<String>,
    pub theme_choice: ThemeChoice,
    pub custom_color: Option<String>,
    pub social_handles: Vec<String>,
    pub message: Option<String>,
}

/// Validate an order draft against the field invariants.
pub fn validate_draft(draft: &OrderDraft) -> Result<(), CoreError> {
    require_text(&draft.name, "name")?;
    require_text(&draft.phone, "phone")?;
    require_text(&draft.email, "email")?;
    if !draft.email.validate_email() {
        return Err(CoreError::Validation(format!(
            "Field 'email' is not a valid email address: '{}'",
            draft.email
        )));
    }
    require_text(&draft.template_name, "template")?;

    if draft.duration_months < 1 {
        return Err(CoreError::Validation(
            "Field 'duration_months' must be at least 1".into(),
        ));
    }
    if draft.page_count < 1 {
        return Err(CoreError::Validation(
            "Field 'page_count' must be at least 1".into(),
        ));
    }

    // Extra pages are required exactly when the count exceeds the threshold.
    if draft.page_count > EXTRA_PAGES_THRESHOLD && is_blank(&draft.extra_pages) {
        return Err(CoreError::Validation(format!(
            "Field 'extra_pages' is required when page_count exceeds {EXTRA_PAGES_THRESHOLD}"
        )));
    }

    if draft.domain_choice == DomainChoice::Custom && is_blank(&draft.domain_name) {
        return Err(CoreError::Validation(
            "Field 'domain_name' is required when domain_choice is 'custom'".into(),
        ));
    }

    if draft.theme_choice == ThemeChoice::Custom {
        match &draft.custom_color {
            Some(color) if hex_color_re().is_match(color) => {}
            Some(color) => {
                return Err(CoreError::Validation(format!(
                    "Field 'custom_color' must be a #rrggbb hex color, got '{color}'"
                )));
            }
            None => {
                return Err(CoreError::Validation(
                    "Field 'custom_color' is required when theme_choice is 'custom'".into(),
                ));
            }
        }
    }

    Ok(())
}

fn require_text(value: &str, field: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::Validation(format!(
            "Field '{field}' is required"
        )));
    }
    Ok(())
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, |v| v.trim().is_empty())
}

fn hex_color_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^#[0-9a-fA-F]{6}$").expect("valid hex color regex"))
}
