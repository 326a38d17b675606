//! Template/order categories and their extra form fields.
//!
//! The category set is closed. Each category declares the ordered list of
//! extension fields its order form shows; submission-time collection
//! filters the submitted values to the selected category's declared keys,
//! so stale values from a previously selected category never reach the
//! stored record.

use serde_json::{Map, Value};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Category enum
// ---------------------------------------------------------------------------

/// Closed set of template/order categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Business,
    Portfolio,
    Education,
    Ecommerce,
    Blog,
    Ngo,
}

/// All categories, in display order.
pub const ALL_CATEGORIES: &[Category] = &[
    Category::Business,
    Category::Portfolio,
    Category::Education,
    Category::Ecommerce,
    Category::Blog,
    Category::Ngo,
];

impl Category {
    /// Database/string name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Business => "business",
            Self::Portfolio => "portfolio",
            Self::Education => "education",
            Self::Ecommerce => "ecommerce",
            Self::Blog => "blog",
            Self::Ngo => "ngo",
        }
    }

    /// Parse from a string name.
    ///
    /// Unknown input yields a validation error listing the valid names.
    pub fn from_name(name: &str) -> Result<Self, CoreError> {
        match name {
            "business" => Ok(Self::Business),
            "portfolio" => Ok(Self::Portfolio),
            "education" => Ok(Self::Education),
            "ecommerce" => Ok(Self::Ecommerce),
            "blog" => Ok(Self::Blog),
            "ngo" => Ok(Self::Ngo),
            other => {
                let valid: Vec<&str> = ALL_CATEGORIES.iter().map(|c| c.name()).collect();
                Err(CoreError::Validation(format!(
                    "Unknown category '{other}'. Must be one of: {}",
                    valid.join(", ")
                )))
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Field descriptors
// ---------------------------------------------------------------------------

/// Input widget kind for a form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Text,
    TextArea,
    Number,
}

/// One extension field shown on the order form for a category.
#[derive(Debug, Clone, Copy, serde::Serialize)]
pub struct FieldDescriptor {
    pub key: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub placeholder: &'static str,
    pub help_text: &'static str,
    pub required: bool,
}

const BUSINESS_FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor {
        key: "business_name",
        label: "Business name",
        kind: FieldKind::Text,
        placeholder: "Acme Ltd",
        help_text: "The registered name shown across the site",
        required: true,
    },
    FieldDescriptor {
        key: "business_type",
        label: "Type of business",
        kind: FieldKind::Text,
        placeholder: "Consultancy, salon, logistics...",
        help_text: "",
        required: true,
    },
    FieldDescriptor {
        key: "services",
        label: "Services offered",
        kind: FieldKind::TextArea,
        placeholder: "One service per line",
        help_text: "Used to build the services section",
        required: false,
    },
];

const PORTFOLIO_FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor {
        key: "profession",
        label: "Profession",
        kind: FieldKind::Text,
        placeholder: "Photographer, designer...",
        help_text: "",
        required: true,
    },
    FieldDescriptor {
        key: "highlights",
        label: "Work highlights",
        kind: FieldKind::TextArea,
        placeholder: "Projects or clients to feature",
        help_text: "",
        required: false,
    },
];

const EDUCATION_FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor {
        key: "institution_name",
        label: "Institution name",
        kind: FieldKind::Text,
        placeholder: "Hillside Academy",
        help_text: "",
        required: true,
    },
    FieldDescriptor {
        key: "institution_type",
        label: "Institution type",
        kind: FieldKind::Text,
        placeholder: "Primary school, college...",
        help_text: "",
        required: true,
    },
    FieldDescriptor {
        key: "student_count",
        label: "Approximate student count",
        kind: FieldKind::Number,
        placeholder: "500",
        help_text: "",
        required: false,
    },
];

const ECOMMERCE_FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor {
        key: "store_name",
        label: "Store name",
        kind: FieldKind::Text,
        placeholder: "Acme Outfitters",
        help_text: "",
        required: true,
    },
    FieldDescriptor {
        key: "product_count",
        label: "Approximate product count",
        kind: FieldKind::Number,
        placeholder: "50",
        help_text: "Rough catalogue size at launch",
        required: false,
    },
    FieldDescriptor {
        key: "payment_methods",
        label: "Payment methods",
        kind: FieldKind::Text,
        placeholder: "M-Pesa, card, PayPal...",
        help_text: "",
        required: false,
    },
];

const BLOG_FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor {
        key: "blog_topic",
        label: "Main topic",
        kind: FieldKind::Text,
        placeholder: "Travel, food, tech...",
        help_text: "",
        required: true,
    },
    FieldDescriptor {
        key: "posting_frequency",
        label: "Posting frequency",
        kind: FieldKind::Text,
        placeholder: "Weekly",
        help_text: "",
        required: false,
    },
];

const NGO_FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor {
        key: "organization_name",
        label: "Organization name",
        kind: FieldKind::Text,
        placeholder: "Green Futures Initiative",
        help_text: "",
        required: true,
    },
    FieldDescriptor {
        key: "mission",
        label: "Mission statement",
        kind: FieldKind::TextArea,
        placeholder: "What the organization works toward",
        help_text: "",
        required: true,
    },
];

/// Ordered extension-field descriptors for a category.
pub fn fields(category: Category) -> &'static [FieldDescriptor] {
    match category {
        Category::Business => BUSINESS_FIELDS,
        Category::Portfolio => PORTFOLIO_FIELDS,
        Category::Education => EDUCATION_FIELDS,
        Category::Ecommerce => ECOMMERCE_FIELDS,
        Category::Blog => BLOG_FIELDS,
        Category::Ngo => NGO_FIELDS,
    }
}

// ---------------------------------------------------------------------------
// Extension collection
// ---------------------------------------------------------------------------

/// Filter submitted extension values to the selected category's fields.
///
/// Values keyed by fields belonging to other categories are dropped, even
/// if present in the submission. Missing required fields yield a
/// validation error naming the field.
pub fn collect_extension(
    category: Category,
    submitted: &Map<String, Value>,
) -> Result<Map<String, Value>, CoreError> {
    let mut out = Map::new();
    for field in fields(category) {
        match submitted.get(field.key) {
            Some(value) if !is_blank(value) => {
                out.insert(field.key.to_string(), value.clone());
            }
            _ if field.required => {
                return Err(CoreError::Validation(format!(
                    "Field '{}' is required for {} orders",
                    field.key,
                    category.name()
                )));
            }
            _ => {}
        }
    }
    Ok(out)
}

/// A value counts as blank when it is null or a whitespace-only string.
fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use serde_json::json;

    fn as_map(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn parse_all_category_names() {
        for cat in ALL_CATEGORIES {
            assert_eq!(Category::from_name(cat.name()).unwrap(), *cat);
        }
    }

    #[test]
    fn unknown_category_lists_valid_names() {
        let err = Category::from_name("restaurant").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("restaurant"));
        for cat in ALL_CATEGORIES {
            assert!(msg.contains(cat.name()), "missing {}", cat.name());
        }
    }

    #[test]
    fn every_category_declares_fields() {
        for cat in ALL_CATEGORIES {
            assert!(!fields(*cat).is_empty(), "{} has no fields", cat.name());
        }
    }

    #[test]
    fn field_keys_are_unique_within_category() {
        for cat in ALL_CATEGORIES {
            let keys: Vec<_> = fields(*cat).iter().map(|f| f.key).collect();
            let mut deduped = keys.clone();
            deduped.sort_unstable();
            deduped.dedup();
            assert_eq!(keys.len(), deduped.len(), "{}", cat.name());
        }
    }

    #[test]
    fn collect_keeps_declared_fields_only() {
        let submitted = as_map(json!({
            "business_name": "Acme Ltd",
            "business_type": "Consultancy",
            "profession": "Photographer",
            "blog_topic": "Travel",
        }));
        let ext = collect_extension(Category::Business, &submitted).unwrap();
        assert_eq!(ext.len(), 2);
        assert_eq!(ext["business_name"], "Acme Ltd");
        assert!(!ext.contains_key("profession"));
        assert!(!ext.contains_key("blog_topic"));
    }

    #[test]
    fn collect_rejects_missing_required_field() {
        let submitted = as_map(json!({ "business_name": "Acme Ltd" }));
        let err = collect_extension(Category::Business, &submitted).unwrap_err();
        assert_matches!(err, CoreError::Validation(msg) if msg.contains("business_type"));
    }

    #[test]
    fn collect_treats_blank_string_as_missing() {
        let submitted = as_map(json!({
            "business_name": "  ",
            "business_type": "Consultancy",
        }));
        let err = collect_extension(Category::Business, &submitted).unwrap_err();
        assert_matches!(err, CoreError::Validation(msg) if msg.contains("business_name"));
    }

    #[test]
    fn collect_skips_blank_optional_field() {
        let submitted = as_map(json!({
            "business_name": "Acme Ltd",
            "business_type": "Consultancy",
            "services": "",
        }));
        let ext = collect_extension(Category::Business, &submitted).unwrap();
        assert!(!ext.contains_key("services"));
    }
}
