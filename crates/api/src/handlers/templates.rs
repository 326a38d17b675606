//! Handlers for the template catalog.
//!
//! Public endpoints serve the storefront (list, detail, rate lookup);
//! create/update/delete are admin-only.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use tessella_core::category::Category;
use tessella_core::currency::resolve_country;
use tessella_core::error::CoreError;
use tessella_core::types::DbId;
use tessella_db::models::template::{CreateTemplate, Template, UpdateTemplate};
use tessella_db::repositories::TemplateRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::admin::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

/// Reject negative price or rate fields.
fn ensure_non_negative(value: f64, field: &str) -> AppResult<()> {
    if value < 0.0 {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Field '{field}' must not be negative"
        ))));
    }
    Ok(())
}

fn validate_create(input: &CreateTemplate) -> AppResult<()> {
    Category::from_name(&input.category)?;
    ensure_non_negative(input.price_ksh, "price_ksh")?;
    ensure_non_negative(input.price_usd, "price_usd")?;
    ensure_non_negative(input.price_eur, "price_eur")?;
    ensure_non_negative(input.price_gbp, "price_gbp")?;
    ensure_non_negative(input.rate_per_month, "rate_per_month")?;
    ensure_non_negative(input.rate_per_page, "rate_per_page")?;
    Ok(())
}

fn validate_update(input: &UpdateTemplate) -> AppResult<()> {
    if let Some(category) = &input.category {
        Category::from_name(category)?;
    }
    for (value, field) in [
        (input.price_ksh, "price_ksh"),
        (input.price_usd, "price_usd"),
        (input.price_eur, "price_eur"),
        (input.price_gbp, "price_gbp"),
        (input.rate_per_month, "rate_per_month"),
        (input.rate_per_page, "rate_per_page"),
    ] {
        if let Some(value) = value {
            ensure_non_negative(value, field)?;
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Public catalog
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct TemplateListParams {
    pub category: Option<String>,
}

/// GET /api/v1/templates
///
/// List templates, optionally filtered by category. An unknown category
/// is rejected with the list of valid categories.
pub async fn list_templates(
    State(state): State<AppState>,
    Query(params): Query<TemplateListParams>,
) -> AppResult<impl IntoResponse> {
    if let Some(category) = &params.category {
        Category::from_name(category)?;
    }
    let templates = TemplateRepo::list(&state.pool, params.category.as_deref()).await?;

    Ok(Json(DataResponse { data: templates }))
}

/// GET /api/v1/templates/{id}
pub async fn get_template(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let template = find_template(&state, id).await?;

    Ok(Json(DataResponse { data: template }))
}

#[derive(Debug, Deserialize)]
pub struct RateQuery {
    pub country: Option<String>,
}

/// Rate lookup payload the order form polls while the user adjusts
/// sliders. Stateless, so rapid successive calls are safe.
#[derive(Debug, Serialize)]
pub struct RateLookup {
    pub name: String,
    pub currency: &'static str,
    pub base_price: f64,
    pub rate_per_month: f64,
    pub rate_per_page: f64,
}

/// GET /api/v1/templates/{id}/rates?country=
pub async fn get_template_rates(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Query(params): Query<RateQuery>,
) -> AppResult<impl IntoResponse> {
    let template = find_template(&state, id).await?;
    let currency = resolve_country(params.country.as_deref().unwrap_or_default());
    let card = template.rate_card();

    Ok(Json(DataResponse {
        data: RateLookup {
            name: template.name,
            currency: currency.label(),
            base_price: card.base_price(currency),
            rate_per_month: card.rate_per_month,
            rate_per_page: card.rate_per_page,
        },
    }))
}

async fn find_template(state: &AppState, id: DbId) -> AppResult<Template> {
    TemplateRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Template",
            id,
        }))
}

// ---------------------------------------------------------------------------
// Admin CRUD
// ---------------------------------------------------------------------------

/// POST /api/v1/templates
///
/// Register a new template. Admin only.
pub async fn create_template(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateTemplate>,
) -> AppResult<impl IntoResponse> {
    validate_create(&input)?;

    let template = TemplateRepo::create(&state.pool, &input).await?;

    tracing::info!(
        template_id = template.id,
        name = %template.name,
        category = %template.category,
        "Template created",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: template })))
}

/// PUT /api/v1/templates/{id}
///
/// Update a template's pricing or metadata. Admin only.
pub async fn update_template(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateTemplate>,
) -> AppResult<impl IntoResponse> {
    validate_update(&input)?;

    let template = TemplateRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Template",
            id,
        }))?;

    tracing::info!(template_id = id, "Template updated");

    Ok(Json(DataResponse { data: template }))
}

/// DELETE /api/v1/templates/{id}
///
/// Delete a template. Admin only. Existing orders keep referencing the
/// template by name; their stored price is unaffected.
pub async fn delete_template(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let deleted = TemplateRepo::delete(&state.pool, id).await?;

    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Template",
            id,
        }));
    }

    tracing::info!(template_id = id, "Template deleted");

    Ok(StatusCode::NO_CONTENT)
}
