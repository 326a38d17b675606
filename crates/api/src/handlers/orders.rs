//! Handlers for price quotes and the custom-order submission pipeline.
//!
//! The pipeline runs in fixed phases: validate, upload files
//! sequentially, price against the chosen template, persist one order
//! record. Validation failures never touch the network; an upload
//! failure aborts before any record is written (already-uploaded objects
//! stay orphaned); a persist failure triggers best-effort compensating
//! deletes of this submission's objects. The quote endpoint and the
//! pipeline share one pricing function, so previewed and stored prices
//! match exactly.

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tessella_core::category::{collect_extension, Category};
use tessella_core::currency::{resolve_country, Currency};
use tessella_core::error::CoreError;
use tessella_core::order::{validate_draft, DomainChoice, OrderDraft, ThemeChoice};
use tessella_core::pricing::{self, coerce_duration, coerce_page_count};
use tessella_core::submission::SubmissionPhase;
use tessella_core::types::DbId;
use tessella_core::upload::UploadRole;
use tessella_db::models::custom_request::CreateCustomRequest;
use tessella_db::repositories::{CustomRequestRepo, TemplateRepo};
use tessella_storage::batch::{rollback_uploads, upload_batch, PendingUpload};

use crate::error::{AppError, AppResult};
use crate::middleware::admin::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Pricing shared by quote and submission
// ---------------------------------------------------------------------------

/// Price a configuration against a template looked up by name.
///
/// A lookup miss degrades to a zero price with a cleared currency label
/// rather than failing the request.
async fn price_for(
    pool: &tessella_db::DbPool,
    template_name: &str,
    currency: Currency,
    duration_months: i64,
    page_count: i64,
) -> AppResult<(f64, &'static str)> {
    Ok(
        match TemplateRepo::find_by_name(pool, template_name).await? {
            Some(template) => (
                pricing::quote(&template.rate_card(), currency, duration_months, page_count),
                currency.label(),
            ),
            None => (0.0, ""),
        },
    )
}

// ---------------------------------------------------------------------------
// Quote preview
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct QuoteRequest {
    pub template: String,
    pub country: Option<String>,
    pub duration_months: Option<i64>,
    pub page_count: Option<i64>,
    /// Client-issued sequence token, echoed verbatim. A client firing
    /// overlapping quote requests applies only the response carrying its
    /// latest token, eliminating stale-overwrite races.
    pub seq: Option<u64>,
}

#[derive(Debug, Serialize)]
pub struct QuoteResponse {
    pub price: f64,
    pub currency: &'static str,
    pub seq: Option<u64>,
}

/// POST /api/v1/orders/quote
///
/// Stateless live-preview quote, safe to call on every slider tick.
pub async fn quote_order(
    State(state): State<AppState>,
    Json(input): Json<QuoteRequest>,
) -> AppResult<impl IntoResponse> {
    let currency = resolve_country(input.country.as_deref().unwrap_or_default());
    let duration_months = coerce_duration(input.duration_months);
    let page_count = coerce_page_count(input.page_count);

    let (price, label) = price_for(
        &state.pool,
        &input.template,
        currency,
        duration_months,
        page_count,
    )
    .await?;

    Ok(Json(DataResponse {
        data: QuoteResponse {
            price,
            currency: label,
            seq: input.seq,
        },
    }))
}

// ---------------------------------------------------------------------------
// Multipart form parsing
// ---------------------------------------------------------------------------

/// Raw submission content: text fields plus files grouped by role slot.
struct SubmittedForm {
    fields: Map<String, Value>,
    social_handles: Vec<String>,
    logo: Option<PendingUpload>,
    media: Vec<PendingUpload>,
    other: Vec<PendingUpload>,
}

impl SubmittedForm {
    /// Files in upload order: logo first, then media in selection order,
    /// then other.
    fn into_upload_slots(self) -> (Map<String, Value>, Vec<String>, Vec<PendingUpload>) {
        let mut files = Vec::new();
        files.extend(self.logo);
        files.extend(self.media);
        files.extend(self.other);
        (self.fields, self.social_handles, files)
    }
}

async fn read_form(multipart: &mut Multipart) -> AppResult<SubmittedForm> {
    let mut form = SubmittedForm {
        fields: Map::new(),
        social_handles: Vec::new(),
        logo: None,
        media: Vec::new(),
        other: Vec::new(),
    };

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Malformed multipart body: {e}")))?
    {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        if let Some(file_name) = field.file_name().map(str::to_string) {
            let content_type = field.content_type().map(str::to_string);
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::BadRequest(format!("Failed to read file '{name}': {e}")))?
                .to_vec();

            // Browsers submit an empty part for an untouched file input.
            if file_name.is_empty() && bytes.is_empty() {
                continue;
            }

            let role = match name.as_str() {
                "logo" => UploadRole::Logo,
                "media" => UploadRole::Media,
                "other" => UploadRole::Other,
                _ => {
                    return Err(AppError::BadRequest(format!(
                        "Unknown file field '{name}'. Expected: logo, media, other"
                    )));
                }
            };
            let upload = PendingUpload {
                role,
                file_name,
                content_type,
                bytes,
            };
            match role {
                UploadRole::Logo => form.logo = Some(upload),
                UploadRole::Media => form.media.push(upload),
                UploadRole::Other => form.other.push(upload),
            }
        } else {
            let value = field
                .text()
                .await
                .map_err(|e| AppError::BadRequest(format!("Failed to read field '{name}': {e}")))?;
            if name == "social_handles" {
                if !value.trim().is_empty() {
                    form.social_handles.push(value);
                }
            } else {
                form.fields.insert(name, Value::String(value));
            }
        }
    }

    Ok(form)
}

/// Remove a text field, treating blank values as absent.
fn take_opt(fields: &mut Map<String, Value>, key: &str) -> Option<String> {
    match fields.remove(key) {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s),
        _ => None,
    }
}

/// Remove a numeric text field; unparseable input counts as absent and
/// falls back downstream to the documented default.
fn take_number(fields: &mut Map<String, Value>, key: &str) -> Option<i64> {
    take_opt(fields, key).and_then(|s| s.trim().parse().ok())
}

// ---------------------------------------------------------------------------
// Submission pipeline
// ---------------------------------------------------------------------------

/// POST /api/v1/orders
///
/// Multipart order submission. See the module docs for phase semantics.
pub async fn submit_order(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    let mut phase = SubmissionPhase::Validating;
    tracing::debug!(phase = phase.label(), "Order submission started");

    let form = read_form(&mut multipart).await?;
    let (mut fields, social_handles, files) = form.into_upload_slots();

    let category = Category::from_name(take_opt(&mut fields, "category").as_deref().unwrap_or(""))?;
    let domain_choice = match take_opt(&mut fields, "domain_choice") {
        Some(choice) => DomainChoice::from_name(&choice)?,
        None => DomainChoice::RegisteredForMe,
    };
    let theme_choice = match take_opt(&mut fields, "theme_choice") {
        Some(choice) => ThemeChoice::from_name(&choice)?,
        None => ThemeChoice::Default,
    };

    let draft = OrderDraft {
        name: take_opt(&mut fields, "name").unwrap_or_default(),
        email: take_opt(&mut fields, "email").unwrap_or_default(),
        phone: take_opt(&mut fields, "phone").unwrap_or_default(),
        category,
        template_name: take_opt(&mut fields, "template").unwrap_or_default(),
        country: take_opt(&mut fields, "country").unwrap_or_default(),
        duration_months: coerce_duration(take_number(&mut fields, "duration_months")),
        page_count: coerce_page_count(take_number(&mut fields, "page_count")),
        extra_pages: take_opt(&mut fields, "extra_pages"),
        domain_choice,
        domain_name: take_opt(&mut fields, "domain_name"),
        theme_choice,
        custom_color: take_opt(&mut fields, "custom_color"),
        social_handles,
        message: take_opt(&mut fields, "message"),
    };

    validate_draft(&draft)?;
    // Whatever text fields remain are extension candidates; collection
    // keeps only the selected category's declared fields.
    let extension = collect_extension(category, &fields)?;

    // -- Uploading --
    phase = SubmissionPhase::Uploading { completed: 0 };
    let submission_millis = chrono::Utc::now().timestamp_millis();
    let file_count = files.len();
    let uploaded = upload_batch(state.store.as_ref(), submission_millis, files)
        .await
        .map_err(|err| {
            tracing::warn!(phase = phase.label(), error = %err, "Order submission failed");
            AppError::from(err)
        })?;

    // -- Pricing --
    phase = SubmissionPhase::Pricing;
    let currency = resolve_country(&draft.country);
    let (price, _label) = price_for(
        &state.pool,
        &draft.template_name,
        currency,
        draft.duration_months,
        draft.page_count,
    )
    .await
    .map_err(|err| {
        tracing::warn!(phase = phase.label(), error = %err, "Order submission failed");
        err
    })?;

    // -- Persisting --
    phase = SubmissionPhase::Persisting;
    let record = CreateCustomRequest {
        name: draft.name,
        email: draft.email,
        phone: draft.phone,
        category: category.name().to_string(),
        template_name: draft.template_name,
        country: draft.country,
        currency: currency.label().to_string(),
        price,
        duration_months: draft.duration_months,
        page_count: draft.page_count,
        extra_pages: draft.extra_pages,
        domain_choice: domain_choice.name().to_string(),
        domain_name: draft.domain_name,
        theme_choice: theme_choice.name().to_string(),
        custom_color: draft.custom_color,
        social_handles: draft.social_handles,
        message: draft.message,
        extension: Value::Object(extension),
        file_urls: uploaded.iter().map(|f| f.url.clone()).collect(),
    };

    let order = match CustomRequestRepo::create(&state.pool, &record).await {
        Ok(order) => order,
        Err(err) => {
            tracing::warn!(
                phase = phase.label(),
                error = %err,
                uploaded = uploaded.len(),
                "Order insert failed; rolling back this submission's uploads",
            );
            rollback_uploads(state.store.as_ref(), &uploaded).await;
            return Err(err.into());
        }
    };

    phase = SubmissionPhase::Success;
    tracing::info!(
        phase = phase.label(),
        order_id = order.id,
        category = %order.category,
        price = order.price,
        currency = %order.currency,
        files = file_count,
        "Order submitted",
    );

    // Confirmation email is best-effort; a failure never fails the order.
    if let Some(mailer) = &state.mailer {
        if let Err(err) = mailer.send_confirmation(&order).await {
            tracing::warn!(order_id = order.id, error = %err, "Confirmation email failed");
        }
    }

    Ok((StatusCode::CREATED, Json(DataResponse { data: order })))
}

// ---------------------------------------------------------------------------
// Admin review
// ---------------------------------------------------------------------------

/// GET /api/v1/orders
///
/// List all orders, newest first. Admin only.
pub async fn list_orders(
    _admin: RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let orders = CustomRequestRepo::list(&state.pool).await?;

    Ok(Json(DataResponse { data: orders }))
}

/// GET /api/v1/orders/{id}
///
/// Get one order. Admin only.
pub async fn get_order(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let order = CustomRequestRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Order",
            id,
        }))?;

    Ok(Json(DataResponse { data: order }))
}

/// DELETE /api/v1/orders/{id}
///
/// Delete an order. Admin only. Uploaded objects are not removed; the
/// admin flow owns storage cleanup separately.
pub async fn delete_order(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let deleted = CustomRequestRepo::delete(&state.pool, id).await?;

    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Order",
            id,
        }));
    }

    tracing::info!(order_id = id, "Order deleted");

    Ok(StatusCode::NO_CONTENT)
}
