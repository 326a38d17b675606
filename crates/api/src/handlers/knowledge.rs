//! Handlers for the knowledge base feeding the AI assist flow.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use tessella_core::error::CoreError;
use tessella_core::types::DbId;
use tessella_db::models::knowledge::{CreateKnowledgeEntry, UpdateKnowledgeEntry};
use tessella_db::repositories::KnowledgeRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::admin::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct KnowledgeListParams {
    pub topic: Option<String>,
}

/// GET /api/v1/knowledge
///
/// List entries, optionally filtered by topic.
pub async fn list_entries(
    State(state): State<AppState>,
    Query(params): Query<KnowledgeListParams>,
) -> AppResult<impl IntoResponse> {
    let entries = KnowledgeRepo::list(&state.pool, params.topic.as_deref()).await?;

    Ok(Json(DataResponse { data: entries }))
}

/// POST /api/v1/knowledge
///
/// Create an entry. Admin only.
pub async fn create_entry(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateKnowledgeEntry>,
) -> AppResult<impl IntoResponse> {
    if input.topic.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Field 'topic' is required".into(),
        )));
    }
    if input.content.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Field 'content' is required".into(),
        )));
    }

    let entry = KnowledgeRepo::create(&state.pool, &input).await?;

    tracing::info!(entry_id = entry.id, topic = %entry.topic, "Knowledge entry created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: entry })))
}

/// PUT /api/v1/knowledge/{id}
///
/// Update an entry. Admin only.
pub async fn update_entry(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateKnowledgeEntry>,
) -> AppResult<impl IntoResponse> {
    let entry = KnowledgeRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Knowledge entry",
            id,
        }))?;

    tracing::info!(entry_id = id, "Knowledge entry updated");

    Ok(Json(DataResponse { data: entry }))
}

/// DELETE /api/v1/knowledge/{id}
///
/// Delete an entry. Admin only.
pub async fn delete_entry(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let deleted = KnowledgeRepo::delete(&state.pool, id).await?;

    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Knowledge entry",
            id,
        }));
    }

    tracing::info!(entry_id = id, "Knowledge entry deleted");

    Ok(StatusCode::NO_CONTENT)
}
