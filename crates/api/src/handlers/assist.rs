//! Handler for the AI-assisted answer flow.
//!
//! Loads the curated knowledge base and forwards the visitor's question
//! to the hosted completion endpoint; the model itself is an opaque
//! upstream service.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use tessella_core::error::CoreError;
use tessella_db::repositories::KnowledgeRepo;

use crate::assist::{AssistClient, AssistError};
use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AssistRequest {
    pub message: String,
    pub topic: Option<String>,
}

/// POST /api/v1/assist
pub async fn assist(
    State(state): State<AppState>,
    Json(input): Json<AssistRequest>,
) -> AppResult<impl IntoResponse> {
    if input.message.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Field 'message' is required".into(),
        )));
    }

    let Some(endpoint) = state.config.assist_url.clone() else {
        return Err(AppError::Unavailable(
            "AI assist is not configured on this deployment".into(),
        ));
    };

    let topic = input.topic.as_deref().unwrap_or("general");
    let knowledge_base: Vec<String> = KnowledgeRepo::list(&state.pool, input.topic.as_deref())
        .await?
        .into_iter()
        .map(|entry| entry.content)
        .collect();

    let client = AssistClient::new(state.http.clone(), endpoint);
    let reply = client
        .complete(&input.message, topic, &knowledge_base)
        .await
        .map_err(|err| match err {
            AssistError::Request(e) => AppError::Upstream(format!("Assist request failed: {e}")),
            api @ AssistError::Api { .. } => AppError::Upstream(api.to_string()),
        })?;

    Ok(Json(DataResponse { data: reply }))
}
