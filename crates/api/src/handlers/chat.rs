//! Handlers for the support chat widget.
//!
//! Visitors are identified by email; their user row is created lazily on
//! the first message. Admin replies land in the same thread.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use tessella_core::error::CoreError;
use tessella_core::types::DbId;
use tessella_db::models::message::CreateMessage;
use tessella_db::models::user::CreateUser;
use tessella_db::repositories::{MessageRepo, UserRepo};
use validator::ValidateEmail;

use crate::error::{AppError, AppResult};
use crate::middleware::admin::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

const SENDER_VISITOR: &str = "visitor";
const SENDER_ADMIN: &str = "admin";

#[derive(Debug, Deserialize)]
pub struct PostMessageRequest {
    pub email: String,
    pub name: Option<String>,
    pub body: String,
}

/// POST /api/v1/chat/messages
///
/// Append a visitor message, creating the visitor on first contact.
pub async fn post_message(
    State(state): State<AppState>,
    Json(input): Json<PostMessageRequest>,
) -> AppResult<impl IntoResponse> {
    if !input.email.validate_email() {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Field 'email' is not a valid email address: '{}'",
            input.email
        ))));
    }
    if input.body.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Field 'body' is required".into(),
        )));
    }

    let user = UserRepo::get_or_create(
        &state.pool,
        &CreateUser {
            name: input.name.clone(),
            email: input.email.clone(),
        },
    )
    .await?;

    let message = MessageRepo::create(
        &state.pool,
        &CreateMessage {
            user_id: user.id,
            sender: SENDER_VISITOR.to_string(),
            body: input.body,
        },
    )
    .await?;

    tracing::info!(user_id = user.id, message_id = message.id, "Visitor message stored");

    Ok((StatusCode::CREATED, Json(DataResponse { data: message })))
}

#[derive(Debug, Deserialize)]
pub struct ThreadQuery {
    pub email: String,
}

/// GET /api/v1/chat/messages?email=
///
/// A visitor's thread, oldest first. A visitor with no history gets an
/// empty list, not a 404.
pub async fn get_thread(
    State(state): State<AppState>,
    Query(params): Query<ThreadQuery>,
) -> AppResult<impl IntoResponse> {
    let messages = match UserRepo::find_by_email(&state.pool, &params.email).await? {
        Some(user) => MessageRepo::list_for_user(&state.pool, user.id).await?,
        None => Vec::new(),
    };

    Ok(Json(DataResponse { data: messages }))
}

#[derive(Debug, Deserialize)]
pub struct ReplyRequest {
    pub body: String,
}

/// POST /api/v1/chat/messages/{user_id}/reply
///
/// Append an admin reply to a visitor's thread. Admin only.
pub async fn admin_reply(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Path(user_id): Path<DbId>,
    Json(input): Json<ReplyRequest>,
) -> AppResult<impl IntoResponse> {
    if input.body.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Field 'body' is required".into(),
        )));
    }

    if UserRepo::find_by_id(&state.pool, user_id).await?.is_none() {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: user_id,
        }));
    }

    let message = MessageRepo::create(
        &state.pool,
        &CreateMessage {
            user_id,
            sender: SENDER_ADMIN.to_string(),
            body: input.body,
        },
    )
    .await?;

    tracing::info!(user_id, message_id = message.id, "Admin reply stored");

    Ok((StatusCode::CREATED, Json(DataResponse { data: message })))
}
