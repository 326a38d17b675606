//! Route definitions for the support chat.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::chat;
use crate::state::AppState;

/// Chat routes mounted at `/chat`.
///
/// ```text
/// POST /messages                    -> post_message
/// GET  /messages?email=             -> get_thread
/// POST /messages/{user_id}/reply    -> admin_reply (admin)
/// ```
pub fn chat_router() -> Router<AppState> {
    Router::new()
        .route("/messages", post(chat::post_message).get(chat::get_thread))
        .route("/messages/{user_id}/reply", post(chat::admin_reply))
}
