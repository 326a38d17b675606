//! Route definitions for the knowledge base.

use axum::routing::get;
use axum::Router;

use crate::handlers::knowledge;
use crate::state::AppState;

/// Knowledge routes mounted at `/knowledge`.
///
/// ```text
/// GET    /        -> list_entries
/// POST   /        -> create_entry (admin)
/// PUT    /{id}    -> update_entry (admin)
/// DELETE /{id}    -> delete_entry (admin)
/// ```
pub fn knowledge_router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(knowledge::list_entries).post(knowledge::create_entry),
        )
        .route(
            "/{id}",
            axum::routing::put(knowledge::update_entry).delete(knowledge::delete_entry),
        )
}
