//! Route definition for the AI assist flow.

use axum::routing::post;
use axum::Router;

use crate::handlers::assist;
use crate::state::AppState;

/// ```text
/// POST /assist -> assist
/// ```
pub fn assist_router() -> Router<AppState> {
    Router::new().route("/assist", post(assist::assist))
}
