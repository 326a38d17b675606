//! Route definition for checkout session creation.

use axum::routing::post;
use axum::Router;

use crate::handlers::checkout;
use crate::state::AppState;

/// ```text
/// POST /checkout -> create_checkout
/// ```
pub fn checkout_router() -> Router<AppState> {
    Router::new().route("/checkout", post(checkout::create_checkout))
}
