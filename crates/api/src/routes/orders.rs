//! Route definitions for quotes and order submission.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::orders;
use crate::state::AppState;

/// Order routes mounted at `/orders`.
///
/// ```text
/// POST   /        -> submit_order (multipart)
/// GET    /        -> list_orders (admin)
/// POST   /quote   -> quote_order
/// GET    /{id}    -> get_order (admin)
/// DELETE /{id}    -> delete_order (admin)
/// ```
pub fn orders_router() -> Router<AppState> {
    Router::new()
        .route("/", post(orders::submit_order).get(orders::list_orders))
        .route("/quote", post(orders::quote_order))
        .route(
            "/{id}",
            get(orders::get_order).delete(orders::delete_order),
        )
}
