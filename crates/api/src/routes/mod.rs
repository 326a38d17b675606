pub mod assist;
pub mod chat;
pub mod checkout;
pub mod health;
pub mod knowledge;
pub mod orders;
pub mod templates;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /templates                       list (public), create (admin)
/// /templates/{id}                  get (public), update, delete (admin)
/// /templates/{id}/rates            rate lookup for the quote widget
///
/// /orders                          submit (public, multipart), list (admin)
/// /orders/quote                    live price preview (public)
/// /orders/{id}                     get, delete (admin)
///
/// /chat/messages                   post visitor message, read thread
/// /chat/messages/{user_id}/reply   admin reply
///
/// /knowledge                       list (public), create (admin)
/// /knowledge/{id}                  update, delete (admin)
///
/// /assist                          AI-assisted answer (public)
/// /checkout                        payment session creation (public)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/templates", templates::templates_router())
        .nest("/orders", orders::orders_router())
        .nest("/chat", chat::chat_router())
        .nest("/knowledge", knowledge::knowledge_router())
        .merge(assist::assist_router())
        .merge(checkout::checkout_router())
}
