//! Route definitions for the template catalog.

use axum::routing::get;
use axum::Router;

use crate::handlers::templates;
use crate::state::AppState;

/// Template routes mounted at `/templates`.
///
/// ```text
/// GET    /             -> list_templates
/// POST   /             -> create_template (admin)
/// GET    /{id}         -> get_template
/// PUT    /{id}         -> update_template (admin)
/// DELETE /{id}         -> delete_template (admin)
/// GET    /{id}/rates   -> get_template_rates
/// ```
pub fn templates_router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(templates::list_templates).post(templates::create_template),
        )
        .route(
            "/{id}",
            get(templates::get_template)
                .put(templates::update_template)
                .delete(templates::delete_template),
        )
        .route("/{id}/rates", get(templates::get_template_rates))
}
