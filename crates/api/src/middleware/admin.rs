//! Shared-token admin guard for Axum handlers.
//!
//! The back-office authenticates with a single shared secret passed in
//! the `x-admin-token` header and matched against `ADMIN_TOKEN`. When no
//! token is configured, the admin API is disabled outright.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use tessella_core::error::CoreError;

use crate::error::AppError;
use crate::state::AppState;

/// Marker extractor for admin-only handlers.
///
/// Use as an extractor parameter in any handler that requires the admin
/// token:
///
/// ```ignore
/// async fn my_handler(_admin: RequireAdmin) -> AppResult<Json<()>> { ... }
/// ```
#[derive(Debug, Clone)]
pub struct RequireAdmin;

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Some(expected) = state.config.admin_token.as_deref() else {
            return Err(AppError::Core(CoreError::Forbidden(
                "Admin API is not configured on this deployment".into(),
            )));
        };

        let supplied = parts
            .headers
            .get("x-admin-token")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(
                    "Missing x-admin-token header".into(),
                ))
            })?;

        if supplied != expected {
            return Err(AppError::Core(CoreError::Forbidden(
                "Invalid admin token".into(),
            )));
        }

        Ok(RequireAdmin)
    }
}
