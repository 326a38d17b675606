//! Handler for payment checkout session creation.
//!
//! The payment provider is an opaque POST target returning a redirect
//! URL; this handler validates the request and forwards it verbatim.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use tessella_core::error::CoreError;
use validator::ValidateEmail;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize, Serialize)]
pub struct CheckoutRequest {
    pub amount: f64,
    pub currency: String,
    pub email: String,
    pub reference: Option<String>,
}

/// POST /api/v1/checkout
pub async fn create_checkout(
    State(state): State<AppState>,
    Json(input): Json<CheckoutRequest>,
) -> AppResult<impl IntoResponse> {
    if input.amount <= 0.0 {
        return Err(AppError::Core(CoreError::Validation(
            "Field 'amount' must be positive".into(),
        )));
    }
    if !input.email.validate_email() {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Field 'email' is not a valid email address: '{}'",
            input.email
        ))));
    }

    let Some(endpoint) = state.config.checkout_url.clone() else {
        return Err(AppError::Unavailable(
            "Checkout is not configured on this deployment".into(),
        ));
    };

    let response = state
        .http
        .post(&endpoint)
        .json(&input)
        .send()
        .await
        .map_err(|e| AppError::Upstream(format!("Checkout request failed: {e}")))?;

    let status = response.status();
    if !status.is_success() {
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<unreadable body>".to_string());
        return Err(AppError::Upstream(format!(
            "Checkout endpoint error ({status}): {body}"
        )));
    }

    let payload = response
        .json::<serde_json::Value>()
        .await
        .map_err(|e| AppError::Upstream(format!("Checkout response was not JSON: {e}")))?;

    Ok(Json(DataResponse { data: payload }))
}
