//! HTTP handlers for the relay.
//!
//! Each generation handler validates its input, builds one provider payload,
//! makes exactly one provider call and answers `{result}`.

pub mod app;
pub mod chat;
pub mod generate;

use crate::models::gemini::GenerateContentRequest;
use crate::models::GenerateResponse;
use crate::services::extract_generated_text;
use crate::startup::AppState;
use axum::Json;
use service_core::error::AppError;

/// Send `request` to the provider and normalize whatever comes back.
async fn relay(
    state: &AppState,
    model: &str,
    request: &GenerateContentRequest,
) -> Result<Json<GenerateResponse>, AppError> {
    let response = state
        .provider
        .generate_content(model, request)
        .await
        .map_err(|e| {
            tracing::error!(model = %model, error = %e, "Provider call failed");
            AppError::from(e)
        })?;

    let result = extract_generated_text(&response);
    tracing::info!(model = %model, result_len = result.len(), "Generated content");

    Ok(Json(GenerateResponse { result }))
}
