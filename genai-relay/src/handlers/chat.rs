use super::relay;
use crate::models::{ChatMessage, GenerateResponse};
use crate::services::{model_resolver, translator};
use crate::startup::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde_json::Value;
use service_core::error::AppError;

/// `POST /chat` with `{messages: [{role, content}, ...], model?}`.
pub async fn chat(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<GenerateResponse>, AppError> {
    let Json(body) = payload.map_err(|e| {
        AppError::BadRequest(anyhow::anyhow!("Request body is required: {}", e.body_text()))
    })?;

    let messages = parse_messages(&body)?;

    let model_key = body
        .get("model")
        .and_then(Value::as_str)
        .unwrap_or(state.settings.chat_model_key.as_str());
    let model = model_resolver::resolve(model_key);

    let request = translator::chat_request(&messages, &state.settings.system_instruction);
    relay(&state, model, &request).await
}

fn parse_messages(body: &Value) -> Result<Vec<ChatMessage>, AppError> {
    let raw = body
        .get("messages")
        .filter(|v| !v.is_null())
        .ok_or_else(|| AppError::bad_request("Messages are required"))?;

    if !raw.is_array() {
        return Err(AppError::bad_request("Messages must be an array"));
    }

    let messages: Vec<ChatMessage> = serde_json::from_value(raw.clone())
        .map_err(|e| AppError::BadRequest(anyhow::anyhow!("Invalid message: {}", e)))?;

    if messages.is_empty() {
        return Err(AppError::bad_request("Messages must not be empty"));
    }

    Ok(messages)
}
