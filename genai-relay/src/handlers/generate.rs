use super::relay;
use crate::models::{GenerateResponse, UploadedImage};
use crate::services::{model_resolver, translator};
use crate::startup::AppState;
use axum::{
    extract::{multipart::MultipartRejection, rejection::JsonRejection, Multipart, State},
    Json,
};
use serde_json::Value;
use service_core::error::AppError;

pub const PROMPT_REQUIRED: &str = "Prompt is required";
pub const IMAGE_REQUIRED: &str = "Image is required";

const DEFAULT_IMAGE_MIME: &str = "application/octet-stream";

/// `POST /generate-text`
pub async fn generate_text(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<GenerateResponse>, AppError> {
    let prompt = payload
        .ok()
        .and_then(|Json(body)| non_empty(body.get("prompt").and_then(Value::as_str)))
        .ok_or_else(|| AppError::bad_request(PROMPT_REQUIRED))?;

    let request = translator::text_request(&prompt);
    relay(&state, model_resolver::DEFAULT_MODEL, &request).await
}

/// `POST /generate-text-from-image`, multipart with `prompt` and `image`.
pub async fn generate_text_from_image(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<GenerateResponse>, AppError> {
    let mut multipart = multipart.map_err(|_| AppError::bad_request(PROMPT_REQUIRED))?;

    let mut prompt: Option<String> = None;
    let mut image: Option<UploadedImage> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        AppError::BadRequest(anyhow::anyhow!("Invalid multipart body: {}", e))
    })? {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("prompt") => {
                let text = field.text().await.map_err(|e| {
                    AppError::BadRequest(anyhow::anyhow!("Failed to read prompt: {}", e))
                })?;
                // First non-empty prompt wins; later duplicates are ignored.
                if prompt.is_none() {
                    prompt = non_empty(Some(&text));
                }
            }
            // Only a file part counts as the upload.
            Some("image") if field.file_name().is_some() => {
                let mime_type = field
                    .content_type()
                    .unwrap_or(DEFAULT_IMAGE_MIME)
                    .to_string();
                let data = field.bytes().await.map_err(|e| {
                    AppError::BadRequest(anyhow::anyhow!("Failed to read image: {}", e))
                })?;
                image = Some(UploadedImage {
                    data: data.to_vec(),
                    mime_type,
                });
            }
            _ => {}
        }
    }

    let prompt = prompt.ok_or_else(|| AppError::bad_request(PROMPT_REQUIRED))?;
    let image = image.ok_or_else(|| AppError::bad_request(IMAGE_REQUIRED))?;

    tracing::debug!(
        mime_type = %image.mime_type,
        image_bytes = image.data.len(),
        "Received image upload"
    );

    let request = translator::image_request(&prompt, &image);
    relay(&state, model_resolver::DEFAULT_MODEL, &request).await
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|s| !s.is_empty()).map(str::to_string)
}
