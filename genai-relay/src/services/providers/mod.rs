//! AI provider abstractions and implementations.
//!
//! Handlers only see [`GenerativeProvider`], so the Gemini client can be
//! swapped for [`mock::MockProvider`] in tests.

pub mod gemini;
pub mod mock;

use crate::models::gemini::GenerateContentRequest;
use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// Error type for provider operations.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Rate limited: {0}")]
    RateLimited(String),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Trait for `generateContent`-style providers.
///
/// The response is returned untouched; callers pick the text out of it.
#[async_trait]
pub trait GenerativeProvider: Send + Sync {
    async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<Value, ProviderError>;
}

impl From<ProviderError> for service_core::error::AppError {
    fn from(err: ProviderError) -> Self {
        service_core::error::AppError::InternalError(anyhow::Error::new(err))
    }
}
