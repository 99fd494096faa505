//! Mock provider implementation for testing.

use super::{GenerativeProvider, ProviderError};
use crate::models::gemini::GenerateContentRequest;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Mutex;

/// A call as the mock received it.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub model: String,
    pub request: GenerateContentRequest,
}

enum Reply {
    Response(Value),
    Failure(String),
}

/// Returns a canned response (or error) and records every call.
pub struct MockProvider {
    reply: Reply,
    calls: Mutex<Vec<RecordedCall>>,
}

impl MockProvider {
    pub fn responding(response: Value) -> Self {
        Self {
            reply: Reply::Response(response),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Shorthand for a well-formed single-candidate reply.
    pub fn with_text(text: &str) -> Self {
        Self::responding(serde_json::json!({
            "candidates": [{"content": {"role": "model", "parts": [{"text": text}]}}]
        }))
    }

    pub fn failing(message: &str) -> Self {
        Self {
            reply: Reply::Failure(message.to_string()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl GenerativeProvider for MockProvider {
    async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<Value, ProviderError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(RecordedCall {
                model: model.to_string(),
                request: request.clone(),
            });
        }

        match &self.reply {
            Reply::Response(value) => Ok(value.clone()),
            Reply::Failure(message) => Err(ProviderError::ApiError(message.clone())),
        }
    }
}
