//! Request/response types for the relay's HTTP surface and the Gemini
//! `generateContent` payload it builds.

pub mod gemini;

use serde::{Deserialize, Serialize};

/// Successful reply for every generation endpoint.
#[derive(Debug, Serialize, Deserialize)]
pub struct GenerateResponse {
    pub result: String,
}

/// Speaker of a chat turn. `assistant` is what browser clients usually send;
/// Gemini only understands `model`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    #[serde(alias = "assistant")]
    Model,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

/// An uploaded file reduced to what the provider needs.
#[derive(Debug, Clone)]
pub struct UploadedImage {
    pub data: Vec<u8>,
    pub mime_type: String,
}
