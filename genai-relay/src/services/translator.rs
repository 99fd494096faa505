//! Builds Gemini `generateContent` payloads from validated endpoint input.

use crate::models::gemini::{Content, ContentPart, GenerateContentRequest, InlineData};
use crate::models::{ChatMessage, ChatRole, UploadedImage};
use base64::{engine::general_purpose::STANDARD, Engine as _};

/// A bare prompt becomes a single user turn.
pub fn text_request(prompt: &str) -> GenerateContentRequest {
    GenerateContentRequest {
        contents: vec![Content::text(Some(ChatRole::User), prompt)],
        system_instruction: None,
    }
}

/// Prompt text first, then the image as base64 inline data.
pub fn image_request(prompt: &str, image: &UploadedImage) -> GenerateContentRequest {
    let parts = vec![
        ContentPart::Text {
            text: prompt.to_string(),
        },
        ContentPart::InlineData {
            inline_data: InlineData {
                mime_type: image.mime_type.clone(),
                data: STANDARD.encode(&image.data),
            },
        },
    ];

    GenerateContentRequest {
        contents: vec![Content {
            role: Some(ChatRole::User),
            parts,
        }],
        system_instruction: None,
    }
}

/// One turn per message, in order, plus the system instruction.
pub fn chat_request(messages: &[ChatMessage], system_instruction: &str) -> GenerateContentRequest {
    GenerateContentRequest {
        contents: messages
            .iter()
            .map(|msg| Content::text(Some(msg.role), msg.content.as_str()))
            .collect(),
        system_instruction: Some(Content::text(None, system_instruction)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_text_request_shape() {
        let payload = serde_json::to_value(text_request("hello")).unwrap();
        assert_eq!(
            payload,
            json!({"contents": [{"role": "user", "parts": [{"text": "hello"}]}]})
        );
    }

    #[test]
    fn test_image_request_has_text_then_inline_data() {
        let image = UploadedImage {
            data: b"png-bytes".to_vec(),
            mime_type: "image/png".to_string(),
        };
        let payload = serde_json::to_value(image_request("describe", &image)).unwrap();

        let parts = &payload["contents"][0]["parts"];
        assert_eq!(parts[0]["text"], "describe");
        assert_eq!(parts[1]["inlineData"]["mimeType"], "image/png");
        assert_eq!(parts[1]["inlineData"]["data"], "cG5nLWJ5dGVz");
        assert!(payload.get("systemInstruction").is_none());
    }

    #[test]
    fn test_chat_request_preserves_order_and_roles() {
        let messages = vec![
            ChatMessage {
                role: ChatRole::User,
                content: "hi".to_string(),
            },
            ChatMessage {
                role: ChatRole::Model,
                content: "hello!".to_string(),
            },
            ChatMessage {
                role: ChatRole::User,
                content: "how are you?".to_string(),
            },
        ];
        let payload = serde_json::to_value(chat_request(&messages, "be brief")).unwrap();

        let contents = payload["contents"].as_array().unwrap();
        assert_eq!(contents.len(), 3);
        assert_eq!(contents[0]["role"], "user");
        assert_eq!(contents[1]["role"], "model");
        assert_eq!(contents[2]["parts"][0]["text"], "how are you?");
        assert_eq!(
            payload["systemInstruction"],
            json!({"parts": [{"text": "be brief"}]})
        );
    }
}
