#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Request, Response},
    Router,
};
use genai_relay::services::providers::mock::MockProvider;
use genai_relay::{build_router, AppState, RelaySettings};
use std::path::PathBuf;
use std::sync::Arc;

pub const BOUNDARY: &str = "relay-test-boundary";

pub fn settings() -> RelaySettings {
    RelaySettings {
        chat_model_key: "flash".to_string(),
        system_instruction: "You are a test assistant.".to_string(),
        static_dir: PathBuf::from("does-not-exist"),
        max_upload_bytes: 1024 * 1024,
    }
}

/// Router wired to `provider`; the provider handle is returned for assertions.
pub fn app_with(provider: MockProvider, settings: RelaySettings) -> (Router, Arc<MockProvider>) {
    let provider = Arc::new(provider);
    let state = AppState::new(provider.clone(), settings);
    (build_router(state), provider)
}

pub fn app(provider: MockProvider) -> (Router, Arc<MockProvider>) {
    app_with(provider, settings())
}

pub fn json_request(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// A multipart part: (field name, optional (filename, content type), bytes).
pub type Part<'a> = (&'a str, Option<(&'a str, &'a str)>, &'a [u8]);

pub fn multipart_request(uri: &str, parts: &[Part<'_>]) -> Request<Body> {
    let mut body: Vec<u8> = Vec::new();
    for (name, file, data) in parts {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        match file {
            Some((filename, content_type)) => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: {}\r\n\r\n",
                        name, filename, content_type
                    )
                    .as_bytes(),
                );
            }
            None => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", name)
                        .as_bytes(),
                );
            }
        }
        body.extend_from_slice(data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());

    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    serde_json::from_slice(&bytes).expect("Body is not JSON")
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    String::from_utf8(bytes.to_vec()).expect("Body is not UTF-8")
}
