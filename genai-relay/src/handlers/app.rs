use crate::startup::AppState;
use axum::{
    extract::State,
    response::{Html, IntoResponse, Response},
    Json,
};
use serde_json::json;

pub const GREETING: &str = "Hello World!";

/// `GET /`: the static UI's `index.html` when present, else a greeting.
pub async fn index(State(state): State<AppState>) -> Response {
    let index_path = state.settings.static_dir.join("index.html");

    match tokio::fs::read_to_string(&index_path).await {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            tracing::debug!(path = %index_path.display(), error = %e, "No index.html, sending greeting");
            GREETING.into_response()
        }
    }
}

/// Liveness check. The provider is not contacted.
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "genai-relay",
        "version": env!("CARGO_PKG_VERSION")
    }))
}
