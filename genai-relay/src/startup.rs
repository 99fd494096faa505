//! Application startup and lifecycle management.

use crate::config::RelayConfig;
use crate::handlers::{
    app::{health_check, index},
    chat::chat,
    generate::{generate_text, generate_text_from_image},
};
use crate::services::providers::gemini::{GeminiConfig, GeminiProvider};
use crate::services::GenerativeProvider;
use axum::{
    extract::DefaultBodyLimit,
    middleware::from_fn,
    routing::{get, post},
    Router,
};
use service_core::error::AppError;
use service_core::middleware::tracing::{http_request_span, request_id_middleware};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

/// Read-only knobs the handlers need.
#[derive(Debug, Clone)]
pub struct RelaySettings {
    pub chat_model_key: String,
    pub system_instruction: String,
    pub static_dir: PathBuf,
    pub max_upload_bytes: usize,
}

impl From<&RelayConfig> for RelaySettings {
    fn from(config: &RelayConfig) -> Self {
        Self {
            chat_model_key: config.chat.model_key.clone(),
            system_instruction: config.chat.system_instruction.clone(),
            static_dir: config.server.static_dir.clone(),
            max_upload_bytes: config.server.max_upload_bytes,
        }
    }
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub provider: Arc<dyn GenerativeProvider>,
    pub settings: Arc<RelaySettings>,
}

impl AppState {
    pub fn new(provider: Arc<dyn GenerativeProvider>, settings: RelaySettings) -> Self {
        Self {
            provider,
            settings: Arc::new(settings),
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    let upload_limit = DefaultBodyLimit::max(state.settings.max_upload_bytes);
    let static_files = ServeDir::new(&state.settings.static_dir);

    Router::new()
        .route("/", get(index))
        .route("/health", get(health_check))
        .route("/generate-text", post(generate_text))
        .route(
            "/generate-text-from-image",
            post(generate_text_from_image).layer(upload_limit),
        )
        .route("/chat", post(chat))
        .fallback_service(static_files)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http().make_span_with(http_request_span::<axum::body::Body>))
        .layer(from_fn(request_id_middleware))
        .with_state(state)
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    state: AppState,
}

impl Application {
    /// Build the application with the Gemini provider.
    pub async fn build(config: RelayConfig) -> Result<Self, AppError> {
        if config.google.api_key.is_none() {
            tracing::warn!("No Gemini API key configured; generation requests will fail");
        }

        let provider = GeminiProvider::new(GeminiConfig {
            api_key: config.google.api_key.clone(),
            api_base: config.google.api_base.clone(),
        })
        .map_err(|e| AppError::ConfigError(anyhow::Error::new(e)))?;

        tracing::info!(
            api_base = %config.google.api_base,
            chat_model = %crate::services::model_resolver::resolve(&config.chat.model_key),
            "Initialized Gemini provider"
        );

        Self::build_with_provider(config, Arc::new(provider)).await
    }

    /// Build the application around an already constructed provider.
    pub async fn build_with_provider(
        config: RelayConfig,
        provider: Arc<dyn GenerativeProvider>,
    ) -> Result<Self, AppError> {
        let state = AppState::new(provider, RelaySettings::from(&config));

        // Port 0 = random port for testing
        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind HTTP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Server listening on port {}", port);

        Ok(Self {
            port,
            listener,
            state,
        })
    }

    /// Get the port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Serve until SIGINT/SIGTERM.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        let router = build_router(self.state);

        axum::serve(self.listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| {
                tracing::error!("HTTP server error: {}", e);
                std::io::Error::other(format!("HTTP server error: {}", e))
            })
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
