//! Application startup and lifecycle management.
//!
//! Builds the router, binds the listener (port 0 picks a random port for
//! tests), and runs the server to completion.

use crate::config::CardConfig;
use crate::handlers::{generate, health_check, list_models, probe_models};
use crate::services::providers::gemini::{GeminiConfig, GeminiImageProvider};
use crate::services::providers::ImageProvider;
use axum::http::{header, Method};
use axum::middleware::from_fn;
use axum::routing::{get, post};
use axum::Router;
use service_core::error::AppError;
use service_core::middleware::tracing::request_id_middleware;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Shared application state. Read-only after startup; requests never
/// mutate it.
#[derive(Clone)]
pub struct AppState {
    pub config: CardConfig,
    pub provider: Arc<dyn ImageProvider>,
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    state: AppState,
}

impl Application {
    /// Build the application with the Gemini provider.
    pub async fn build(config: CardConfig) -> Result<Self, AppError> {
        let gemini_config = GeminiConfig {
            api_key: config.google.api_key.clone(),
            model: config.models.image_model.clone(),
        };
        let provider: Arc<dyn ImageProvider> = Arc::new(GeminiImageProvider::new(gemini_config));

        tracing::info!(
            model = %config.models.image_model,
            "Initialized Gemini image provider"
        );

        Self::build_with_provider(config, provider).await
    }

    /// Build the application with an explicit provider. Used by tests to
    /// substitute a mock.
    pub async fn build_with_provider(
        config: CardConfig,
        provider: Arc<dyn ImageProvider>,
    ) -> Result<Self, AppError> {
        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        let state = AppState { config, provider };

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

    /// Run the application until stopped.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        let router = build_router(self.state);
        axum::serve(self.listener, router).await
    }
}

pub fn build_router(state: AppState) -> Router {
    // Permissive CORS: this sits behind a static frontend on another origin.
    // The layer also answers OPTIONS preflights with 200 and an empty body,
    // before the request reaches method routing.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/generate", post(generate))
        .route("/health", get(health_check))
        .route("/models", get(list_models))
        .route("/models/probe", get(probe_models))
        .with_state(state)
        .layer(cors)
        .layer(from_fn(request_id_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                let request_id = request
                    .headers()
                    .get("x-request-id")
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("-");

                tracing::info_span!(
                    "http_request",
                    request_id = %request_id,
                    method = %request.method(),
                    uri = %request.uri(),
                )
            }),
        )
}
