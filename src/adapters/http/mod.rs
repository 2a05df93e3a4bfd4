pub mod cors;
pub mod handlers;
pub mod responses;

use crate::adapters::gemini::GeminiClient;
use crate::config::GatewayConfig;
use crate::core::solver::SolveEngine;
use crate::core::LanguageModel;
use crate::utils::error::{GatewayError, Result};
use crate::utils::monitor::ProcessMonitor;
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Shared, read-only state handed to every request.
pub struct AppState {
    pub config: GatewayConfig,
    pub engine: Option<SolveEngine>,
    pub monitor: ProcessMonitor,
}

impl AppState {
    pub fn new(
        config: GatewayConfig,
        model: Option<Arc<dyn LanguageModel>>,
        monitor: ProcessMonitor,
    ) -> Self {
        Self {
            config,
            engine: model.map(SolveEngine::new),
            monitor,
        }
    }

    /// Builds the Gemini client from the config. A missing API key leaves the
    /// service running without a model so `/health` can report it.
    pub fn from_config(config: GatewayConfig, monitor: ProcessMonitor) -> Result<Self> {
        let model: Option<Arc<dyn LanguageModel>> = match GeminiClient::from_config(&config) {
            Ok(client) => {
                tracing::info!("🤖 AI client ready (model: {})", config.model);
                Some(Arc::new(client))
            }
            Err(GatewayError::UpstreamUnavailable { message }) => {
                tracing::warn!("⚠️ AI client not initialised: {}", message);
                None
            }
            Err(e) => return Err(e),
        };

        Ok(Self::new(config, model, monitor))
    }
}

pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = cors::build_cors_layer(&state.config);

    Router::new()
        .route("/", get(handlers::root))
        .route("/solve", post(handlers::solve))
        .route("/health", get(handlers::health))
        .route("/operations", get(handlers::operations))
        .route("/examples", get(handlers::examples))
        .fallback(handlers::not_found)
        .method_not_allowed_fallback(handlers::not_found)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Binds the configured address and serves until Ctrl-C.
pub async fn serve(state: AppState) -> Result<()> {
    let addr = state.config.bind_address();
    let app = build_router(Arc::new(state));

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("🚀 Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
