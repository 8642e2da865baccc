//! Application startup and lifecycle management.

use crate::config::BfhlConfig;
use crate::handlers;
use crate::services::providers::gemini::GeminiTextProvider;
use crate::services::providers::TextProvider;
use crate::services::Dispatcher;
use axum::{
    body::Body,
    http::Request,
    middleware::from_fn,
    routing::{get, post},
    Router,
};
use service_core::error::AppError;
use service_core::middleware::{
    make_request_span, metrics_middleware, request_id_middleware, security_headers_middleware,
};
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

/// Shared application state. Read-only after startup.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<BfhlConfig>,
    pub dispatcher: Dispatcher,
}

impl AppState {
    pub fn new(config: BfhlConfig, text_provider: Arc<dyn TextProvider>) -> Self {
        Self {
            config: Arc::new(config),
            dispatcher: Dispatcher::new(text_provider),
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/ready", get(handlers::readiness_check))
        .route("/metrics", get(handlers::metrics))
        .route("/bfhl", post(handlers::bfhl))
        .layer(from_fn(metrics_middleware))
        .layer(from_fn(security_headers_middleware))
        .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
            make_request_span(request)
        }))
        .layer(from_fn(request_id_middleware))
        .with_state(state)
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    router: Router,
}

impl Application {
    /// Build the application with the Gemini provider.
    pub async fn build(config: BfhlConfig) -> Result<Self, AppError> {
        let text_provider = GeminiTextProvider::new(&config.gemini).map_err(|e| {
            tracing::error!("Failed to initialize Gemini text provider: {}", e);
            AppError::ConfigError(anyhow::Error::new(e))
        })?;

        if text_provider.is_configured() {
            tracing::info!(
                model = %config.gemini.model,
                timeout_secs = config.gemini.timeout.as_secs(),
                "Initialized Gemini text provider"
            );
        } else {
            tracing::warn!("GEMINI_API_KEY not set - AI requests will be rejected");
        }

        Self::build_with_provider(config, Arc::new(text_provider)).await
    }

    /// Build the application around any text provider.
    pub async fn build_with_provider(
        config: BfhlConfig,
        text_provider: Arc<dyn TextProvider>,
    ) -> Result<Self, AppError> {
        if config.official_email.is_none() {
            tracing::warn!("OFFICIAL_EMAIL not set - responses will carry null");
        }

        // Port 0 = random port for testing
        let addr = config.common.socket_addr();
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind TCP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!(provider = text_provider.name(), "Listening on {}", port);

        let router = build_router(AppState::new(config, text_provider));

        Ok(Self {
            port,
            listener,
            router,
        })
    }

    /// Get the port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Run the application until stopped.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        axum::serve(self.listener, self.router).await
    }

    /// Run until `signal` resolves, then stop accepting connections and let
    /// in-flight requests finish.
    pub async fn run_with_graceful_shutdown<F>(self, signal: F) -> std::io::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(signal)
            .await
    }
}
