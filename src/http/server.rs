//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum Router serving the shot-list handler on every path
//! - Wire up middleware (tracing, limits, timeout, request ID, CORS)
//! - Bind server to listener and shut down gracefully

use std::sync::Arc;
use std::time::Duration;

use axum::{extract::DefaultBodyLimit, middleware::map_response, routing::any, Router};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    catch_panic::CatchPanicLayer, limit::RequestBodyLimitLayer, timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::ServiceConfig;
use crate::http::error::{json_rejections, panic_response};
use crate::http::handler::{generate_shots, AppState};
use crate::http::request::with_request_id;
use crate::http::response::with_cors;
use crate::upstream::{CompletionClient, OpenAiClient};

/// HTTP server for the shot-list service.
pub struct HttpServer {
    router: Router,
    config: ServiceConfig,
}

impl HttpServer {
    /// Create a server that calls the configured completion endpoint.
    pub fn new(config: ServiceConfig) -> Self {
        let client = Arc::new(OpenAiClient::new(config.upstream.endpoint.clone()));
        Self::with_client(config, client)
    }

    /// Create a server around any completion client.
    pub fn with_client(config: ServiceConfig, client: Arc<dyn CompletionClient>) -> Self {
        let state = AppState::new(config.generation_settings(), client);
        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &ServiceConfig, state: AppState) -> Router {
        let router = Router::new()
            .route("/", any(generate_shots))
            .route("/{*path}", any(generate_shots))
            .with_state(state)
            .layer(CatchPanicLayer::custom(panic_response))
            .layer(DefaultBodyLimit::disable())
            .layer(RequestBodyLimitLayer::new(config.limits.max_body_bytes))
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(map_response(json_rejections))
            .layer(TraceLayer::new_for_http());

        with_cors(with_request_id(router))
    }

    /// The fully layered router, for driving requests without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            model = %self.config.upstream.model,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
