//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum router with all handlers
//! - Wire up middleware (tracing, request ID, timeout, metrics, auth)
//! - Bind the server to a listener and serve until shutdown
//!
//! # Design Decisions
//! - The authentication gate wraps the whole router: every route is
//!   protected, there is no unauthenticated side channel
//! - Peer addresses come from `ConnectInfo`, so the server must be
//!   driven through `into_make_service_with_connect_info`

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    body::Body,
    http::Request,
    middleware,
    middleware::Next,
    response::Response,
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::auth::middleware::AuthState;
use crate::config::GatewayConfig;
use crate::engine::EngineManager;
use crate::http::handlers;
use crate::http::request::RequestIdLayer;
use crate::observability::metrics;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub engines: Arc<EngineManager>,
}

/// HTTP server for the gateway.
pub struct HttpServer {
    router: Router,
    engines: Arc<EngineManager>,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: GatewayConfig) -> Self {
        let engines = Arc::new(EngineManager::new(config.engine.clone()));
        let state = AppState {
            engines: engines.clone(),
        };
        let auth_state = AuthState::from_config(&config.auth);

        let router = Self::build_router(&config, state, auth_state);
        Self { router, engines }
    }

    /// Handle to the engine lifecycle, used for startup
    /// auto-initialization and by tests to install fakes.
    pub fn engines(&self) -> Arc<EngineManager> {
        self.engines.clone()
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &GatewayConfig, state: AppState, auth_state: AuthState) -> Router {
        Router::new()
            .route("/ocr", post(handlers::recognize))
            .route("/initialize", post(handlers::initialize))
            .route("/health", get(handlers::health))
            .with_state(state)
            .layer(middleware::from_fn_with_state(
                auth_state,
                crate::auth::middleware::gate,
            ))
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.timeouts.request_secs,
            )))
            .layer(middleware::from_fn(track_requests))
            .layer(RequestIdLayer)
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        let app = self.router.into_make_service_with_connect_info::<SocketAddr>();

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Record per-request metrics around the rest of the stack.
async fn track_requests(request: Request<Body>, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().to_string();
    let path = request.uri().path().to_string();

    let response = next.run(request).await;

    metrics::record_request(&method, &path, response.status().as_u16(), start);
    response
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to install Ctrl+C handler");
        return;
    }
    tracing::info!("Shutdown signal received");
}
