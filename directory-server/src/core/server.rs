//! Server Implementation
//!
//! Router assembly and the HTTP listener.

use axum::{Router, extract::DefaultBodyLimit, middleware, routing::get};
use tokio::net::TcpListener;
use tower_http::{compression::CompressionLayer, cors::CorsLayer};

use crate::api;
use crate::core::{Config, Result, ServerState};
use crate::middleware::log_request;
use crate::services::images::MAX_FILE_SIZE;

/// Request body limit: one full-size image plus the form fields
pub const MAX_BODY_SIZE: usize = MAX_FILE_SIZE + 1024 * 1024;

/// Build the complete application router
///
/// Public: `/`, `/health*`, `/api/signup`, `/api/login`, `/uploads/*`.
/// Everything under `/api/employees` requires a bearer token. Unknown paths
/// and unsupported methods on known paths share the structured 404.
pub fn build_router(state: ServerState) -> Router {
    Router::<ServerState>::new()
        .route("/", get(api::root::index))
        .merge(api::health::router())
        .merge(api::auth::router())
        .merge(api::upload::router())
        .merge(api::employees::router(state.clone()))
        .method_not_allowed_fallback(api::root::not_found)
        .fallback(api::root::not_found)
        .with_state(state)
        .layer(DefaultBodyLimit::max(MAX_BODY_SIZE))
        .layer(CorsLayer::permissive())
        .layer(CompressionLayer::new())
        .layer(middleware::from_fn(log_request))
}

/// HTTP Server
pub struct Server {
    config: Config,
    state: Option<ServerState>,
}

impl Server {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            state: None,
        }
    }

    /// Create server with existing state
    pub fn with_state(config: Config, state: ServerState) -> Self {
        Self {
            config,
            state: Some(state),
        }
    }

    /// Bind the configured address and serve until Ctrl+C
    pub async fn run(&self) -> Result<()> {
        let state = match &self.state {
            Some(s) => s.clone(),
            None => ServerState::initialize(&self.config).await?,
        };

        let listener = TcpListener::bind(self.config.bind_addr()).await?;
        tracing::info!(addr = %listener.local_addr()?, "Employee directory listening");

        serve(listener, state, shutdown_signal()).await
    }
}

/// Serve the application on an already bound listener
pub async fn serve<F>(listener: TcpListener, state: ServerState, shutdown: F) -> Result<()>
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    api::health::mark_started();
    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown)
        .await?;
    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down...");
}
