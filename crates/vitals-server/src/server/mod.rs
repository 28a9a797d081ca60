//! HTTP server
//!
//! Router assembly and serving. The request-context middleware is the
//! outermost layer so every downstream log line carries the correlation
//! fields it seeds.

mod handlers;
pub mod request_context;

pub use handlers::{AppState, HealthResponse};

use std::net::SocketAddr;

use axum::{middleware, routing::get, Router};
use http::header::{HeaderName, HeaderValue};
use tower_http::compression::CompressionLayer;
use tower_http::set_header::SetResponseHeaderLayer;
use vitals_core::logging;

/// Server bind configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 4000,
        }
    }
}

impl ServerConfig {
    /// Get the socket address
    pub fn addr(&self) -> SocketAddr {
        format!("{}:{}", self.host, self.port)
            .parse()
            .expect("Invalid address")
    }

    /// Base URL for log output
    pub fn base_url(&self) -> String {
        format!("http://localhost:{}", self.port)
    }
}

/// Builds the application router with all middleware layers applied.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(handlers::health))
        .with_state(state)
        .layer(CompressionLayer::new())
        .layer(SetResponseHeaderLayer::if_not_present(
            HeaderName::from_static("x-powered-by"),
            HeaderValue::from_static("vitals"),
        ))
        // Added last so it is the outermost layer.
        .layer(middleware::from_fn(request_context::request_context))
}

/// Binds the listener and serves until the process exits.
pub async fn serve(config: ServerConfig, state: AppState) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(config.addr()).await?;
    logging::info(&format!("Server is running on {}", config.base_url()));
    axum::serve(listener, build_router(state)).await?;
    Ok(())
}
