//! # HTTP Server
//!
//! Assembles the full router and serves it. Unknown paths and unsupported
//! methods fall through to generic handlers so every response, including
//! 404 and 405, carries the uniform JSON envelope.

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::{routing::get, Json, Router};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;
use crate::repo::Repository;

use super::errors::ApiError;
use super::execution_routes::execution_routes;
use super::response::WelcomeResponse;
use super::test_case_routes::test_case_routes;
use super::AppState;

/// HTTP server for the test case management API
pub struct HttpServer {
    config: ServerConfig,
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server over an injected repository
    pub fn new(config: ServerConfig, repo: Repository) -> Self {
        let router = Self::build_router(&config, repo);
        Self { config, router }
    }

    /// Build the combined router with all endpoints
    fn build_router(config: &ServerConfig, repo: Repository) -> Router {
        let state = Arc::new(AppState::new(repo));

        // Configure CORS from config
        let cors = if config.cors_origins.is_empty() {
            // If no origins configured, use permissive for development
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        } else {
            use tower_http::cors::AllowOrigin;
            let origins: Vec<_> = config
                .cors_origins
                .iter()
                .filter_map(|s| s.parse().ok())
                .collect();

            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods(Any)
                .allow_headers(Any)
        };

        Router::new()
            .route("/", get(index_handler))
            .merge(test_case_routes(state.clone()))
            .merge(execution_routes(state))
            .fallback(unknown_route_handler)
            .method_not_allowed_fallback(method_not_allowed_handler)
            .layer(TraceLayer::new_for_http())
            .layer(cors)
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Start the HTTP server (async)
    pub async fn start(self) -> io::Result<()> {
        let addr: SocketAddr = self
            .config
            .socket_addr()
            .parse()
            .map_err(|err| io::Error::new(io::ErrorKind::InvalidInput, err))?;

        tracing::info!(%addr, "serving test case management API");

        let listener = TcpListener::bind(addr).await?;
        axum::serve(listener, self.router).await
    }
}

async fn index_handler() -> Json<WelcomeResponse> {
    Json(WelcomeResponse::new())
}

async fn unknown_route_handler() -> ApiError {
    ApiError::not_found("The requested URL was not found on the server.")
}

async fn method_not_allowed_handler() -> ApiError {
    ApiError::MethodNotAllowed
}
