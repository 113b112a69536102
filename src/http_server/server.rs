//! # HTTP Server
//!
//! Combines the book and health routers with CORS and request logging.

use std::sync::Arc;

use axum::{middleware, Router};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use super::book_routes::book_routes;
use super::config::ServerConfig;
use super::observability_routes::health_routes;
use super::request_log::log_requests;
use crate::books::BookService;
use crate::observability::{log_event, log_event_with_fields, Event};
use crate::store::{BookStore, FileBookStore};

/// Base path of the book collection
pub const BOOKS_BASE_PATH: &str = "/api/v1/books";

/// HTTP server for the book collection
pub struct HttpServer {
    config: ServerConfig,
    router: Router,
}

impl HttpServer {
    /// Create a server backed by the configured data file
    pub fn with_config(config: ServerConfig) -> Self {
        let store = FileBookStore::new(config.data_file.clone());
        Self::with_store(config, store)
    }

    /// Create a server over any store
    pub fn with_store<S: BookStore + 'static>(config: ServerConfig, store: S) -> Self {
        let router = build_router(&config, store);
        Self { config, router }
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Bind and serve until Ctrl-C
    pub async fn start(self) -> Result<(), std::io::Error> {
        let listener = TcpListener::bind(self.config.socket_addr()).await?;
        let local_addr = listener.local_addr()?.to_string();
        let data_file = self.config.data_file.display().to_string();

        log_event_with_fields(
            Event::ServerListening,
            &[
                ("addr", local_addr.as_str()),
                ("base_path", BOOKS_BASE_PATH),
                ("data_file", data_file.as_str()),
                ("schema", self.config.schema.as_str()),
                ("update_policy", self.config.update_policy.as_str()),
            ],
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        log_event(Event::ShutdownComplete);
        Ok(())
    }
}

/// Build the combined router with all endpoints
pub fn build_router<S: BookStore + 'static>(config: &ServerConfig, store: S) -> Router {
    let service = Arc::new(BookService::new(store, config.schema, config.update_policy));

    Router::new()
        .merge(health_routes())
        .merge(book_routes(BOOKS_BASE_PATH, service))
        .layer(
            ServiceBuilder::new()
                .layer(cors_layer(config))
                .layer(middleware::from_fn(log_requests)),
        )
}

/// Permissive when no origins are configured, otherwise restricted to them
fn cors_layer(config: &ServerConfig) -> CorsLayer {
    if config.cors_origins.is_empty() {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    let origins: Vec<_> = config
        .cors_origins
        .iter()
        .filter_map(|s| s.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}

async fn shutdown_signal() {
    // If the handler cannot be installed, serve until the process is killed
    if tokio::signal::ctrl_c().await.is_err() {
        std::future::pending::<()>().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemoryBookStore;

    #[test]
    fn test_server_with_custom_port() {
        let server = HttpServer::with_store(ServerConfig::with_port(8080), InMemoryBookStore::new());
        assert_eq!(server.socket_addr(), "0.0.0.0:8080");
    }

    #[test]
    fn test_router_builds_with_restricted_cors() {
        let config = ServerConfig {
            cors_origins: vec!["http://localhost:5173".to_string()],
            ..Default::default()
        };
        let _router = build_router(&config, InMemoryBookStore::new());
    }
}
