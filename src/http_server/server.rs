//! # HTTP Server
//!
//! Combines the carros and health routers with tracing, CORS and
//! compression layers.

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use super::carros_routes::{carros_routes, CarrosState};
use super::config::HttpServerConfig;
use super::observability_routes::health_routes;
use crate::store::CarroRepository;

/// HTTP server for the carros API
pub struct HttpServer {
    config: HttpServerConfig,
    router: Router,
}

impl HttpServer {
    /// Create a server over the given repository
    pub fn with_config(config: HttpServerConfig, repository: Arc<dyn CarroRepository>) -> Self {
        let router = Self::build_router(&config, repository);
        Self { config, router }
    }

    fn build_cors(config: &HttpServerConfig) -> CorsLayer {
        if config.cors_origins.is_empty() {
            return CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any);
        }

        let origins: Vec<_> = config
            .cors_origins
            .iter()
            .filter_map(|origin| match origin.parse() {
                Ok(value) => Some(value),
                Err(_) => {
                    warn!(%origin, "ignoring unparseable CORS origin");
                    None
                }
            })
            .collect();

        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    }

    fn build_router(config: &HttpServerConfig, repository: Arc<dyn CarroRepository>) -> Router {
        let carros_state = Arc::new(CarrosState::new(repository));

        let router = Router::new()
            .merge(health_routes())
            .nest("/api", carros_routes(carros_state))
            .layer(
                ServiceBuilder::new()
                    .layer(TraceLayer::new_for_http())
                    .layer(Self::build_cors(config)),
            );

        if config.compression {
            router.layer(CompressionLayer::new())
        } else {
            router
        }
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Bind and serve until the process is stopped
    pub async fn start(self) -> Result<(), io::Error> {
        let addr: SocketAddr = self.config.socket_addr().parse().map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("invalid socket address '{}': {}", self.config.socket_addr(), e),
            )
        })?;

        let listener = TcpListener::bind(addr).await?;
        info!(%addr, "carros API listening");
        info!("endpoints: /api/carros, /api/carros/:id, /api/carros/stats, /health");

        axum::serve(listener, self.router).await?;

        Ok(())
    }
}
