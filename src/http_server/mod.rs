//! # Carros HTTP Server Module
//!
//! Axum front end for the vehicle store. Handlers validate input, call the
//! repository and map results to status codes.
//!
//! # Endpoints
//!
//! - `/health` - Health check
//! - `/api/carros` - List (GET) and create (POST)
//! - `/api/carros/:id` - Single record
//! - `/api/carros/stats` - Encoded storage statistics

pub mod carros_routes;
pub mod config;
pub mod errors;
pub mod observability_routes;
pub mod server;

pub use carros_routes::{carro_location, CarrosState};
pub use config::HttpServerConfig;
pub use errors::{ApiError, ApiResult, MessageResponse};
pub use server::HttpServer;
