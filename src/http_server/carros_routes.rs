//! Carros HTTP Routes
//!
//! - `GET  /carros`        list every record
//! - `POST /carros`        validate and insert
//! - `GET  /carros/stats`  storage statistics
//! - `GET  /carros/:id`    single record

use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use tracing::info;

use super::errors::{ApiError, ApiResult};
use crate::model::{Carro, CarroId, NewCarro};
use crate::store::{CarroRepository, StorageStats};
use crate::validation::validate_now;

// ==================
// Shared State
// ==================

/// State shared across carros handlers
pub struct CarrosState {
    pub repository: Arc<dyn CarroRepository>,
}

impl CarrosState {
    pub fn new(repository: Arc<dyn CarroRepository>) -> Self {
        Self { repository }
    }
}

// ==================
// Carros Routes
// ==================

/// Create carros routes
pub fn carros_routes(state: Arc<CarrosState>) -> Router {
    Router::new()
        .route("/carros", get(list_carros_handler).post(create_carro_handler))
        .route("/carros/stats", get(stats_handler))
        .route("/carros/:id", get(get_carro_handler))
        .with_state(state)
}

/// Location of a record, resolvable through `GET /api/carros/:id`.
pub fn carro_location(id: CarroId) -> String {
    format!("/api/carros/{}", id)
}

// ==================
// Handlers
// ==================

async fn list_carros_handler(
    State(state): State<Arc<CarrosState>>,
) -> ApiResult<Json<Vec<Carro>>> {
    Ok(Json(state.repository.list()?))
}

async fn get_carro_handler(
    State(state): State<Arc<CarrosState>>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<Carro>> {
    let Path(id) = id.map_err(|rejection| ApiError::InvalidId(rejection.body_text()))?;

    // Integers outside the id range can never have been issued.
    let carro = match CarroId::try_from(id) {
        Ok(carro_id) => state.repository.get(carro_id)?,
        Err(_) => None,
    };

    carro.map(Json).ok_or(ApiError::NotFound(id))
}

async fn create_carro_handler(
    State(state): State<Arc<CarrosState>>,
    payload: Result<Json<NewCarro>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Json(novo) = payload.map_err(|rejection| ApiError::InvalidBody(rejection.body_text()))?;

    validate_now(&novo)?;

    let carro = state.repository.insert(novo)?;
    info!(id = carro.id, marca = %carro.brand, modelo = %carro.model, "carro created");

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, carro_location(carro.id))],
        Json(carro),
    ))
}

async fn stats_handler(State(state): State<Arc<CarrosState>>) -> ApiResult<Json<StorageStats>> {
    Ok(Json(state.repository.stats()?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::BinaryCarroStore;

    #[test]
    fn test_location_format() {
        assert_eq!(carro_location(12), "/api/carros/12");
    }

    #[test]
    fn test_router_builds() {
        let state = Arc::new(CarrosState::new(Arc::new(BinaryCarroStore::new())));
        let _router = carros_routes(state);
    }
}
