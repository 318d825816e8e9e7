//! # HTTP Errors
//!
//! Every failure leaves the server as a status code plus a
//! `{ "mensagem": ... }` body. The status code tells clients which kind of
//! failure occurred.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;
use tracing::{error, warn};

use crate::store::StoreError;
use crate::validation::ValidationError;

/// Result type for route handlers
pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    // ==================
    // Client Errors (4xx)
    // ==================
    /// Body missing, not JSON, or wrongly typed
    #[error("Dados do carro inválidos.")]
    InvalidBody(String),

    /// Path segment is not an integer
    #[error("ID inválido.")]
    InvalidId(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Carro com ID {0} não encontrado.")]
    NotFound(i64),

    // ==================
    // Server Errors (5xx)
    // ==================
    #[error("Erro interno no armazenamento de carros.")]
    Store(#[from] StoreError),
}

impl ApiError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidBody(_) | ApiError::InvalidId(_) | ApiError::Validation(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Error response body
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageResponse {
    pub mensagem: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::InvalidBody(detail) | ApiError::InvalidId(detail) => {
                warn!(%detail, "rejected request")
            }
            ApiError::Store(err) => {
                error!(code = err.code(), fatal = err.is_fatal(), error = %err, "store failure")
            }
            _ => {}
        }

        let status = self.status_code();
        let body = Json(MessageResponse {
            mensagem: self.to_string(),
        });
        (status, body).into_response()
    }
}
