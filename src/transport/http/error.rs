//! Maps handler failures onto status codes and the JSON envelope.

use crate::domain::ValidationError;
use crate::storage::StoreError;
use crate::transport::http::types::ApiResponse;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

const SERVER_ERROR: &str = "Server error";

#[derive(Debug, Error)]
pub enum ApiError {
    /// Bad input, detected before any mutating query (400).
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// No row matched an id-scoped operation, or a listing came back empty (404).
    #[error("{0}")]
    NotFound(&'static str),

    /// Connection, query or driver failure (500).
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Encode(#[from] serde_json::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            Self::Validation(e) => (StatusCode::BAD_REQUEST, ApiResponse::message(e.to_string())),
            Self::NotFound(message) => (StatusCode::NOT_FOUND, ApiResponse::message(*message)),
            Self::Store(e) => {
                tracing::error!(error = %e, "Store error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiResponse::failure(SERVER_ERROR, e.to_string()),
                )
            }
            Self::Encode(e) => {
                tracing::error!(error = %e, "Response encoding error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiResponse::failure(SERVER_ERROR, e.to_string()),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
