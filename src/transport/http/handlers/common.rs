use crate::transport::http::error::ApiError;
use crate::transport::http::types::ApiResponse;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

pub type ApiResult = Result<(StatusCode, Json<ApiResponse>), ApiError>;

/// Success envelope carrying `data`.
pub fn reply<T: Serialize>(status: StatusCode, message: &str, data: &T) -> ApiResult {
    Ok((status, Json(ApiResponse::with_data(message, data)?)))
}

/// Success envelope with only a message.
pub fn reply_message(status: StatusCode, message: &str) -> ApiResult {
    Ok((status, Json(ApiResponse::message(message))))
}

/// Maps an affected-row count of zero to `NotFound`.
pub fn require_affected(rows: u64, not_found: &'static str) -> Result<(), ApiError> {
    if rows == 0 {
        return Err(ApiError::NotFound(not_found));
    }
    Ok(())
}
