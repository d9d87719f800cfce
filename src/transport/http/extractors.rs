//! Request extractors that reject with the JSON envelope instead of axum's plain text.

use crate::domain::{Validate, ValidationError};
use crate::transport::http::error::ApiError;
use axum::async_trait;
use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;
use axum::Json;
use serde::de::DeserializeOwned;

/// JSON body that has been decoded into `T` and passed `T::validate`.
pub struct ValidJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ValidJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| ValidationError::MalformedBody(rejection.body_text()))?;
        value.validate()?;
        Ok(Self(value))
    }
}

/// Integer identity taken from the single `:id` path segment.
pub struct RecordId(pub i64);

#[async_trait]
impl<S> FromRequestParts<S> for RecordId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw): Path<String> = Path::from_request_parts(parts, state)
            .await
            .map_err(|rejection| ValidationError::InvalidId(rejection.body_text()))?;

        match raw.trim().parse::<i64>() {
            Ok(id) => Ok(Self(id)),
            Err(_) => Err(ValidationError::InvalidId(format!("'{}' is not an integer", raw)).into()),
        }
    }
}
