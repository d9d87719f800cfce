//! Request validation shared by every payload type.

use thiserror::Error;

/// A request was rejected before reaching the store.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("The '{field}' field is required.")]
    Missing { field: &'static str },

    #[error("The '{field}' field cannot be empty.")]
    Empty { field: &'static str },

    #[error("The '{field}' field cannot be negative.")]
    Negative { field: &'static str },

    #[error("At least one line item is required.")]
    NoLineItems,

    #[error("Order number '{0}' is already registered.")]
    DuplicateOrderNumber(String),

    #[error("Invalid id: {0}")]
    InvalidId(String),

    #[error("Invalid request body: {0}")]
    MalformedBody(String),
}

/// Implemented by every typed request body; run by the `ValidJson` extractor.
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationError>;
}

pub(crate) fn non_empty(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Empty { field });
    }
    Ok(())
}

pub(crate) fn non_negative<T>(field: &'static str, value: T) -> Result<(), ValidationError>
where
    T: PartialOrd + Default,
{
    if value < T::default() {
        return Err(ValidationError::Negative { field });
    }
    Ok(())
}
