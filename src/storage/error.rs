use thiserror::Error;

/// Infrastructure failures surfaced by a store. Reported to clients as 500.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database connection failed: {0}")]
    Connection(#[source] sqlx::Error),

    #[error(transparent)]
    Query(#[from] sqlx::Error),

    /// Referential integrity violations detected by stores without a database engine.
    #[error("constraint violation: {0}")]
    Constraint(String),
}
