//! PostgreSQL-backed store. Every operation issues parameterized SQL over the shared handle
//! from [`ConnectionProvider`].

mod orders;
mod products;
mod schema;

use crate::domain::Store;
use crate::storage::{ConnectionProvider, StoreError};
use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

#[derive(Clone)]
pub struct PgStore {
    provider: Arc<ConnectionProvider>,
}

impl PgStore {
    pub fn new(provider: Arc<ConnectionProvider>) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &ConnectionProvider {
        &self.provider
    }

    async fn pool(&self) -> Result<&PgPool, StoreError> {
        self.provider.acquire().await
    }

    /// Creates `orders`, `products` and `order_products` if they do not exist yet.
    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        let pool = self.pool().await?;
        schema::create_tables(pool).await
    }
}

#[async_trait]
impl Store for PgStore {
    async fn ping(&self) -> Result<(), StoreError> {
        let pool = self.pool().await?;
        sqlx::query("SELECT 1").execute(pool).await?;
        Ok(())
    }
}
