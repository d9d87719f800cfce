//! Lazily established, process-wide database handle.
//!
//! The provider is constructed by the binary and shared by reference; nothing connects until
//! the first `acquire`. All requests then multiplex over a single physical connection.

use crate::infra::config::DatabaseSettings;
use crate::storage::StoreError;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;
use std::time::Duration;
use tokio::sync::OnceCell;

/// Hands out the shared connection, creating it on first use.
pub struct ConnectionProvider {
    options: PgConnectOptions,
    host: String,
    database: String,
    connect_timeout: Duration,
    handle: OnceCell<PgPool>,
}

impl ConnectionProvider {
    pub fn new(settings: &DatabaseSettings) -> Self {
        let options = PgConnectOptions::new()
            .host(&settings.host)
            .port(settings.port)
            .username(&settings.user)
            .password(&settings.password)
            .database(&settings.name);

        Self {
            options,
            host: settings.host.clone(),
            database: settings.name.clone(),
            connect_timeout: settings.connect_timeout,
            handle: OnceCell::new(),
        }
    }

    /// Returns the shared handle, connecting on the first call.
    ///
    /// Concurrent first callers wait on a single connection attempt. A failed attempt leaves
    /// the provider empty, so the next call tries again. Liveness of an established handle is
    /// never re-checked.
    pub async fn acquire(&self) -> Result<&PgPool, StoreError> {
        self.handle
            .get_or_try_init(|| async {
                let result = pool_options(self.connect_timeout)
                    .connect_with(self.options.clone())
                    .await;

                match result {
                    Ok(pool) => {
                        tracing::info!(
                            host = %self.host,
                            database = %self.database,
                            "Database connected successfully"
                        );
                        Ok(pool)
                    }
                    Err(e) => {
                        tracing::error!(host = %self.host, error = %e, "Error connecting to the database");
                        Err(StoreError::Connection(e))
                    }
                }
            })
            .await
    }

    /// Whether the first connection attempt has succeeded.
    pub fn is_connected(&self) -> bool {
        self.handle.initialized()
    }
}

/// A single connection kept for the life of the process, with no liveness checks or expiry.
fn pool_options(connect_timeout: Duration) -> PgPoolOptions {
    PgPoolOptions::new()
        .max_connections(1)
        .acquire_timeout(connect_timeout)
        .test_before_acquire(false)
        .idle_timeout(None)
        .max_lifetime(None)
}
