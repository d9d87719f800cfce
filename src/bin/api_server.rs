// src/bin/api_server.rs

use shop_orders_api::infra::telemetry;
use shop_orders_api::transport;
use shop_orders_api::{ConnectionProvider, PgStore, Settings};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    telemetry::init_tracing()?;

    let settings = Settings::from_env()?;

    // --- Data access ---
    // The provider connects lazily, on the first request that needs the database.
    let provider = Arc::new(ConnectionProvider::new(&settings.database));
    let store = Arc::new(PgStore::new(provider));

    if settings.database.bootstrap_schema {
        tracing::info!("DB_BOOTSTRAP_SCHEMA set, ensuring tables exist");
        store.ensure_schema().await?;
    }

    let app_state = transport::http::AppState::new(store);

    // --- API Server Initialization ---
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);
    let app = transport::http::create_router(app_state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", transport::http::ApiDoc::openapi()))
        .layer(cors);

    let addr = settings.listen_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("API server listening on http://{}", addr);
    tracing::info!("Swagger UI available at http://{}/swagger-ui", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Graceful shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for Ctrl+C");
        return;
    }
    tracing::info!("Shutdown signal received (Ctrl+C)");
}
