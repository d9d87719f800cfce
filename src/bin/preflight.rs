use shop_orders_api::infra::telemetry;
use shop_orders_api::{ConnectionProvider, PgStore, Settings, Store};
use std::sync::Arc;

fn usage_and_exit() -> ! {
    eprintln!(
        "Usage: cargo run --bin preflight -- [--apply-schema]\n\
         \n\
         Requires env vars:\n\
           DB_HOST, DB_USER, DB_NAME\n\
         Optional:\n\
           DB_PORT, DB_PASSWORD, DB_CONNECT_TIMEOUT_SECS, PORT\n"
    );
    std::process::exit(2);
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    telemetry::init_tracing()?;

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|a| a == "-h" || a == "--help") {
        usage_and_exit();
    }
    let apply_schema = args.iter().any(|a| a == "--apply-schema");

    // Force-read config (nice error messages if missing)
    let settings = Settings::from_env()?;
    let db = &settings.database;

    println!("> Preflight:");
    println!("  DB_HOST={}:{}", db.host, db.port);
    println!("  DB_USER={}", db.user);
    println!("  DB_NAME={}", db.name);
    println!("  Listen address: {}", settings.listen_addr());

    let provider = Arc::new(ConnectionProvider::new(db));
    let store = PgStore::new(provider.clone());

    store
        .ping()
        .await
        .map_err(|e| anyhow::anyhow!("Database is not reachable: {}", e))?;
    println!("  Database reachable (connected={}).", provider.is_connected());

    if apply_schema {
        store.ensure_schema().await?;
        println!("  Tables orders, products, order_products are present.");
    } else {
        println!("  Schema untouched (pass --apply-schema to create missing tables).");
    }

    println!("> Preflight OK.");
    Ok(())
}
