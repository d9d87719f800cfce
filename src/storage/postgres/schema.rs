use crate::storage::StoreError;
use sqlx::PgPool;

// `order_number` carries no UNIQUE constraint; uniqueness is checked before insert.
const CREATE_TABLES: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS orders (
        id BIGSERIAL PRIMARY KEY,
        order_number TEXT NOT NULL,
        order_date DATE NOT NULL,
        total_products INTEGER NOT NULL,
        final_price DOUBLE PRECISION NOT NULL,
        status TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS products (
        id BIGSERIAL PRIMARY KEY,
        name TEXT NOT NULL,
        unit_price DOUBLE PRECISION NOT NULL,
        image_url TEXT
    )",
    "CREATE TABLE IF NOT EXISTS order_products (
        id BIGSERIAL PRIMARY KEY,
        order_id BIGINT NOT NULL REFERENCES orders(id) ON DELETE CASCADE,
        product_id BIGINT NOT NULL REFERENCES products(id) ON DELETE CASCADE,
        qty INTEGER NOT NULL,
        total_price DOUBLE PRECISION NOT NULL
    )",
    "CREATE INDEX IF NOT EXISTS order_products_order_id_idx ON order_products (order_id)",
];

pub(super) async fn create_tables(pool: &PgPool) -> Result<(), StoreError> {
    for statement in CREATE_TABLES {
        sqlx::query(statement).execute(pool).await?;
    }
    tracing::info!("Schema ensured (orders, products, order_products)");
    Ok(())
}
