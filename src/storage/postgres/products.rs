use super::PgStore;
use crate::domain::{OrderProduct, Product, ProductPayload, ProductRepository};
use crate::storage::StoreError;
use async_trait::async_trait;

#[async_trait]
impl ProductRepository for PgStore {
    async fn list_products(&self) -> Result<Vec<Product>, StoreError> {
        let pool = self.pool().await?;
        Ok(sqlx::query_as::<_, Product>(
            "SELECT id, name, unit_price, image_url FROM products ORDER BY id",
        )
        .fetch_all(pool)
        .await?)
    }

    async fn get_product(&self, id: i64) -> Result<Option<Product>, StoreError> {
        let pool = self.pool().await?;
        Ok(sqlx::query_as::<_, Product>(
            "SELECT id, name, unit_price, image_url FROM products WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await?)
    }

    async fn list_products_by_order(&self, order_id: i64) -> Result<Vec<OrderProduct>, StoreError> {
        let pool = self.pool().await?;
        Ok(sqlx::query_as::<_, OrderProduct>(
            "SELECT op.order_id, p.id AS product_id, p.name AS product_name, p.unit_price,
                    op.qty, op.total_price
             FROM order_products AS op
             JOIN products AS p ON op.product_id = p.id
             WHERE op.order_id = $1
             ORDER BY op.id",
        )
        .bind(order_id)
        .fetch_all(pool)
        .await?)
    }

    async fn insert_product(&self, product: ProductPayload) -> Result<Product, StoreError> {
        let pool = self.pool().await?;
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO products (name, unit_price, image_url) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(&product.name)
        .bind(product.unit_price)
        .bind(product.image_url.as_deref())
        .fetch_one(pool)
        .await?;
        Ok(Product::from_payload(id, product))
    }

    async fn update_product(&self, id: i64, product: &ProductPayload) -> Result<u64, StoreError> {
        let pool = self.pool().await?;
        let result = sqlx::query(
            "UPDATE products SET name = $1, unit_price = $2, image_url = $3 WHERE id = $4",
        )
        .bind(&product.name)
        .bind(product.unit_price)
        .bind(product.image_url.as_deref())
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }

    async fn delete_product(&self, id: i64) -> Result<u64, StoreError> {
        let pool = self.pool().await?;
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
