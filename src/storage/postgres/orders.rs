use super::PgStore;
use crate::domain::{
    LineItem, LineItemDraft, LineItemPayload, Order, OrderPayload, OrderRepository, OrderWithItems,
};
use crate::storage::StoreError;
use async_trait::async_trait;

const ORDER_COLUMNS: &str = "id, order_number, order_date, total_products, final_price, status";

#[async_trait]
impl OrderRepository for PgStore {
    async fn list_orders(&self) -> Result<Vec<Order>, StoreError> {
        let pool = self.pool().await?;
        let sql = format!("SELECT {} FROM orders ORDER BY id", ORDER_COLUMNS);
        Ok(sqlx::query_as::<_, Order>(&sql).fetch_all(pool).await?)
    }

    async fn get_order(&self, id: i64) -> Result<Option<Order>, StoreError> {
        let pool = self.pool().await?;
        let sql = format!("SELECT {} FROM orders WHERE id = $1", ORDER_COLUMNS);
        Ok(sqlx::query_as::<_, Order>(&sql)
            .bind(id)
            .fetch_optional(pool)
            .await?)
    }

    async fn find_order_by_number(&self, order_number: &str) -> Result<Option<Order>, StoreError> {
        let pool = self.pool().await?;
        let sql = format!(
            "SELECT {} FROM orders WHERE order_number = $1 LIMIT 1",
            ORDER_COLUMNS
        );
        Ok(sqlx::query_as::<_, Order>(&sql)
            .bind(order_number)
            .fetch_optional(pool)
            .await?)
    }

    async fn insert_order(&self, order: OrderPayload) -> Result<Order, StoreError> {
        let pool = self.pool().await?;
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO orders (order_number, order_date, total_products, final_price, status)
             VALUES ($1, $2, $3, $4, $5) RETURNING id",
        )
        .bind(&order.order_number)
        .bind(order.order_date)
        .bind(order.total_products)
        .bind(order.final_price)
        .bind(&order.status)
        .fetch_one(pool)
        .await?;
        Ok(Order::from_payload(id, order))
    }

    async fn update_order(&self, id: i64, order: &OrderPayload) -> Result<u64, StoreError> {
        let pool = self.pool().await?;
        let result = sqlx::query(
            "UPDATE orders
             SET order_number = $1, order_date = $2, total_products = $3, final_price = $4, status = $5
             WHERE id = $6",
        )
        .bind(&order.order_number)
        .bind(order.order_date)
        .bind(order.total_products)
        .bind(order.final_price)
        .bind(&order.status)
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }

    async fn update_order_status(&self, id: i64, status: &str) -> Result<u64, StoreError> {
        let pool = self.pool().await?;
        let result = sqlx::query("UPDATE orders SET status = $1 WHERE id = $2")
            .bind(status)
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }

    async fn delete_order(&self, id: i64) -> Result<u64, StoreError> {
        let pool = self.pool().await?;
        let result = sqlx::query("DELETE FROM orders WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }

    async fn insert_line_item(&self, item: LineItemPayload) -> Result<LineItem, StoreError> {
        let pool = self.pool().await?;
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO order_products (order_id, product_id, qty, total_price)
             VALUES ($1, $2, $3, $4) RETURNING id",
        )
        .bind(item.order_id)
        .bind(item.product_id)
        .bind(item.qty)
        .bind(item.total_price)
        .fetch_one(pool)
        .await?;
        Ok(item.into_line_item(id))
    }

    async fn update_line_item(&self, item: &LineItemPayload) -> Result<u64, StoreError> {
        let pool = self.pool().await?;
        let result = sqlx::query(
            "UPDATE order_products SET qty = $1, total_price = $2
             WHERE order_id = $3 AND product_id = $4",
        )
        .bind(item.qty)
        .bind(item.total_price)
        .bind(item.order_id)
        .bind(item.product_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }

    async fn insert_order_with_items(
        &self,
        order: OrderPayload,
        items: &[LineItemDraft],
    ) -> Result<OrderWithItems, StoreError> {
        let pool = self.pool().await?;
        // Dropping the transaction without commit rolls it back.
        let mut tx = pool.begin().await?;

        let order_id: i64 = sqlx::query_scalar(
            "INSERT INTO orders (order_number, order_date, total_products, final_price, status)
             VALUES ($1, $2, $3, $4, $5) RETURNING id",
        )
        .bind(&order.order_number)
        .bind(order.order_date)
        .bind(order.total_products)
        .bind(order.final_price)
        .bind(&order.status)
        .fetch_one(&mut *tx)
        .await?;

        let mut inserted = Vec::with_capacity(items.len());
        for draft in items {
            let item = draft.for_order(order_id);
            let id: i64 = sqlx::query_scalar(
                "INSERT INTO order_products (order_id, product_id, qty, total_price)
                 VALUES ($1, $2, $3, $4) RETURNING id",
            )
            .bind(item.order_id)
            .bind(item.product_id)
            .bind(item.qty)
            .bind(item.total_price)
            .fetch_one(&mut *tx)
            .await?;
            inserted.push(item.into_line_item(id));
        }

        tx.commit().await?;

        Ok(OrderWithItems {
            order: Order::from_payload(order_id, order),
            items: inserted,
        })
    }
}
