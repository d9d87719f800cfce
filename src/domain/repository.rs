//! Data-access seam between the HTTP handlers and a concrete store.
//!
//! Lookups return `Option`, updates and deletes return the number of affected rows.
//! Mapping those to HTTP statuses is the caller's job.

use super::order::{LineItem, LineItemDraft, LineItemPayload, Order, OrderPayload, OrderWithItems};
use super::product::{OrderProduct, Product, ProductPayload};
use crate::storage::StoreError;
use async_trait::async_trait;

#[async_trait]
pub trait OrderRepository: Send + Sync {
    async fn list_orders(&self) -> Result<Vec<Order>, StoreError>;

    async fn get_order(&self, id: i64) -> Result<Option<Order>, StoreError>;

    async fn find_order_by_number(&self, order_number: &str) -> Result<Option<Order>, StoreError>;

    /// Inserts the order and returns it with its generated id.
    async fn insert_order(&self, order: OrderPayload) -> Result<Order, StoreError>;

    async fn update_order(&self, id: i64, order: &OrderPayload) -> Result<u64, StoreError>;

    async fn update_order_status(&self, id: i64, status: &str) -> Result<u64, StoreError>;

    async fn delete_order(&self, id: i64) -> Result<u64, StoreError>;

    async fn insert_line_item(&self, item: LineItemPayload) -> Result<LineItem, StoreError>;

    /// Updates qty and total_price of the row(s) matching `(order_id, product_id)`.
    async fn update_line_item(&self, item: &LineItemPayload) -> Result<u64, StoreError>;

    /// Inserts an order and all of its line items atomically.
    async fn insert_order_with_items(
        &self,
        order: OrderPayload,
        items: &[LineItemDraft],
    ) -> Result<OrderWithItems, StoreError>;
}

#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn list_products(&self) -> Result<Vec<Product>, StoreError>;

    async fn get_product(&self, id: i64) -> Result<Option<Product>, StoreError>;

    /// Line items of an order joined with their products.
    async fn list_products_by_order(&self, order_id: i64) -> Result<Vec<OrderProduct>, StoreError>;

    async fn insert_product(&self, product: ProductPayload) -> Result<Product, StoreError>;

    async fn update_product(&self, id: i64, product: &ProductPayload) -> Result<u64, StoreError>;

    async fn delete_product(&self, id: i64) -> Result<u64, StoreError>;
}

/// Everything the HTTP layer needs from a backing store.
#[async_trait]
pub trait Store: OrderRepository + ProductRepository {
    /// Cheap round-trip used by the health check.
    async fn ping(&self) -> Result<(), StoreError>;
}
