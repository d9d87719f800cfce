//! In-memory store with the same observable behaviour as [`PgStore`](super::PgStore).
//!
//! Used by the test suites and for running the API without a database. Deleting an order or a
//! product cascades to its line items, and line items must reference existing rows.

use crate::domain::{
    LineItem, LineItemDraft, LineItemPayload, Order, OrderPayload, OrderProduct, OrderRepository,
    OrderWithItems, Product, ProductPayload, ProductRepository, Store,
};
use crate::storage::StoreError;
use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

#[derive(Default)]
struct Tables {
    orders: BTreeMap<i64, Order>,
    products: BTreeMap<i64, Product>,
    line_items: BTreeMap<i64, LineItem>,
    next_order_id: i64,
    next_product_id: i64,
    next_line_item_id: i64,
}

impl Tables {
    fn next_id(counter: &mut i64) -> i64 {
        *counter += 1;
        *counter
    }

    fn check_references(&self, order_id: i64, product_id: i64) -> Result<(), StoreError> {
        if !self.orders.contains_key(&order_id) {
            return Err(StoreError::Constraint(format!(
                "order_products.order_id references missing order {}",
                order_id
            )));
        }
        if !self.products.contains_key(&product_id) {
            return Err(StoreError::Constraint(format!(
                "order_products.product_id references missing product {}",
                product_id
            )));
        }
        Ok(())
    }

    fn push_line_item(&mut self, item: LineItemPayload) -> LineItem {
        let id = Self::next_id(&mut self.next_line_item_id);
        let line_item = item.into_line_item(id);
        self.line_items.insert(id, line_item.clone());
        line_item
    }
}

#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored line items, across all orders.
    pub async fn line_item_count(&self) -> usize {
        self.tables.read().await.line_items.len()
    }
}

#[async_trait]
impl OrderRepository for MemoryStore {
    async fn list_orders(&self) -> Result<Vec<Order>, StoreError> {
        Ok(self.tables.read().await.orders.values().cloned().collect())
    }

    async fn get_order(&self, id: i64) -> Result<Option<Order>, StoreError> {
        Ok(self.tables.read().await.orders.get(&id).cloned())
    }

    async fn find_order_by_number(&self, order_number: &str) -> Result<Option<Order>, StoreError> {
        Ok(self
            .tables
            .read()
            .await
            .orders
            .values()
            .find(|o| o.order_number == order_number)
            .cloned())
    }

    async fn insert_order(&self, order: OrderPayload) -> Result<Order, StoreError> {
        let mut tables = self.tables.write().await;
        let id = Tables::next_id(&mut tables.next_order_id);
        let order = Order::from_payload(id, order);
        tables.orders.insert(id, order.clone());
        Ok(order)
    }

    async fn update_order(&self, id: i64, order: &OrderPayload) -> Result<u64, StoreError> {
        let mut tables = self.tables.write().await;
        match tables.orders.get_mut(&id) {
            Some(existing) => {
                *existing = Order::from_payload(id, order.clone());
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn update_order_status(&self, id: i64, status: &str) -> Result<u64, StoreError> {
        let mut tables = self.tables.write().await;
        match tables.orders.get_mut(&id) {
            Some(existing) => {
                existing.status = status.to_string();
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete_order(&self, id: i64) -> Result<u64, StoreError> {
        let mut tables = self.tables.write().await;
        if tables.orders.remove(&id).is_none() {
            return Ok(0);
        }
        tables.line_items.retain(|_, item| item.order_id != id);
        Ok(1)
    }

    async fn insert_line_item(&self, item: LineItemPayload) -> Result<LineItem, StoreError> {
        let mut tables = self.tables.write().await;
        tables.check_references(item.order_id, item.product_id)?;
        Ok(tables.push_line_item(item))
    }

    async fn update_line_item(&self, item: &LineItemPayload) -> Result<u64, StoreError> {
        let mut tables = self.tables.write().await;
        let mut affected = 0;
        for row in tables
            .line_items
            .values_mut()
            .filter(|row| row.order_id == item.order_id && row.product_id == item.product_id)
        {
            row.qty = item.qty;
            row.total_price = item.total_price;
            affected += 1;
        }
        Ok(affected)
    }

    async fn insert_order_with_items(
        &self,
        order: OrderPayload,
        items: &[LineItemDraft],
    ) -> Result<OrderWithItems, StoreError> {
        let mut tables = self.tables.write().await;

        // Validate every reference up front so a failure leaves no partial rows behind.
        for draft in items {
            if !tables.products.contains_key(&draft.product_id) {
                return Err(StoreError::Constraint(format!(
                    "order_products.product_id references missing product {}",
                    draft.product_id
                )));
            }
        }

        let order_id = Tables::next_id(&mut tables.next_order_id);
        let order = Order::from_payload(order_id, order);
        tables.orders.insert(order_id, order.clone());

        let items = items
            .iter()
            .map(|draft| tables.push_line_item(draft.for_order(order_id)))
            .collect();

        Ok(OrderWithItems { order, items })
    }
}

#[async_trait]
impl ProductRepository for MemoryStore {
    async fn list_products(&self) -> Result<Vec<Product>, StoreError> {
        Ok(self.tables.read().await.products.values().cloned().collect())
    }

    async fn get_product(&self, id: i64) -> Result<Option<Product>, StoreError> {
        Ok(self.tables.read().await.products.get(&id).cloned())
    }

    async fn list_products_by_order(&self, order_id: i64) -> Result<Vec<OrderProduct>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .line_items
            .values()
            .filter(|item| item.order_id == order_id)
            .filter_map(|item| {
                tables.products.get(&item.product_id).map(|p| OrderProduct {
                    order_id: item.order_id,
                    product_id: p.id,
                    product_name: p.name.clone(),
                    unit_price: p.unit_price,
                    qty: item.qty,
                    total_price: item.total_price,
                })
            })
            .collect())
    }

    async fn insert_product(&self, product: ProductPayload) -> Result<Product, StoreError> {
        let mut tables = self.tables.write().await;
        let id = Tables::next_id(&mut tables.next_product_id);
        let product = Product::from_payload(id, product);
        tables.products.insert(id, product.clone());
        Ok(product)
    }

    async fn update_product(&self, id: i64, product: &ProductPayload) -> Result<u64, StoreError> {
        let mut tables = self.tables.write().await;
        match tables.products.get_mut(&id) {
            Some(existing) => {
                *existing = Product::from_payload(id, product.clone());
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete_product(&self, id: i64) -> Result<u64, StoreError> {
        let mut tables = self.tables.write().await;
        if tables.products.remove(&id).is_none() {
            return Ok(0);
        }
        tables.line_items.retain(|_, item| item.product_id != id);
        Ok(1)
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
