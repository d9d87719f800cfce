//! Orders and their line items (`order_products`).

use super::validation::{non_empty, non_negative, Validate, ValidationError};
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

/// A row of the `orders` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Order {
    pub id: i64,
    pub order_number: String,
    #[schema(value_type = String, example = "2024-05-01")]
    pub order_date: NaiveDate,
    pub total_products: i32,
    pub final_price: f64,
    pub status: String,
}

impl Order {
    pub fn from_payload(id: i64, payload: OrderPayload) -> Self {
        Self {
            id,
            order_number: payload.order_number,
            order_date: payload.order_date,
            total_products: payload.total_products,
            final_price: payload.final_price,
            status: payload.status,
        }
    }
}

/// A row of the `order_products` join table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct LineItem {
    pub id: i64,
    pub order_id: i64,
    pub product_id: i64,
    pub qty: i32,
    pub total_price: f64,
}

/// Body of `POST /api/orders` and `PUT /api/orders/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OrderPayload {
    /// Accepted as a string or a number; stored as text.
    #[serde(deserialize_with = "order_number_from_json")]
    #[schema(value_type = String, example = "ORD-1001")]
    pub order_number: String,
    #[schema(value_type = String, example = "2024-05-01")]
    pub order_date: NaiveDate,
    pub total_products: i32,
    pub final_price: f64,
    pub status: String,
}

impl Validate for OrderPayload {
    fn validate(&self) -> Result<(), ValidationError> {
        non_empty("order_number", &self.order_number)?;
        non_empty("status", &self.status)?;
        non_negative("total_products", self.total_products)?;
        non_negative("final_price", self.final_price)?;
        Ok(())
    }
}

/// Body of `POST /api/orders/createDetails` and `PUT /api/orders/updateDetails`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct LineItemPayload {
    pub order_id: i64,
    pub product_id: i64,
    pub qty: i32,
    pub total_price: f64,
}

impl Validate for LineItemPayload {
    fn validate(&self) -> Result<(), ValidationError> {
        non_negative("qty", self.qty)?;
        non_negative("total_price", self.total_price)?;
        Ok(())
    }
}

impl LineItemPayload {
    pub fn into_line_item(self, id: i64) -> LineItem {
        LineItem {
            id,
            order_id: self.order_id,
            product_id: self.product_id,
            qty: self.qty,
            total_price: self.total_price,
        }
    }
}

/// A line item submitted together with its order; `order_id` is assigned on insert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct LineItemDraft {
    pub product_id: i64,
    pub qty: i32,
    pub total_price: f64,
}

impl LineItemDraft {
    pub fn for_order(&self, order_id: i64) -> LineItemPayload {
        LineItemPayload {
            order_id,
            product_id: self.product_id,
            qty: self.qty,
            total_price: self.total_price,
        }
    }
}

/// Body of `POST /api/orders/withDetails`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OrderWithItemsPayload {
    pub order: OrderPayload,
    pub items: Vec<LineItemDraft>,
}

impl Validate for OrderWithItemsPayload {
    fn validate(&self) -> Result<(), ValidationError> {
        self.order.validate()?;
        if self.items.is_empty() {
            return Err(ValidationError::NoLineItems);
        }
        for item in &self.items {
            non_negative("qty", item.qty)?;
            non_negative("total_price", item.total_price)?;
        }
        Ok(())
    }
}

/// An order together with the line items inserted alongside it.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct OrderWithItems {
    pub order: Order,
    pub items: Vec<LineItem>,
}

/// Body of `PATCH /api/orders/changeStatus/{id}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct StatusPayload {
    #[serde(default)]
    pub status: Option<String>,
}

impl StatusPayload {
    /// The trimmed-nonempty status, or the `Missing` error the endpoint reports.
    pub fn required_status(&self) -> Result<&str, ValidationError> {
        match self.status.as_deref() {
            Some(s) if !s.trim().is_empty() => Ok(s),
            _ => Err(ValidationError::Missing { field: "status" }),
        }
    }
}

impl Validate for StatusPayload {
    fn validate(&self) -> Result<(), ValidationError> {
        self.required_status().map(|_| ())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct StatusChange {
    pub id: i64,
    pub status: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OrderNumberRepr {
    Text(String),
    Signed(i64),
    Unsigned(u64),
}

fn order_number_from_json<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match OrderNumberRepr::deserialize(deserializer)? {
        OrderNumberRepr::Text(s) => s,
        OrderNumberRepr::Signed(n) => n.to_string(),
        OrderNumberRepr::Unsigned(n) => n.to_string(),
    })
}
