use super::validation::{non_empty, non_negative, Validate, ValidationError};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A row of the `products` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub unit_price: f64,
    pub image_url: Option<String>,
}

impl Product {
    pub fn from_payload(id: i64, payload: ProductPayload) -> Self {
        Self {
            id,
            name: payload.name,
            unit_price: payload.unit_price,
            image_url: payload.image_url,
        }
    }
}

/// Response body of `POST /api/products`. The stored `image_url` is not echoed back.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct CreatedProduct {
    pub id: i64,
    pub name: String,
    pub unit_price: f64,
}

impl From<Product> for CreatedProduct {
    fn from(p: Product) -> Self {
        Self {
            id: p.id,
            name: p.name,
            unit_price: p.unit_price,
        }
    }
}

/// A line item joined with its product, as returned by `findByOrderId`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct OrderProduct {
    pub order_id: i64,
    pub product_id: i64,
    pub product_name: String,
    pub unit_price: f64,
    pub qty: i32,
    pub total_price: f64,
}

/// Body of `POST /api/products` and `PUT /api/products/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductPayload {
    pub name: String,
    pub unit_price: f64,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl Validate for ProductPayload {
    fn validate(&self) -> Result<(), ValidationError> {
        non_empty("name", &self.name)?;
        non_negative("unit_price", self.unit_price)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn image_url_is_optional() {
        let payload: ProductPayload =
            serde_json::from_value(json!({ "name": "Mug", "unit_price": 9.5 })).unwrap();
        assert_eq!(payload.image_url, None);
        assert!(payload.validate().is_ok());
    }

    #[test]
    fn created_product_omits_image_url() {
        let payload: ProductPayload = serde_json::from_value(json!({
            "name": "Mug",
            "unit_price": 9.5,
            "image_url": "https://cdn.example.com/mug.png"
        }))
        .unwrap();
        let created = CreatedProduct::from(Product::from_payload(4, payload));
        let value = serde_json::to_value(created).unwrap();
        assert_eq!(value, json!({ "id": 4, "name": "Mug", "unit_price": 9.5 }));
    }

    #[test]
    fn empty_name_is_rejected() {
        let payload = ProductPayload {
            name: String::new(),
            unit_price: 1.0,
            image_url: None,
        };
        assert_eq!(payload.validate(), Err(ValidationError::Empty { field: "name" }));
    }
}
