//! Domain entities, request payloads and the repository contract.

pub mod order;
pub mod product;
pub mod repository;
pub mod validation;

pub use order::{
    LineItem, LineItemDraft, LineItemPayload, Order, OrderPayload, OrderWithItems,
    OrderWithItemsPayload, StatusChange, StatusPayload,
};
pub use product::{CreatedProduct, OrderProduct, Product, ProductPayload};
pub use repository::{OrderRepository, ProductRepository, Store};
pub use validation::{Validate, ValidationError};
