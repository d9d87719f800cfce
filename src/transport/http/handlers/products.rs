use crate::domain::{CreatedProduct, Product, ProductPayload};
use crate::transport::http::error::ApiError;
use crate::transport::http::extractors::{RecordId, ValidJson};
use crate::transport::http::handlers::common::{reply, reply_message, require_affected, ApiResult};
use crate::transport::http::types::AppState;
use axum::extract::State;
use axum::http::StatusCode;

const PRODUCT_NOT_FOUND: &str = "Product not found.";

#[utoipa::path(
    get,
    path = "/api/products",
    tag = "products",
    responses(
        (status = 200, description = "All products", body = ApiResponse),
        (status = 404, description = "No products stored", body = ApiResponse),
        (status = 500, description = "Internal server error", body = ApiResponse)
    )
)]
pub async fn list_products_handler(State(state): State<AppState>) -> ApiResult {
    let products = state.store.list_products().await?;
    if products.is_empty() {
        return Err(ApiError::NotFound("No products found."));
    }
    reply(StatusCode::OK, "Products retrieved successfully", &products)
}

#[utoipa::path(
    get,
    path = "/api/products/{id}",
    tag = "products",
    params(("id" = i64, Path, description = "Product id")),
    responses(
        (status = 200, description = "The product", body = ApiResponse),
        (status = 400, description = "Invalid id", body = ApiResponse),
        (status = 404, description = "Not found", body = ApiResponse),
        (status = 500, description = "Internal server error", body = ApiResponse)
    )
)]
pub async fn get_product_handler(
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> ApiResult {
    let product = state
        .store
        .get_product(id)
        .await?
        .ok_or(ApiError::NotFound(PRODUCT_NOT_FOUND))?;
    reply(StatusCode::OK, "Product retrieved successfully", &product)
}

#[utoipa::path(
    get,
    path = "/api/products/findByOrderId/{id}",
    tag = "products",
    params(("id" = i64, Path, description = "Order id")),
    responses(
        (status = 200, description = "Line items of the order joined with their products", body = ApiResponse),
        (status = 400, description = "Invalid id", body = ApiResponse),
        (status = 404, description = "The order has no line items", body = ApiResponse),
        (status = 500, description = "Internal server error", body = ApiResponse)
    )
)]
pub async fn find_by_order_handler(
    State(state): State<AppState>,
    RecordId(order_id): RecordId,
) -> ApiResult {
    let rows = state.store.list_products_by_order(order_id).await?;
    if rows.is_empty() {
        return Err(ApiError::NotFound("No products found for this order."));
    }
    reply(StatusCode::OK, "Products retrieved successfully", &rows)
}

#[utoipa::path(
    post,
    path = "/api/products",
    tag = "products",
    request_body = ProductPayload,
    responses(
        (status = 201, description = "Product created (image_url is not echoed)", body = ApiResponse),
        (status = 400, description = "Invalid body", body = ApiResponse),
        (status = 500, description = "Internal server error", body = ApiResponse)
    )
)]
pub async fn create_product_handler(
    State(state): State<AppState>,
    ValidJson(payload): ValidJson<ProductPayload>,
) -> ApiResult {
    let product = state.store.insert_product(payload).await?;
    tracing::info!(product_id = product.id, "Product created");
    reply(
        StatusCode::CREATED,
        "Product created successfully",
        &CreatedProduct::from(product),
    )
}

#[utoipa::path(
    put,
    path = "/api/products/{id}",
    tag = "products",
    params(("id" = i64, Path, description = "Product id")),
    request_body = ProductPayload,
    responses(
        (status = 200, description = "Product updated", body = ApiResponse),
        (status = 400, description = "Invalid id or body", body = ApiResponse),
        (status = 404, description = "Not found", body = ApiResponse),
        (status = 500, description = "Internal server error", body = ApiResponse)
    )
)]
pub async fn update_product_handler(
    State(state): State<AppState>,
    RecordId(id): RecordId,
    ValidJson(payload): ValidJson<ProductPayload>,
) -> ApiResult {
    let rows = state.store.update_product(id, &payload).await?;
    require_affected(rows, PRODUCT_NOT_FOUND)?;

    tracing::info!(product_id = id, "Product updated");
    reply(
        StatusCode::OK,
        "Product updated successfully",
        &Product::from_payload(id, payload),
    )
}

#[utoipa::path(
    delete,
    path = "/api/products/{id}",
    tag = "products",
    params(("id" = i64, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product deleted", body = ApiResponse),
        (status = 400, description = "Invalid id", body = ApiResponse),
        (status = 404, description = "Not found", body = ApiResponse),
        (status = 500, description = "Internal server error", body = ApiResponse)
    )
)]
pub async fn delete_product_handler(
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> ApiResult {
    let rows = state.store.delete_product(id).await?;
    require_affected(rows, PRODUCT_NOT_FOUND)?;

    tracing::info!(product_id = id, "Product deleted");
    reply_message(StatusCode::OK, "Product deleted successfully")
}
