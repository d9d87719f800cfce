use crate::domain::{
    LineItemPayload, Order, OrderPayload, OrderWithItemsPayload, StatusChange, StatusPayload,
    ValidationError,
};
use crate::transport::http::error::ApiError;
use crate::transport::http::extractors::{RecordId, ValidJson};
use crate::transport::http::handlers::common::{reply, reply_message, require_affected, ApiResult};
use crate::transport::http::types::AppState;
use axum::extract::State;
use axum::http::StatusCode;

const ORDER_NOT_FOUND: &str = "Order not found.";

#[utoipa::path(
    get,
    path = "/api/orders",
    tag = "orders",
    responses(
        (status = 200, description = "All orders", body = ApiResponse),
        (status = 404, description = "No orders stored", body = ApiResponse),
        (status = 500, description = "Internal server error", body = ApiResponse)
    )
)]
pub async fn list_orders_handler(State(state): State<AppState>) -> ApiResult {
    let orders = state.store.list_orders().await?;
    if orders.is_empty() {
        return Err(ApiError::NotFound("No orders found."));
    }
    reply(StatusCode::OK, "Orders retrieved successfully", &orders)
}

#[utoipa::path(
    get,
    path = "/api/orders/{id}",
    tag = "orders",
    params(("id" = i64, Path, description = "Order id")),
    responses(
        (status = 200, description = "The order", body = ApiResponse),
        (status = 400, description = "Invalid id", body = ApiResponse),
        (status = 404, description = "Not found", body = ApiResponse),
        (status = 500, description = "Internal server error", body = ApiResponse)
    )
)]
pub async fn get_order_handler(State(state): State<AppState>, RecordId(id): RecordId) -> ApiResult {
    let order = state
        .store
        .get_order(id)
        .await?
        .ok_or(ApiError::NotFound(ORDER_NOT_FOUND))?;
    reply(StatusCode::OK, "Order retrieved successfully", &order)
}

#[utoipa::path(
    post,
    path = "/api/orders",
    tag = "orders",
    request_body = OrderPayload,
    responses(
        (status = 201, description = "Order created", body = ApiResponse),
        (status = 400, description = "Invalid body or order_number already registered", body = ApiResponse),
        (status = 500, description = "Internal server error", body = ApiResponse)
    )
)]
pub async fn create_order_handler(
    State(state): State<AppState>,
    ValidJson(payload): ValidJson<OrderPayload>,
) -> ApiResult {
    ensure_order_number_free(&state, &payload.order_number).await?;

    let order = state.store.insert_order(payload).await?;
    tracing::info!(order_id = order.id, order_number = %order.order_number, "Order created");
    reply(StatusCode::CREATED, "Order created successfully", &order)
}

#[utoipa::path(
    post,
    path = "/api/orders/createDetails",
    tag = "orders",
    request_body = LineItemPayload,
    responses(
        (status = 201, description = "Line item created", body = ApiResponse),
        (status = 400, description = "Invalid body", body = ApiResponse),
        (status = 500, description = "Internal server error (e.g. unknown order or product)", body = ApiResponse)
    )
)]
pub async fn create_line_item_handler(
    State(state): State<AppState>,
    ValidJson(payload): ValidJson<LineItemPayload>,
) -> ApiResult {
    let item = state.store.insert_line_item(payload).await?;
    tracing::info!(
        line_item_id = item.id,
        order_id = item.order_id,
        product_id = item.product_id,
        "Line item created"
    );
    reply(StatusCode::CREATED, "Order details created successfully", &item)
}

/// Always answers 200 with the submitted fields, even when no row matched.
#[utoipa::path(
    put,
    path = "/api/orders/updateDetails",
    tag = "orders",
    request_body = LineItemPayload,
    responses(
        (status = 200, description = "Line item(s) updated; also returned when nothing matched", body = ApiResponse),
        (status = 400, description = "Invalid body", body = ApiResponse),
        (status = 500, description = "Internal server error", body = ApiResponse)
    )
)]
pub async fn update_line_item_handler(
    State(state): State<AppState>,
    ValidJson(payload): ValidJson<LineItemPayload>,
) -> ApiResult {
    let rows = state.store.update_line_item(&payload).await?;
    if rows == 0 {
        tracing::warn!(
            order_id = payload.order_id,
            product_id = payload.product_id,
            "Line item update matched no rows"
        );
    }
    reply(StatusCode::OK, "Order details updated successfully", &payload)
}

#[utoipa::path(
    post,
    path = "/api/orders/withDetails",
    tag = "orders",
    request_body = OrderWithItemsPayload,
    responses(
        (status = 201, description = "Order and line items created in one transaction", body = ApiResponse),
        (status = 400, description = "Invalid body, no items, or order_number already registered", body = ApiResponse),
        (status = 500, description = "Internal server error; nothing was written", body = ApiResponse)
    )
)]
pub async fn create_order_with_items_handler(
    State(state): State<AppState>,
    ValidJson(payload): ValidJson<OrderWithItemsPayload>,
) -> ApiResult {
    ensure_order_number_free(&state, &payload.order.order_number).await?;

    let created = state
        .store
        .insert_order_with_items(payload.order, &payload.items)
        .await?;
    tracing::info!(
        order_id = created.order.id,
        items = created.items.len(),
        "Order created with line items"
    );
    reply(StatusCode::CREATED, "Order created successfully", &created)
}

#[utoipa::path(
    put,
    path = "/api/orders/{id}",
    tag = "orders",
    params(("id" = i64, Path, description = "Order id")),
    request_body = OrderPayload,
    responses(
        (status = 200, description = "Order updated", body = ApiResponse),
        (status = 400, description = "Invalid id or body", body = ApiResponse),
        (status = 404, description = "Not found", body = ApiResponse),
        (status = 500, description = "Internal server error", body = ApiResponse)
    )
)]
pub async fn update_order_handler(
    State(state): State<AppState>,
    RecordId(id): RecordId,
    ValidJson(payload): ValidJson<OrderPayload>,
) -> ApiResult {
    let rows = state.store.update_order(id, &payload).await?;
    require_affected(rows, ORDER_NOT_FOUND)?;

    tracing::info!(order_id = id, "Order updated");
    reply(
        StatusCode::OK,
        "Order updated successfully",
        &Order::from_payload(id, payload),
    )
}

#[utoipa::path(
    patch,
    path = "/api/orders/changeStatus/{id}",
    tag = "orders",
    params(("id" = i64, Path, description = "Order id")),
    request_body = StatusPayload,
    responses(
        (status = 200, description = "Status changed", body = ApiResponse),
        (status = 400, description = "Missing status or invalid id", body = ApiResponse),
        (status = 404, description = "Not found", body = ApiResponse),
        (status = 500, description = "Internal server error", body = ApiResponse)
    )
)]
pub async fn change_status_handler(
    State(state): State<AppState>,
    RecordId(id): RecordId,
    ValidJson(payload): ValidJson<StatusPayload>,
) -> ApiResult {
    let status = payload.required_status()?;

    let rows = state.store.update_order_status(id, status).await?;
    require_affected(rows, ORDER_NOT_FOUND)?;

    tracing::info!(order_id = id, status, "Order status changed");
    reply(
        StatusCode::OK,
        "Order status updated successfully",
        &StatusChange {
            id,
            status: status.to_string(),
        },
    )
}

#[utoipa::path(
    delete,
    path = "/api/orders/{id}",
    tag = "orders",
    params(("id" = i64, Path, description = "Order id")),
    responses(
        (status = 200, description = "Order deleted", body = ApiResponse),
        (status = 400, description = "Invalid id", body = ApiResponse),
        (status = 404, description = "Not found", body = ApiResponse),
        (status = 500, description = "Internal server error", body = ApiResponse)
    )
)]
pub async fn delete_order_handler(
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> ApiResult {
    let rows = state.store.delete_order(id).await?;
    require_affected(rows, ORDER_NOT_FOUND)?;

    tracing::info!(order_id = id, "Order deleted");
    reply_message(StatusCode::OK, "Order deleted successfully")
}

async fn ensure_order_number_free(state: &AppState, order_number: &str) -> Result<(), ApiError> {
    if state.store.find_order_by_number(order_number).await?.is_some() {
        return Err(ValidationError::DuplicateOrderNumber(order_number.to_string()).into());
    }
    Ok(())
}
