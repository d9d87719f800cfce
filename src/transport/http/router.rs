use crate::domain::{
    CreatedProduct, LineItem, LineItemDraft, LineItemPayload, Order, OrderPayload, OrderProduct,
    OrderWithItems, OrderWithItemsPayload, Product, ProductPayload, StatusChange, StatusPayload,
};
use crate::transport::http::handlers::{health, orders, products};
use crate::transport::http::types::{ApiResponse, AppState};
use axum::routing::{get, patch, post, put};
use axum::Router;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        health::healthcheck_handler,
        orders::list_orders_handler,
        orders::get_order_handler,
        orders::create_order_handler,
        orders::create_line_item_handler,
        orders::update_line_item_handler,
        orders::create_order_with_items_handler,
        orders::update_order_handler,
        orders::change_status_handler,
        orders::delete_order_handler,
        products::list_products_handler,
        products::get_product_handler,
        products::find_by_order_handler,
        products::create_product_handler,
        products::update_product_handler,
        products::delete_product_handler
    ),
    components(schemas(
        ApiResponse,
        Order,
        OrderPayload,
        LineItem,
        LineItemPayload,
        LineItemDraft,
        OrderWithItems,
        OrderWithItemsPayload,
        StatusPayload,
        StatusChange,
        Product,
        ProductPayload,
        CreatedProduct,
        OrderProduct
    )),
    tags(
        (name = "orders", description = "Orders and their line items"),
        (name = "products", description = "Product catalogue"),
        (name = "health", description = "Liveness of the service and its database")
    )
)]
pub struct ApiDoc;

pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::healthcheck_handler))
        .route(
            "/api/orders",
            get(orders::list_orders_handler).post(orders::create_order_handler),
        )
        .route("/api/orders/createDetails", post(orders::create_line_item_handler))
        .route("/api/orders/updateDetails", put(orders::update_line_item_handler))
        .route("/api/orders/withDetails", post(orders::create_order_with_items_handler))
        .route("/api/orders/changeStatus/:id", patch(orders::change_status_handler))
        .route(
            "/api/orders/:id",
            get(orders::get_order_handler)
                .put(orders::update_order_handler)
                .delete(orders::delete_order_handler),
        )
        .route(
            "/api/products",
            get(products::list_products_handler).post(products::create_product_handler),
        )
        .route(
            "/api/products/findByOrderId/:id",
            get(products::find_by_order_handler),
        )
        .route(
            "/api/products/:id",
            get(products::get_product_handler)
                .put(products::update_product_handler)
                .delete(products::delete_product_handler),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
