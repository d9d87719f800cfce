//! End-to-end HTTP tests: the real router served on an ephemeral port, backed by the
//! in-memory store, driven with `reqwest`.

use reqwest::{Client, StatusCode};
use serde_json::{json, Value as JsonValue};
use shop_orders_api::{create_router, AppState, MemoryStore};
use std::sync::Arc;

struct TestServer {
    base_url: String,
    client: Client,
    store: Arc<MemoryStore>,
}

impl TestServer {
    async fn start() -> Self {
        let store = Arc::new(MemoryStore::new());
        let router = create_router(AppState::new(store.clone()));

        // Bind to an ephemeral port to avoid conflicts if an API server is already running.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        Self {
            base_url: format!("http://127.0.0.1:{}", port),
            client: Client::new(),
            store,
        }
    }

    async fn call(&self, method: reqwest::Method, path: &str, body: Option<JsonValue>) -> (StatusCode, JsonValue) {
        let mut request = self.client.request(method, format!("{}{}", self.base_url, path));
        if let Some(body) = body {
            request = request.json(&body);
        }
        let response = request.send().await.unwrap();
        let status = response.status();
        (status, response.json().await.unwrap())
    }

    async fn get(&self, path: &str) -> (StatusCode, JsonValue) {
        self.call(reqwest::Method::GET, path, None).await
    }

    async fn post(&self, path: &str, body: JsonValue) -> (StatusCode, JsonValue) {
        self.call(reqwest::Method::POST, path, Some(body)).await
    }

    async fn put(&self, path: &str, body: JsonValue) -> (StatusCode, JsonValue) {
        self.call(reqwest::Method::PUT, path, Some(body)).await
    }

    async fn patch(&self, path: &str, body: JsonValue) -> (StatusCode, JsonValue) {
        self.call(reqwest::Method::PATCH, path, Some(body)).await
    }

    async fn delete(&self, path: &str) -> (StatusCode, JsonValue) {
        self.call(reqwest::Method::DELETE, path, None).await
    }

    async fn order_count(&self) -> usize {
        let (status, body) = self.get("/api/orders").await;
        if status == StatusCode::NOT_FOUND {
            return 0;
        }
        body["data"].as_array().unwrap().len()
    }
}

fn order_body(number: &str) -> JsonValue {
    json!({
        "order_number": number,
        "order_date": "2024-05-01",
        "total_products": 3,
        "final_price": 42.5,
        "status": "pending"
    })
}

fn product_body(name: &str, unit_price: f64) -> JsonValue {
    json!({
        "name": name,
        "unit_price": unit_price,
        "image_url": format!("https://cdn.example.com/{}.png", name.to_lowercase())
    })
}

#[tokio::test]
async fn listing_empty_tables_is_404_and_non_empty_is_200() {
    let server = TestServer::start().await;

    let (status, body) = server.get("/api/orders").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "No orders found.");

    let (status, _) = server.get("/api/products").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    server.post("/api/orders", order_body("A-1")).await;
    server.post("/api/orders", order_body("A-2")).await;
    server.post("/api/products", product_body("Mug", 9.5)).await;

    let (status, body) = server.get("/api/orders").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 2);

    let (status, body) = server.get("/api/products").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn unknown_ids_are_404_and_leave_existing_rows_alone() {
    let server = TestServer::start().await;
    let (_, order) = server.post("/api/orders", order_body("A-1")).await;
    let order_id = order["data"]["id"].as_i64().unwrap();
    let (_, product) = server.post("/api/products", product_body("Mug", 9.5)).await;
    let product_id = product["data"]["id"].as_i64().unwrap();
    let missing = order_id.max(product_id) + 100;

    for path in [
        format!("/api/orders/{}", missing),
        format!("/api/products/{}", missing),
        format!("/api/products/findByOrderId/{}", missing),
    ] {
        let (status, _) = server.get(&path).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "GET {}", path);
    }

    let (status, _) = server
        .put(&format!("/api/orders/{}", missing), json!({
            "order_number": "A-1",
            "order_date": "2024-06-01",
            "total_products": 9,
            "final_price": 1.0,
            "status": "cancelled"
        }))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = server
        .patch(&format!("/api/orders/changeStatus/{}", missing), json!({ "status": "paid" }))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = server.delete(&format!("/api/orders/{}", missing)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = server
        .put(&format!("/api/products/{}", missing), product_body("Cup", 1.0))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = server.delete(&format!("/api/products/{}", missing)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    assert_eq!(server.order_count().await, 1);
    let (_, orders) = server.get("/api/orders").await;
    assert_eq!(orders["data"][0], order["data"]);
    assert_eq!(orders["data"][0]["status"], "pending");
    assert_eq!(orders["data"][0]["final_price"], 42.5);

    let (_, products) = server.get("/api/products").await;
    assert_eq!(products["data"].as_array().unwrap().len(), 1);
    assert_eq!(products["data"][0]["name"], "Mug");
    assert_eq!(products["data"][0]["unit_price"], 9.5);
}

#[tokio::test]
async fn duplicate_order_number_is_400_and_inserts_nothing() {
    let server = TestServer::start().await;

    let (status, _) = server.post("/api/orders", order_body("A-1")).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = server.post("/api/orders", order_body("A-1")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Order number 'A-1' is already registered.");
    assert_eq!(server.order_count().await, 1);
}

#[tokio::test]
async fn created_order_is_readable_by_its_generated_id() {
    let server = TestServer::start().await;

    let (status, created) = server.post("/api/orders", order_body("A-7")).await;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["data"]["id"].as_i64().unwrap();

    let (status, fetched) = server.get(&format!("/api/orders/{}", id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["data"], created["data"]);
    assert_eq!(fetched["data"]["order_number"], "A-7");
    assert_eq!(fetched["data"]["order_date"], "2024-05-01");
}

#[tokio::test]
async fn change_status_requires_status_before_mutating() {
    let server = TestServer::start().await;
    let (_, created) = server.post("/api/orders", order_body("A-1")).await;
    let id = created["data"]["id"].as_i64().unwrap();

    let (status, body) = server.patch(&format!("/api/orders/changeStatus/{}", id), json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "The 'status' field is required.");

    let (_, fetched) = server.get(&format!("/api/orders/{}", id)).await;
    assert_eq!(fetched["data"]["status"], "pending");

    let (status, body) = server
        .patch(&format!("/api/orders/changeStatus/{}", id), json!({ "status": "shipped" }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!({ "id": id, "status": "shipped" }));
}

#[tokio::test]
async fn find_by_order_returns_joined_rows() {
    let server = TestServer::start().await;
    let (_, order) = server.post("/api/orders", order_body("A-1")).await;
    let order_id = order["data"]["id"].as_i64().unwrap();
    let (_, mug) = server.post("/api/products", product_body("Mug", 10.0)).await;
    let (_, cup) = server.post("/api/products", product_body("Cup", 4.0)).await;

    for (product, qty) in [(&mug, 2), (&cup, 3)] {
        let unit_price = product["data"]["unit_price"].as_f64().unwrap();
        let (status, body) = server
            .post(
                "/api/orders/createDetails",
                json!({
                    "order_id": order_id,
                    "product_id": product["data"]["id"],
                    "qty": qty,
                    "total_price": unit_price * qty as f64
                }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
        assert!(body["data"]["id"].is_i64());
    }

    let (status, body) = server.get(&format!("/api/products/findByOrderId/{}", order_id)).await;
    assert_eq!(status, StatusCode::OK);
    let rows = body["data"].as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["product_name"], "Mug");
    assert_eq!(rows[0]["unit_price"], 10.0);
    assert_eq!(rows[0]["qty"], 2);
    assert_eq!(rows[0]["total_price"], 20.0);
    assert_eq!(rows[1]["product_name"], "Cup");
    assert_eq!(rows[1]["total_price"], 12.0);
}

#[tokio::test]
async fn order_round_trip() {
    let server = TestServer::start().await;

    let (_, created) = server.post("/api/orders", order_body("A-1")).await;
    let id = created["data"]["id"].as_i64().unwrap();
    let path = format!("/api/orders/{}", id);

    let mut changed = order_body("A-1b");
    changed["final_price"] = json!(99.0);
    changed["status"] = json!("paid");
    let (status, body) = server.put(&path, changed).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"], id);

    let (_, fetched) = server.get(&path).await;
    assert_eq!(fetched["data"]["order_number"], "A-1b");
    assert_eq!(fetched["data"]["final_price"], 99.0);
    assert_eq!(fetched["data"]["status"], "paid");

    let (status, body) = server.delete(&path).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Order deleted successfully");

    let (status, _) = server.get(&path).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn product_round_trip() {
    let server = TestServer::start().await;

    let (status, created) = server.post("/api/products", product_body("Mug", 9.5)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(created["data"].get("image_url").is_none());
    let id = created["data"]["id"].as_i64().unwrap();
    let path = format!("/api/products/{}", id);

    let (_, fetched) = server.get(&path).await;
    assert_eq!(fetched["data"]["image_url"], "https://cdn.example.com/mug.png");

    let (status, updated) = server.put(&path, product_body("Big Mug", 12.0)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["data"]["image_url"], "https://cdn.example.com/big mug.png");

    let (_, fetched) = server.get(&path).await;
    assert_eq!(fetched["data"]["name"], "Big Mug");
    assert_eq!(fetched["data"]["unit_price"], 12.0);

    let (status, _) = server.delete(&path).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = server.get(&path).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_details_answers_200_even_without_a_match() {
    let server = TestServer::start().await;

    let body = json!({ "order_id": 1, "product_id": 2, "qty": 5, "total_price": 50.0 });
    let (status, response) = server.put("/api/orders/updateDetails", body.clone()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["data"], body);
}

#[tokio::test]
async fn update_details_changes_the_matching_line_item() {
    let server = TestServer::start().await;
    let (_, order) = server.post("/api/orders", order_body("A-1")).await;
    let order_id = order["data"]["id"].as_i64().unwrap();
    let (_, mug) = server.post("/api/products", product_body("Mug", 10.0)).await;
    let product_id = mug["data"]["id"].as_i64().unwrap();

    server
        .post(
            "/api/orders/createDetails",
            json!({ "order_id": order_id, "product_id": product_id, "qty": 1, "total_price": 10.0 }),
        )
        .await;
    server
        .put(
            "/api/orders/updateDetails",
            json!({ "order_id": order_id, "product_id": product_id, "qty": 4, "total_price": 40.0 }),
        )
        .await;

    let (_, rows) = server.get(&format!("/api/products/findByOrderId/{}", order_id)).await;
    assert_eq!(rows["data"][0]["qty"], 4);
    assert_eq!(rows["data"][0]["total_price"], 40.0);
}

#[tokio::test]
async fn order_with_details_is_all_or_nothing() {
    let server = TestServer::start().await;
    let (_, mug) = server.post("/api/products", product_body("Mug", 10.0)).await;
    let product_id = mug["data"]["id"].as_i64().unwrap();

    let (status, body) = server
        .post(
            "/api/orders/withDetails",
            json!({
                "order": order_body("A-1"),
                "items": [
                    { "product_id": product_id, "qty": 1, "total_price": 10.0 },
                    { "product_id": 404, "qty": 1, "total_price": 1.0 }
                ]
            }),
        )
        .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].is_string());
    assert_eq!(server.order_count().await, 0);
    assert_eq!(server.store.line_item_count().await, 0);

    let (status, body) = server
        .post(
            "/api/orders/withDetails",
            json!({
                "order": order_body("A-1"),
                "items": [{ "product_id": product_id, "qty": 2, "total_price": 20.0 }]
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let order_id = body["data"]["order"]["id"].as_i64().unwrap();
    assert_eq!(body["data"]["items"][0]["order_id"], order_id);

    let (status, rows) = server.get(&format!("/api/products/findByOrderId/{}", order_id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(rows["data"].as_array().unwrap().len(), 1);

    let (status, _) = server
        .post(
            "/api/orders/withDetails",
            json!({ "order": order_body("A-1"), "items": [{ "product_id": product_id, "qty": 1, "total_price": 10.0 }] }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
