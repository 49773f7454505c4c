use inventory_api::config::AppConfig;
use inventory_api::http::{app, AppState};
use inventory_api::lifecycle::InventorySystem;
use reqwest::StatusCode;
use serde_json::{json, Value};

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
    _system: InventorySystem,
}

impl TestServer {
    async fn spawn() -> Self {
        let config = AppConfig::default();
        let system = InventorySystem::new(&config);
        let state = AppState::new(
            system.product_client.clone(),
            config.default_low_stock_threshold,
        );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}/products", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app(state)).await.unwrap();
        });

        Self {
            base_url,
            handle,
            _system: system,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Creates one product and returns its id.
    async fn seed(&self, client: &reqwest::Client, name: &str, stock: u32) -> u64 {
        let res = client
            .post(self.url("/create-products"))
            .json(&json!({ "name": name, "description": "seeded", "stock_quantity": stock }))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::CREATED);
        let body: Value = res.json().await.unwrap();
        body["ids"][0].as_u64().unwrap()
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn error_body(res: reqwest::Response, status: StatusCode) -> Value {
    assert_eq!(res.status(), status);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["statusCode"], json!(status.as_u16()));
    body
}

#[tokio::test]
async fn create_then_fetch_product() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .post(srv.url("/create-products"))
        .json(&json!([
            { "name": "Widget", "description": "A widget", "stock_quantity": 10 },
            { "name": "Gadget", "description": "A gadget" },
        ]))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["message"], "Products created successfully");
    let ids = body["ids"].as_array().unwrap().clone();
    assert_eq!(ids.len(), 2);

    let product: Value = client
        .get(srv.url(&format!("/{}", ids[1])))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(product["name"], "Gadget");
    assert_eq!(product["stock_quantity"], 0);
    assert_eq!(product["low_stock_threshold"], 10);

    let all: Value = client.get(srv.url("")).send().await.unwrap().json().await.unwrap();
    assert_eq!(all.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn create_rejects_missing_fields() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .post(srv.url("/create-products"))
        .json(&json!({ "name": "Widget" }))
        .send()
        .await
        .unwrap();
    let body = error_body(res, StatusCode::BAD_REQUEST).await;
    assert_eq!(body["error"], "validation_error");
    assert!(body["message"]
        .as_str()
        .unwrap()
        .contains("Name and description are required"));
}

#[tokio::test]
async fn duplicate_name_is_conflict() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    srv.seed(&client, "Widget", 1).await;

    let res = client
        .post(srv.url("/create-products"))
        .json(&json!({ "name": "Widget", "description": "again" }))
        .send()
        .await
        .unwrap();
    let body = error_body(res, StatusCode::CONFLICT).await;
    assert_eq!(body["error"], "conflict");
}

#[tokio::test]
async fn increase_and_decrease_stock() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let id = srv.seed(&client, "Widget", 10).await;

    let product: Value = client
        .patch(srv.url(&format!("/{id}/increase-stock")))
        .json(&json!({ "quantity": 5 }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(product["stock_quantity"], 15);
    assert_eq!(product["id"], json!(id));

    let product: Value = client
        .patch(srv.url(&format!("/{id}/decrease-stock")))
        .json(&json!({ "quantity": 3 }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(product["stock_quantity"], 12);
}

#[tokio::test]
async fn empty_body_adjusts_by_one() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let id = srv.seed(&client, "Widget", 10).await;

    let res = client
        .patch(srv.url(&format!("/{id}/decrease-stock")))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let product: Value = res.json().await.unwrap();
    assert_eq!(product["stock_quantity"], 9);
}

#[tokio::test]
async fn insufficient_stock_leaves_product_unchanged() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let id = srv.seed(&client, "Widget", 10).await;

    let res = client
        .patch(srv.url(&format!("/{id}/decrease-stock")))
        .json(&json!({ "quantity": 15 }))
        .send()
        .await
        .unwrap();
    let body = error_body(res, StatusCode::BAD_REQUEST).await;
    assert_eq!(body["error"], "insufficient_stock");
    assert!(body["message"]
        .as_str()
        .unwrap()
        .starts_with("Insufficient stock quantity"));

    let product: Value = client
        .get(srv.url(&format!("/{id}")))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(product["stock_quantity"], 10);
}

#[tokio::test]
async fn unknown_product_is_not_found() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client.get(srv.url("/999")).send().await.unwrap();
    let body = error_body(res, StatusCode::NOT_FOUND).await;
    assert_eq!(body["message"], "Product not found");

    let res = client
        .patch(srv.url("/999/increase-stock"))
        .json(&json!({ "quantity": 5 }))
        .send()
        .await
        .unwrap();
    error_body(res, StatusCode::NOT_FOUND).await;
}

#[tokio::test]
async fn malformed_ids_are_rejected() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    for id in ["invalid-id", "-1", "1.5"] {
        let res = client
            .patch(srv.url(&format!("/{id}/increase-stock")))
            .json(&json!({ "quantity": 1 }))
            .send()
            .await
            .unwrap();
        let body = error_body(res, StatusCode::BAD_REQUEST).await;
        assert_eq!(body["message"], "Invalid product id");
    }
}

#[tokio::test]
async fn malformed_quantities_are_rejected() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let id = srv.seed(&client, "Widget", 10).await;

    for quantity in [json!("invalid"), json!(-5), json!(2.5), json!("5")] {
        let res = client
            .patch(srv.url(&format!("/{id}/decrease-stock")))
            .json(&json!({ "quantity": quantity }))
            .send()
            .await
            .unwrap();
        let body = error_body(res, StatusCode::BAD_REQUEST).await;
        assert_eq!(body["message"], "Invalid quantity");
    }

    let res = client
        .patch(srv.url(&format!("/{id}/increase-stock")))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();
    error_body(res, StatusCode::BAD_REQUEST).await;
}

#[tokio::test]
async fn update_delete_and_low_stock() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let low = srv.seed(&client, "Nut", 2).await;
    let plenty = srv.seed(&client, "Bolt", 500).await;

    let listed: Value = client
        .get(srv.url("/low-stock"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let names: Vec<_> = listed
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, vec!["Nut"]);

    let res = client
        .patch(srv.url(&format!("/{plenty}")))
        .json(&json!({ "description": "Hex bolt", "stock_quantity": 0 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let updated: Value = res.json().await.unwrap();
    assert_eq!(updated["description"], "Hex bolt");
    assert_eq!(updated["stock_quantity"], 500);

    let res = client
        .patch(srv.url(&format!("/{plenty}")))
        .json(&json!({}))
        .send()
        .await
        .unwrap();
    let body = error_body(res, StatusCode::BAD_REQUEST).await;
    assert_eq!(body["message"], "No fields to update");

    let res = client
        .delete(srv.url(&format!("/{low}")))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["message"], "Product deleted successfully");

    let res = client
        .delete(srv.url(&format!("/{low}")))
        .send()
        .await
        .unwrap();
    error_body(res, StatusCode::NOT_FOUND).await;
}
