use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, patch, post},
    Json, Router,
};
use serde_json::json;
use tracing::info;

use crate::model::ProductId;

use super::dto;
use super::errors::ApiError;
use super::AppState;

type ApiResult = Result<Response, ApiError>;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/create-products", post(create_products))
        .route("/", get(list_products))
        .route("/low-stock", get(list_low_stock))
        .route(
            "/:id",
            get(get_product).patch(update_product).delete(delete_product),
        )
        .route("/:id/increase-stock", patch(increase_stock))
        .route("/:id/decrease-stock", patch(decrease_stock))
}

pub async fn index() -> Json<serde_json::Value> {
    Json(json!({
        "message": "Inventory API",
        "routes": [
            "POST /products/create-products",
            "GET /products",
            "GET /products/low-stock",
            "GET /products/:id",
            "PATCH /products/:id",
            "DELETE /products/:id",
            "PATCH /products/:id/increase-stock",
            "PATCH /products/:id/decrease-stock",
        ],
    }))
}

pub async fn create_products(State(state): State<AppState>, body: Bytes) -> ApiResult {
    let body = dto::parse_body(&body)?;
    let products = dto::product_batch(&body, state.default_low_stock_threshold)?;
    let ids = state.products.create_products(products).await?;
    info!(count = ids.len(), "Products created");
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Products created successfully",
            "ids": ids,
        })),
    )
        .into_response())
}

pub async fn list_products(State(state): State<AppState>) -> ApiResult {
    let products = state.products.list_products().await?;
    Ok(Json(products).into_response())
}

pub async fn list_low_stock(State(state): State<AppState>) -> ApiResult {
    let products = state.products.list_low_stock().await?;
    Ok(Json(products).into_response())
}

pub async fn get_product(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult {
    let id: ProductId = id.parse()?;
    let product = state.products.get_product(id).await?;
    Ok(Json(product).into_response())
}

pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> ApiResult {
    let id: ProductId = id.parse()?;
    let update = dto::product_update(&dto::parse_body(&body)?)?;
    let product = state.products.update_product(id, update).await?;
    Ok(Json(product).into_response())
}

pub async fn delete_product(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult {
    let id: ProductId = id.parse()?;
    state.products.delete_product(id).await?;
    Ok(Json(json!({ "message": "Product deleted successfully" })).into_response())
}

pub async fn increase_stock(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> ApiResult {
    let id: ProductId = id.parse()?;
    let quantity = dto::quantity(&dto::parse_body(&body)?)?;
    let product = state.products.increase_stock(id, quantity).await?;
    Ok(Json(product).into_response())
}

pub async fn decrease_stock(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> ApiResult {
    let id: ProductId = id.parse()?;
    let quantity = dto::quantity(&dto::parse_body(&body)?)?;
    let product = state.products.decrease_stock(id, quantity).await?;
    Ok(Json(product).into_response())
}
