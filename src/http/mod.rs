//! HTTP transport.
//!
//! A thin axum layer over [`ProductClient`]: it parses paths and bodies, calls the client and
//! maps [`ProductError`](crate::product_actor::ProductError) kinds onto status codes. All
//! routes live under `/products`.

pub mod dto;
pub mod errors;
pub mod routes;

use std::future::Future;

use axum::{routing::get, Router};
use tokio::net::TcpListener;
use tracing::info;

use crate::clients::ProductClient;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub products: ProductClient,
    /// Threshold for created products that omit one.
    pub default_low_stock_threshold: u32,
}

impl AppState {
    pub fn new(products: ProductClient, default_low_stock_threshold: u32) -> Self {
        Self {
            products,
            default_low_stock_threshold,
        }
    }
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(routes::index))
        .nest("/products", routes::router())
        .with_state(state)
}

/// Serves the API on `listener` until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, state: AppState, shutdown: F) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = listener.local_addr()?;
    info!(%addr, "HTTP server listening");
    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown)
        .await
}
