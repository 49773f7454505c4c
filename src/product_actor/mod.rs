//! # Product Actor
//!
//! The Product resource actor: the record store for products and the home of the stock
//! adjustment engine.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](crate::framework::ActorEntity) implementation for [`Product`]
//! - [`error`] - [`ProductError`] and its [`ErrorKind`]
//! - [`actions`] - [`ProductAction`] and [`ProductActionResult`]
//! - [`stock`] - [`Quantity`] and the checked [`StockAdjustment`] arithmetic
//! - [`new()`] - Factory function that creates the actor and client
//!
//! ## Atomicity
//!
//! An `AdjustStock` action reads the stock, compares it with the requested quantity and
//! writes the result inside one actor turn. Two concurrent decreases of the same product are
//! therefore applied one after the other, and the second sees the first one's result:
//!
//! ```rust,ignore
//! // stock = 10
//! let (a, b) = tokio::join!(
//!     client.decrease_stock(id, Some(Quantity::new(6))),
//!     client.decrease_stock(id, Some(Quantity::new(6))),
//! );
//! // exactly one is Ok (stock = 4), the other is InsufficientStock
//! ```

pub mod actions;
pub mod entity;
pub mod error;
pub mod stock;

pub use actions::*;
pub use error::*;
pub use stock::*;

use crate::framework::{ResourceActor, ResourceClient};
use crate::model::Product;

/// Creates a new Product actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Product>, ResourceClient<Product>) {
    ResourceActor::new(buffer_size)
}
