//! Custom actions for the Product actor.
//!
//! These are the stock operations that do not fit plain CRUD. They are handled by
//! [`ActorEntity::handle_action`](crate::framework::ActorEntity::handle_action) inside the
//! actor, so each one reads and writes a single consistent snapshot of the product.

use super::stock::StockAdjustment;
use crate::model::Product;

/// Custom actions for Product entities.
#[derive(Debug, Clone)]
pub enum ProductAction {
    /// Reads the current stock level without modifying it.
    CheckStock,
    /// Applies an increase or decrease to the stock level.
    ///
    /// # Errors
    /// A decrease fails with `InsufficientStock` if it exceeds the stock on hand. Nothing is
    /// written in that case.
    AdjustStock(StockAdjustment),
}

/// Results from ProductActions - variants match 1:1 with ProductAction
#[derive(Debug, Clone)]
pub enum ProductActionResult {
    /// Result from CheckStock action - the current stock level
    CheckStock(u32),
    /// Result from AdjustStock action - the product after the change
    AdjustStock(Product),
}
