//! [`ActorEntity`] implementation for the Product domain type.
//!
//! Products are unique by exact name. Stock changes only through [`ProductAction`].

use super::actions::{ProductAction, ProductActionResult};
use super::error::ProductError;
use crate::framework::ActorEntity;
use crate::model::{Product, ProductCreate, ProductId, ProductUpdate};
use async_trait::async_trait;

#[async_trait]
impl ActorEntity for Product {
    type Id = ProductId;
    type Create = ProductCreate;
    type Update = ProductUpdate;
    type Action = ProductAction;
    type ActionResult = ProductActionResult;
    type Context = ();
    type Error = ProductError;

    /// Creates a new Product from creation parameters.
    fn from_create_params(id: ProductId, params: ProductCreate) -> Result<Self, Self::Error> {
        params.validate().map_err(ProductError::Validation)?;
        Ok(Self::new(id, params))
    }

    fn unique_key(&self) -> Option<&str> {
        Some(&self.name)
    }

    /// Handles field updates. Validation runs before any field is touched.
    async fn on_update(
        &mut self,
        update: ProductUpdate,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error> {
        update.validate().map_err(ProductError::Validation)?;
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(threshold) = update.low_stock_threshold {
            self.low_stock_threshold = threshold;
        }
        Ok(())
    }

    /// Handles custom actions for the Product entity.
    ///
    /// # Actions
    /// - `CheckStock`: Returns the stock on hand
    /// - `AdjustStock`: Applies the adjustment and returns the updated product, or fails
    ///   without changing stock
    async fn handle_action(
        &mut self,
        action: ProductAction,
        _ctx: &Self::Context,
    ) -> Result<ProductActionResult, Self::Error> {
        match action {
            ProductAction::CheckStock => Ok(ProductActionResult::CheckStock(self.stock_quantity)),
            ProductAction::AdjustStock(adjustment) => {
                self.stock_quantity = adjustment.apply(self.stock_quantity)?;
                Ok(ProductActionResult::AdjustStock(self.clone()))
            }
        }
    }
}
