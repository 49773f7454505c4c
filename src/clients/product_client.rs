//! # Product Client
//!
//! High-level API for the `Product` actor. It wraps a `ResourceClient<Product>` that is passed
//! in at construction, so tests can hand it a mock store instead of a running actor.
//!
//! Every method classifies failures into [`ProductError`] before returning; no
//! [`FrameworkError`] reaches the caller. Input validation happens here, before any request is
//! sent.
use crate::framework::{ActorClient, Filter, FrameworkError, ResourceClient};
use crate::model::{Product, ProductCreate, ProductId, ProductUpdate};
use crate::product_actor::{
    ErrorKind, ProductAction, ProductActionResult, ProductError, Quantity, StockAdjustment,
};
use async_trait::async_trait;
use tracing::{debug, error, instrument};

/// Client for interacting with the Product actor.
#[derive(Clone)]
pub struct ProductClient {
    inner: ResourceClient<Product>,
}

impl ProductClient {
    pub fn new(inner: ResourceClient<Product>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ActorClient<Product> for ProductClient {
    type Error = ProductError;

    fn inner(&self) -> &ResourceClient<Product> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        let err = ProductError::from(e);
        if err.kind() == ErrorKind::Internal {
            error!(error = %err, "Product store fault");
        }
        err
    }
}

impl ProductClient {
    /// Creates a batch of products. Either all of them are stored or none is.
    ///
    /// Returns the new ids in input order.
    #[instrument(skip(self, products), fields(count = products.len()))]
    pub async fn create_products(
        &self,
        products: Vec<ProductCreate>,
    ) -> Result<Vec<ProductId>, ProductError> {
        if products.is_empty() {
            return Err(ProductError::validation("At least one product is required"));
        }
        for (i, product) in products.iter().enumerate() {
            product
                .validate()
                .map_err(|msg| ProductError::Validation(format!("Product {}: {}", i + 1, msg)))?;
        }
        debug!("Sending request");
        self.inner
            .create_many(products)
            .await
            .map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn create_product(&self, params: ProductCreate) -> Result<ProductId, ProductError> {
        params.validate().map_err(ProductError::Validation)?;
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn get_product(&self, id: ProductId) -> Result<Product, ProductError> {
        ActorClient::get(self, id)
            .await?
            .ok_or_else(|| ProductError::not_found(id))
    }

    /// All products, ordered by id.
    pub async fn list_products(&self) -> Result<Vec<Product>, ProductError> {
        ActorClient::list(self).await
    }

    /// Products whose stock is at or below their low-stock threshold.
    #[instrument(skip(self))]
    pub async fn list_low_stock(&self) -> Result<Vec<Product>, ProductError> {
        debug!("Sending request");
        self.inner
            .list_where(Filter::new(Product::is_low_stock))
            .await
            .map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn update_product(
        &self,
        id: ProductId,
        update: ProductUpdate,
    ) -> Result<Product, ProductError> {
        update.validate().map_err(ProductError::Validation)?;
        debug!("Sending request");
        self.inner.update(id, update).await.map_err(Self::map_error)
    }

    pub async fn delete_product(&self, id: ProductId) -> Result<(), ProductError> {
        ActorClient::delete(self, id).await
    }

    /// Check the current stock level for a product.
    #[instrument(skip(self))]
    pub async fn check_stock(&self, id: ProductId) -> Result<u32, ProductError> {
        debug!("Checking stock for product {}", id);
        match self
            .inner
            .perform_action(id, ProductAction::CheckStock)
            .await
            .map_err(Self::map_error)?
        {
            ProductActionResult::CheckStock(level) => Ok(level),
            other => Err(unexpected_result("CheckStock", &other)),
        }
    }

    /// Adds `quantity` units (default 1) to a product's stock.
    pub async fn increase_stock(
        &self,
        id: ProductId,
        quantity: Option<Quantity>,
    ) -> Result<Product, ProductError> {
        self.adjust_stock(id, StockAdjustment::Increase(quantity.unwrap_or_default()))
            .await
    }

    /// Removes `quantity` units (default 1) from a product's stock.
    ///
    /// Fails with `InsufficientStock`, leaving stock unchanged, when fewer units are on hand.
    pub async fn decrease_stock(
        &self,
        id: ProductId,
        quantity: Option<Quantity>,
    ) -> Result<Product, ProductError> {
        self.adjust_stock(id, StockAdjustment::Decrease(quantity.unwrap_or_default()))
            .await
    }

    #[instrument(skip(self), fields(delta = adjustment.delta()))]
    async fn adjust_stock(
        &self,
        id: ProductId,
        adjustment: StockAdjustment,
    ) -> Result<Product, ProductError> {
        debug!("Adjusting stock for product {}", id);
        match self
            .inner
            .perform_action(id, ProductAction::AdjustStock(adjustment))
            .await
            .map_err(Self::map_error)?
        {
            ProductActionResult::AdjustStock(product) => Ok(product),
            other => Err(unexpected_result("AdjustStock", &other)),
        }
    }
}

fn unexpected_result(action: &str, result: &ProductActionResult) -> ProductError {
    error!(action, ?result, "Action returned a mismatched result");
    ProductError::Internal(format!("{action} returned {result:?}"))
}
