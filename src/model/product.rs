/// Represents a product in the inventory.
///
/// # Actor Framework
/// This struct implements the [`ActorEntity`](crate::framework::ActorEntity) trait,
/// allowing it to be managed by a [`ResourceActor`](crate::framework::ResourceActor).
///
/// See [`impl ActorEntity for Product`](#impl-ActorEntity-for-Product) for details on:
/// - Creation parameters ([`ProductCreate`])
/// - Update parameters ([`ProductUpdate`])
/// - Custom actions ([`ProductAction`](crate::product_actor::ProductAction))
use serde::{Deserialize, Serialize};

use crate::product_actor::ProductError;
use std::fmt::Display;
use std::str::FromStr;

/// Type-safe identifier for Products. Assigned by the store, serialized as a bare number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub u32);

impl From<u32> for ProductId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Parses an id taken from a path segment.
///
/// Only plain ASCII digits are accepted: no sign, no whitespace, no leading `+`. Anything
/// else, including values that overflow `u32`, is a validation error.
impl FromStr for ProductId {
    type Err = ProductError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ProductError::Validation("Invalid product id".to_string()));
        }
        s.parse::<u32>()
            .map(ProductId)
            .map_err(|_| ProductError::Validation("Invalid product id".to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub stock_quantity: u32,
    pub low_stock_threshold: u32,
}

impl Product {
    /// Creates a new Product instance.
    ///
    /// # Arguments
    /// * `id` - Unique identifier (set by the actor system)
    /// * `params` - Validated creation payload
    pub fn new(id: ProductId, params: ProductCreate) -> Self {
        Self {
            id,
            name: params.name,
            description: params.description,
            stock_quantity: params.stock_quantity,
            low_stock_threshold: params.low_stock_threshold,
        }
    }

    /// A product is low on stock when it is at or below its threshold.
    pub fn is_low_stock(&self) -> bool {
        self.stock_quantity <= self.low_stock_threshold
    }
}

/// Payload for creating a product.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductCreate {
    pub name: String,
    pub description: String,
    pub stock_quantity: u32,
    pub low_stock_threshold: u32,
}

impl ProductCreate {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            stock_quantity: 0,
            low_stock_threshold: crate::config::DEFAULT_LOW_STOCK_THRESHOLD,
        }
    }

    pub fn with_stock(mut self, stock_quantity: u32) -> Self {
        self.stock_quantity = stock_quantity;
        self
    }

    pub fn with_threshold(mut self, low_stock_threshold: u32) -> Self {
        self.low_stock_threshold = low_stock_threshold;
        self
    }

    /// Name and description must both contain something other than whitespace.
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() || self.description.trim().is_empty() {
            return Err("Name and description are required".to_string());
        }
        Ok(())
    }
}

/// Field update for a product. Stock is never changed through an update.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub low_stock_threshold: Option<u32>,
}

impl ProductUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none() && self.low_stock_threshold.is_none()
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.is_empty() {
            return Err("No fields to update".to_string());
        }
        if self.name.as_deref().is_some_and(|n| n.trim().is_empty()) {
            return Err("Name cannot be empty".to_string());
        }
        if self
            .description
            .as_deref()
            .is_some_and(|d| d.trim().is_empty())
        {
            return Err("Description cannot be empty".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_id_parses_plain_digits_only() {
        assert_eq!("42".parse::<ProductId>().unwrap(), ProductId(42));
        for bad in ["", "-1", "+1", " 1", "1 ", "invalid-id", "1.5", "4294967296"] {
            let err = bad.parse::<ProductId>().unwrap_err();
            assert_eq!(err, ProductError::Validation("Invalid product id".into()), "{bad:?}");
        }
    }

    #[test]
    fn test_low_stock_is_inclusive() {
        let p = |stock| Product::new(ProductId(1), ProductCreate::new("a", "b").with_stock(stock).with_threshold(5));
        assert!(p(4).is_low_stock());
        assert!(p(5).is_low_stock());
        assert!(!p(6).is_low_stock());
    }

    #[test]
    fn test_create_requires_name_and_description() {
        assert!(ProductCreate::new("Widget", "A widget").validate().is_ok());
        assert!(ProductCreate::new("  ", "A widget").validate().is_err());
        assert!(ProductCreate::new("Widget", "").validate().is_err());
    }

    #[test]
    fn test_update_needs_a_field() {
        assert_eq!(
            ProductUpdate::default().validate().unwrap_err(),
            "No fields to update"
        );
        let threshold_only = ProductUpdate {
            low_stock_threshold: Some(0),
            ..Default::default()
        };
        assert!(threshold_only.validate().is_ok());
        let blank_name = ProductUpdate {
            name: Some(" ".into()),
            ..Default::default()
        };
        assert!(blank_name.validate().is_err());
    }
}
