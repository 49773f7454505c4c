//! Error types for the Product actor.

use crate::framework::FrameworkError;
use thiserror::Error;

/// Failure kind, independent of the message. Transports map on this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Validation,
    NotFound,
    InsufficientStock,
    Conflict,
    Internal,
}

impl ErrorKind {
    /// Stable machine-readable code.
    pub fn code(self) -> &'static str {
        match self {
            ErrorKind::Validation => "validation_error",
            ErrorKind::NotFound => "not_found",
            ErrorKind::InsufficientStock => "insufficient_stock",
            ErrorKind::Conflict => "conflict",
            ErrorKind::Internal => "internal_failure",
        }
    }
}

/// Errors that can occur during product operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ProductError {
    /// Caller-supplied input is malformed. Detected before any state is touched.
    #[error("{0}")]
    Validation(String),

    /// The requested product does not exist.
    #[error("Product not found")]
    NotFound { id: String },

    /// A decrease would take stock below zero.
    #[error("Insufficient stock quantity: requested {requested}, available {available}")]
    InsufficientStock { requested: u32, available: u32 },

    /// Another product already uses this name.
    #[error("A product with the name '{0}' already exists. Please choose a different name.")]
    Conflict(String),

    /// Unexpected store or transport fault. The detail is for logs only.
    #[error("Internal failure: {0}")]
    Internal(String),
}

impl ProductError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ProductError::Validation(_) => ErrorKind::Validation,
            ProductError::NotFound { .. } => ErrorKind::NotFound,
            ProductError::InsufficientStock { .. } => ErrorKind::InsufficientStock,
            ProductError::Conflict(_) => ErrorKind::Conflict,
            ProductError::Internal(_) => ErrorKind::Internal,
        }
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        ProductError::Validation(msg.into())
    }

    pub fn not_found(id: impl ToString) -> Self {
        ProductError::NotFound { id: id.to_string() }
    }
}

/// Classifies a store fault into the product taxonomy.
///
/// Entity errors raised by `Product` hooks are recovered as-is. Anything the taxonomy does not
/// name becomes `Internal`.
impl From<FrameworkError> for ProductError {
    fn from(e: FrameworkError) -> Self {
        match e {
            FrameworkError::NotFound(id) => ProductError::NotFound { id },
            FrameworkError::Conflict(name) => ProductError::Conflict(name),
            FrameworkError::EntityError(inner) => match inner.downcast::<ProductError>() {
                Ok(product_error) => *product_error,
                Err(other) => ProductError::Internal(other.to_string()),
            },
            other => ProductError::Internal(other.to_string()),
        }
    }
}

impl From<String> for ProductError {
    fn from(msg: String) -> Self {
        ProductError::Internal(msg)
    }
}
