//! Commerce error types.

use thiserror::Error;

/// Errors that can occur in cart and catalog operations.
#[derive(Error, Debug)]
pub enum CommerceError {
    /// Product not found.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Delivery option not found.
    #[error("Delivery option not found: {0}")]
    DeliveryOptionNotFound(String),

    /// Invalid quantity.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i64),

    /// Quantity exceeds maximum allowed.
    #[error("Quantity {0} exceeds maximum allowed ({1})")]
    QuantityExceedsLimit(i64, i64),

    /// Arithmetic overflow.
    #[error("Arithmetic overflow in money calculation")]
    Overflow,

    /// Catalog contains the same product twice.
    #[error("Duplicate product in catalog: {0}")]
    DuplicateProduct(String),

    /// Catalog contains the same delivery option twice.
    #[error("Duplicate delivery option in catalog: {0}")]
    DuplicateDeliveryOption(String),

    /// Negative price in catalog data.
    #[error("Invalid price for {id}: {price_cents}")]
    InvalidPrice { id: String, price_cents: i64 },

    /// Catalog file could not be read.
    #[error("Failed to load catalog from {path}: {source}")]
    CatalogLoad {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Cache error.
    #[error("Cache error: {0}")]
    CacheError(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<checkout_cache::CacheError> for CommerceError {
    fn from(e: checkout_cache::CacheError) -> Self {
        CommerceError::CacheError(e.to_string())
    }
}

impl From<serde_json::Error> for CommerceError {
    fn from(e: serde_json::Error) -> Self {
        CommerceError::SerializationError(e.to_string())
    }
}
