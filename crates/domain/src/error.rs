//! Domain error types.

use thiserror::Error;

/// Errors that can occur while building a catalog or pricing an order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderError {
    /// The product is not present in the catalog.
    #[error("Invalid product ID: {product_id}")]
    UnknownProduct { product_id: String },

    /// Invalid quantity.
    #[error("Invalid quantity: {quantity} (must be greater than 0)")]
    InvalidQuantity { quantity: u32 },

    /// Invalid price.
    #[error("Invalid price for product {product_id}: {price} (must not be negative)")]
    InvalidPrice { product_id: String, price: i64 },

    /// The same identifier appears twice in the catalog source.
    #[error("Duplicate product ID in catalog: {product_id}")]
    DuplicateProduct { product_id: String },

    /// The order total does not fit in the money representation.
    #[error("Order total out of range for product {product_id} x {quantity}")]
    AmountOverflow { product_id: String, quantity: u32 },

    /// The catalog source yielded no products.
    #[error("Catalog contains no products")]
    EmptyCatalog,
}
