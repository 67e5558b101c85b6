//! Domain layer for the order service.
//!
//! This crate provides the pure, I/O-free parts of order processing:
//! - Money in minor currency units
//! - Products and the immutable catalog snapshot
//! - The delivery fee table and the order total calculator
//! - Order number generation

pub mod catalog;
pub mod delivery;
pub mod error;
pub mod money;
pub mod order_number;
pub mod product;
pub mod quote;

pub use catalog::Catalog;
pub use delivery::DeliveryFeeTable;
pub use error::OrderError;
pub use money::Money;
pub use order_number::{OrderNumber, OrderNumberGenerator};
pub use product::{Product, ProductId};
pub use quote::Quote;
