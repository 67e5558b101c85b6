//! Order total calculation.

use crate::catalog::Catalog;
use crate::delivery::DeliveryFeeTable;
use crate::error::OrderError;
use crate::money::Money;
use crate::product::{Product, ProductId};

/// A priced order line: `unit_price * quantity + delivery_fee`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quote {
    /// The catalog entry being ordered.
    pub product: Product,

    /// Quantity ordered.
    pub quantity: u32,

    /// `unit_price * quantity`.
    pub subtotal: Money,

    /// Flat fee for the delivery location.
    pub delivery_fee: Money,

    /// `subtotal + delivery_fee`.
    pub total: Money,
}

impl Quote {
    /// Prices an order against the catalog and fee table.
    ///
    /// Returns `UnknownProduct` when the identifier is not catalogued,
    /// `InvalidQuantity` for a zero quantity and `AmountOverflow` when the
    /// total cannot be represented.
    pub fn calculate(
        catalog: &Catalog,
        fees: &DeliveryFeeTable,
        product_id: &ProductId,
        quantity: u32,
        location: &str,
    ) -> Result<Self, OrderError> {
        let product = catalog
            .get(product_id)
            .ok_or_else(|| OrderError::UnknownProduct {
                product_id: product_id.to_string(),
            })?;

        if quantity == 0 {
            return Err(OrderError::InvalidQuantity { quantity });
        }

        let overflow = || OrderError::AmountOverflow {
            product_id: product_id.to_string(),
            quantity,
        };
        let subtotal = product
            .unit_price
            .checked_multiply(quantity)
            .ok_or_else(overflow)?;
        let delivery_fee = fees.fee_for(location);
        let total = subtotal.checked_add(delivery_fee).ok_or_else(overflow)?;

        Ok(Self {
            product: product.clone(),
            quantity,
            subtotal,
            delivery_fee,
            total,
        })
    }
}
