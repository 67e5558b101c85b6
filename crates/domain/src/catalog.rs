//! Immutable product catalog snapshot.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::error::OrderError;
use crate::money::{MINOR_PER_MAJOR, Money};
use crate::product::{Product, ProductId};

/// Read-only mapping from product identifier to product, built once at
/// startup and shared behind an `Arc` for the life of the process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    products: BTreeMap<ProductId, Product>,
}

impl Catalog {
    /// Builds a catalog from products.
    ///
    /// Fails on duplicate identifiers, negative prices, or when no products
    /// are given.
    pub fn from_products(products: impl IntoIterator<Item = Product>) -> Result<Self, OrderError> {
        let mut map = BTreeMap::new();
        for product in products {
            if product.unit_price.is_negative() {
                return Err(OrderError::InvalidPrice {
                    product_id: product.id.to_string(),
                    price: product.unit_price.minor(),
                });
            }
            let id = product.id.clone();
            if map.insert(id.clone(), product).is_some() {
                return Err(OrderError::DuplicateProduct {
                    product_id: id.to_string(),
                });
            }
        }

        if map.is_empty() {
            return Err(OrderError::EmptyCatalog);
        }

        Ok(Self { products: map })
    }

    /// Looks up a product by identifier.
    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.products.get(id)
    }

    /// Returns the number of products.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Returns true if the catalog holds no products.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Iterates over products in identifier order.
    pub fn iter(&self) -> impl Iterator<Item = &Product> {
        self.products.values()
    }

    /// Renders the catalog as `{ "<id>": { "title", "price", ...attributes } }`
    /// with prices in major units.
    pub fn to_json(&self) -> Value {
        let mut root = Map::new();
        for product in self.products.values() {
            let mut entry: Map<String, Value> = product
                .attributes
                .iter()
                .map(|(k, v)| (k.clone(), Value::String(v.clone())))
                .collect();
            entry.insert("title".to_string(), Value::String(product.title.clone()));
            entry.insert("price".to_string(), major_units_json(product.unit_price));
            root.insert(product.id.to_string(), Value::Object(entry));
        }
        Value::Object(root)
    }
}

/// Whole amounts render as JSON integers, anything else as a decimal number.
pub fn major_units_json(amount: Money) -> Value {
    if amount.is_whole_major() {
        Value::from(amount.major())
    } else {
        Value::from(amount.minor() as f64 / MINOR_PER_MAJOR as f64)
    }
}
