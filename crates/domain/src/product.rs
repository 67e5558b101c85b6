//! Product value objects.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::money::Money;

/// Product identifier as it appears in the catalog's identifier column.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    /// Creates a new product ID from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the product ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for ProductId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ProductId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for ProductId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A catalog entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    /// The product identifier.
    pub id: ProductId,

    /// Display name used for the checkout line item and the notification.
    pub title: String,

    /// Price per unit.
    pub unit_price: Money,

    /// Any further catalog columns, passed through untouched.
    pub attributes: BTreeMap<String, String>,
}

impl Product {
    /// Creates a product with no extra attributes.
    pub fn new(id: impl Into<ProductId>, title: impl Into<String>, unit_price: Money) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            unit_price,
            attributes: BTreeMap::new(),
        }
    }

    /// Adds an extra catalog attribute.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }
}
