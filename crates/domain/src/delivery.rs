//! Location-based delivery fees.

use std::collections::HashMap;

use crate::money::Money;

/// Flat delivery fees for the emirates served, in major units.
const DEFAULT_FEES: &[(&str, i64)] = &[
    ("Abu Dhabi", 3500),
    ("Ras Al Khaimah", 3500),
    ("Fujairah", 3500),
    ("Dubai", 2500),
    ("Sharjah", 2000),
    ("Ajman", 2000),
    ("Umm Al Quwain", 2000),
];

/// Static mapping from a closed set of location names to a flat fee.
///
/// Locations outside the set carry no fee. Matching is exact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryFeeTable {
    fees: HashMap<String, Money>,
}

impl DeliveryFeeTable {
    /// Creates a table from `(location, fee)` pairs.
    pub fn new<L: Into<String>>(fees: impl IntoIterator<Item = (L, Money)>) -> Self {
        Self {
            fees: fees.into_iter().map(|(l, f)| (l.into(), f)).collect(),
        }
    }

    /// Returns the fee for a location, zero when the location is not listed.
    pub fn fee_for(&self, location: &str) -> Money {
        self.fees.get(location).copied().unwrap_or_default()
    }

    /// Returns true if the location has an entry.
    pub fn serves(&self, location: &str) -> bool {
        self.fees.contains_key(location)
    }
}

impl Default for DeliveryFeeTable {
    fn default() -> Self {
        Self::new(
            DEFAULT_FEES
                .iter()
                .map(|&(location, fee)| (location, Money::from_major(fee))),
        )
    }
}
