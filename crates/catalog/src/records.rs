//! Conversion of tabular rows into products.
//!
//! Shared by the CSV and spreadsheet sources: the first row names the
//! columns, the identifier column plus `title` and `price` are required, and
//! every other column is kept as a product attribute.

use domain::{Catalog, Money, Product};

use crate::error::{CatalogError, Result};

/// Required title column.
pub const TITLE_COLUMN: &str = "title";

/// Required price column, in whole major units.
pub const PRICE_COLUMN: &str = "price";

/// Column positions resolved from a header row.
#[derive(Debug, Clone)]
pub struct Columns {
    headers: Vec<String>,
    id: usize,
    title: usize,
    price: usize,
}

impl Columns {
    /// Resolves the required columns by name.
    pub fn resolve(headers: Vec<String>, id_column: &str) -> Result<Self> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or_else(|| CatalogError::MissingColumn(name.to_string()))
        };
        let id = find(id_column)?;
        let title = find(TITLE_COLUMN)?;
        let price = find(PRICE_COLUMN)?;
        Ok(Self {
            headers,
            id,
            title,
            price,
        })
    }

    /// Converts one data row. `row` is the 1-based line number for errors.
    ///
    /// Returns `Ok(None)` for rows with an empty identifier.
    pub fn product(&self, row: usize, cells: &[String]) -> Result<Option<Product>> {
        let cell = |i: usize| cells.get(i).map(|s| s.trim()).unwrap_or("");

        let id = cell(self.id);
        if id.is_empty() {
            tracing::warn!(row, "skipping catalog row without an identifier");
            return Ok(None);
        }

        let raw_price = cell(self.price);
        let price = parse_whole_major(raw_price).ok_or_else(|| CatalogError::InvalidRow {
            row,
            reason: format!("price '{raw_price}' for product {id} is not a whole number"),
        })?;
        let unit_price = Money::checked_from_major(price).ok_or_else(|| CatalogError::InvalidRow {
            row,
            reason: format!("price '{raw_price}' for product {id} is out of range"),
        })?;

        let mut product = Product::new(id, cell(self.title), unit_price);
        for (i, header) in self.headers.iter().enumerate() {
            if i == self.id || i == self.title || i == self.price {
                continue;
            }
            product = product.with_attribute(header.clone(), cell(i));
        }

        Ok(Some(product))
    }
}

/// Builds a catalog from a header row followed by data rows.
pub fn build_catalog<I>(headers: Vec<String>, rows: I, id_column: &str) -> Result<Catalog>
where
    I: IntoIterator<Item = Vec<String>>,
{
    let columns = Columns::resolve(headers, id_column)?;
    let mut products = Vec::new();
    for (i, cells) in rows.into_iter().enumerate() {
        // header is line 1
        if let Some(product) = columns.product(i + 2, &cells)? {
            products.push(product);
        }
    }
    Ok(Catalog::from_products(products)?)
}

/// Parses a price cell as whole major units. Accepts `100` and `100.0`.
fn parse_whole_major(raw: &str) -> Option<i64> {
    if let Ok(value) = raw.parse::<i64>() {
        return Some(value);
    }
    let value = raw.parse::<f64>().ok()?;
    if value.is_finite() && value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
        Some(value as i64)
    } else {
        None
    }
}
