//! Product catalog loading.
//!
//! The catalog is read once at startup from one of two sources:
//! - a local CSV file ([`CsvCatalogSource`])
//! - the first worksheet of a Google spreadsheet ([`SheetsCatalogSource`])
//!
//! Both produce the same immutable [`domain::Catalog`] snapshot. A load
//! failure is meant to stop the process; there is no reload.

pub mod csv_file;
pub mod error;
pub mod records;
pub mod sheets;
pub mod source;

pub use csv_file::CsvCatalogSource;
pub use error::CatalogError;
pub use sheets::{ServiceAccountKey, SheetsCatalogSource, SheetsEndpoints};
pub use source::CatalogSource;

/// Default name of the identifier column.
pub const DEFAULT_ID_COLUMN: &str = "ID";
