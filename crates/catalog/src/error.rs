//! Catalog loading errors.

use domain::OrderError;
use thiserror::Error;

/// Errors that can occur while loading the catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog file could not be read.
    #[error("Failed to read catalog file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The CSV data is malformed.
    #[error("Malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    /// A required column is absent from the header row.
    #[error("Catalog is missing required column '{0}'")]
    MissingColumn(String),

    /// A data row could not be converted into a product.
    #[error("Invalid catalog row {row}: {reason}")]
    InvalidRow { row: usize, reason: String },

    /// The service account credential is unusable.
    #[error("Invalid service account credentials: {0}")]
    Credentials(String),

    /// A spreadsheet API call failed.
    #[error("Spreadsheet API request failed: {0}")]
    Http(String),

    /// No spreadsheet with the configured name is visible to the account.
    #[error("Spreadsheet not found: {0}")]
    SpreadsheetNotFound(String),

    /// The spreadsheet has no worksheet or no header row.
    #[error("Spreadsheet has no rows: {0}")]
    EmptySheet(String),

    /// The rows do not form a valid catalog.
    #[error("Invalid catalog: {0}")]
    Domain(#[from] OrderError),
}

impl From<reqwest::Error> for CatalogError {
    fn from(err: reqwest::Error) -> Self {
        CatalogError::Http(err.to_string())
    }
}

/// Convenience type alias for catalog results.
pub type Result<T> = std::result::Result<T, CatalogError>;
