//! CSV file catalog source.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use domain::Catalog;

use crate::error::{CatalogError, Result};
use crate::records;
use crate::source::CatalogSource;

/// Loads the catalog from a local CSV file with a header row.
#[derive(Debug, Clone)]
pub struct CsvCatalogSource {
    path: PathBuf,
    id_column: String,
}

impl CsvCatalogSource {
    /// Creates a source for the given file and identifier column.
    pub fn new(path: impl Into<PathBuf>, id_column: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            id_column: id_column.into(),
        }
    }

    /// Returns the file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parses CSV bytes into a catalog.
    pub fn parse(data: &[u8], id_column: &str) -> Result<Catalog> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(data);

        let headers: Vec<String> = reader.headers()?.iter().map(String::from).collect();
        let rows = reader
            .records()
            .map(|record| record.map(|r| r.iter().map(String::from).collect::<Vec<_>>()))
            .collect::<std::result::Result<Vec<_>, _>>()?;

        records::build_catalog(headers, rows, id_column)
    }
}

#[async_trait]
impl CatalogSource for CsvCatalogSource {
    #[tracing::instrument(skip(self), fields(path = %self.path.display()))]
    async fn load(&self) -> Result<Catalog> {
        let data = tokio::fs::read(&self.path)
            .await
            .map_err(|source| CatalogError::Io {
                path: self.path.display().to_string(),
                source,
            })?;

        let catalog = Self::parse(&data, &self.id_column)?;
        tracing::info!(products = catalog.len(), "catalog loaded from CSV");
        Ok(catalog)
    }

    fn describe(&self) -> String {
        format!("CSV file {}", self.path.display())
    }
}
