//! Catalog source trait.

use async_trait::async_trait;
use domain::Catalog;

use crate::error::CatalogError;

/// A place the catalog can be loaded from.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Reads every product and builds the catalog snapshot.
    async fn load(&self) -> Result<Catalog, CatalogError>;

    /// Short human-readable description for logs.
    fn describe(&self) -> String;
}
