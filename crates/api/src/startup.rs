//! Process startup: catalog source selection and outbound clients.

use catalog::{CatalogError, CatalogSource, CsvCatalogSource, ServiceAccountKey, SheetsCatalogSource};
use checkout::{CheckoutError, InteraktNotificationService, StripePaymentService};
use thiserror::Error;

use crate::config::{CatalogConfig, Config};

/// Errors that stop the server from starting.
#[derive(Debug, Error)]
pub enum StartupError {
    /// The catalog could not be loaded.
    #[error("Catalog unavailable from {source_name}: {error}")]
    Catalog {
        source_name: String,
        #[source]
        error: CatalogError,
    },

    /// An outbound client could not be built.
    #[error(transparent)]
    Client(#[from] CheckoutError),

    /// The metrics recorder could not be installed.
    #[error("Failed to install metrics recorder: {0}")]
    Metrics(String),

    /// The listener could not be bound or the server failed.
    #[error("Server error: {0}")]
    Server(#[from] std::io::Error),
}

/// Builds the catalog source selected by the configuration.
pub fn catalog_source(config: &CatalogConfig) -> Result<Box<dyn CatalogSource>, CatalogError> {
    match config {
        CatalogConfig::Csv { path, id_column } => {
            Ok(Box::new(CsvCatalogSource::new(path.clone(), id_column.clone())))
        }
        CatalogConfig::Spreadsheet {
            name,
            credentials_json,
            id_column,
        } => {
            let key = ServiceAccountKey::from_json(credentials_json)?;
            let source = SheetsCatalogSource::new(
                key,
                name.clone(),
                id_column.clone(),
                std::time::Duration::from_secs(30),
            )?;
            Ok(Box::new(source))
        }
    }
}

/// Loads the catalog once. Any failure is fatal to startup.
pub async fn load_catalog(config: &CatalogConfig) -> Result<domain::Catalog, StartupError> {
    let describe = |config: &CatalogConfig| match config {
        CatalogConfig::Csv { path, .. } => format!("CSV file {}", path.display()),
        CatalogConfig::Spreadsheet { name, .. } => format!("spreadsheet '{name}'"),
    };

    let source = catalog_source(config).map_err(|error| StartupError::Catalog {
        source_name: describe(config),
        error,
    })?;
    source.load().await.map_err(|error| StartupError::Catalog {
        source_name: source.describe(),
        error,
    })
}

/// Builds the Stripe and Interakt clients.
pub fn services(
    config: &Config,
) -> Result<(StripePaymentService, InteraktNotificationService), StartupError> {
    let payment = StripePaymentService::new(config.stripe.clone())?;
    let notifications = InteraktNotificationService::new(config.interakt.clone())?;
    Ok((payment, notifications))
}
