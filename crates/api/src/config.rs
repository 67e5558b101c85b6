//! Application configuration loaded from environment variables.
//!
//! A `.env` file in the working directory is loaded first, when present.
//!
//! | variable | default |
//! |---|---|
//! | `HOST` | `0.0.0.0` |
//! | `PORT` | `5000` |
//! | `RUST_LOG` | `info` |
//! | `LOG_FORMAT` | `text` (or `json`) |
//! | `STRIPE_API_KEY` | required |
//! | `STRIPE_API_BASE` | `https://api.stripe.com` |
//! | `CHECKOUT_CURRENCY` | `aed` |
//! | `CHECKOUT_SUCCESS_URL`, `CHECKOUT_CANCEL_URL` | `https://www.vocca.co/` |
//! | `INTERAKT_API_KEY` | required |
//! | `INTERAKT_API_BASE` | `https://api.interakt.ai` |
//! | `WHATSAPP_COUNTRY_CODE` | `+971` |
//! | `WHATSAPP_TEMPLATE` | `payment_link` |
//! | `WHATSAPP_TEMPLATE_LANGUAGE` | `en` |
//! | `WHATSAPP_TEMPLATE_INCLUDE_PRODUCT` | `false` |
//! | `WEBHOOK_SECRET` | unset |
//! | `HTTP_TIMEOUT_SECS` | `10` |
//! | `CATALOG_PATH` | `product_catalog.csv` |
//! | `CATALOG_ID_COLUMN` | `ID` |
//! | `CATALOG_SPREADSHEET` | unset; selects the spreadsheet source |
//! | `GOOGLE_SERVICE_ACCOUNT_JSON` | required with `CATALOG_SPREADSHEET` |

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use checkout::{InteraktSettings, StripeSettings};
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A required variable is unset or empty.
    #[error("Missing required environment variable {0}")]
    Missing(&'static str),

    /// A variable holds an unusable value.
    #[error("Invalid value for {var}: {reason}")]
    Invalid { var: &'static str, reason: String },
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Where the catalog is loaded from.
#[derive(Clone, PartialEq, Eq)]
pub enum CatalogConfig {
    /// Local CSV file.
    Csv { path: PathBuf, id_column: String },
    /// First worksheet of a named Google spreadsheet.
    Spreadsheet {
        name: String,
        credentials_json: String,
        id_column: String,
    },
}

impl std::fmt::Debug for CatalogConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogConfig::Csv { path, id_column } => f
                .debug_struct("Csv")
                .field("path", path)
                .field("id_column", id_column)
                .finish(),
            CatalogConfig::Spreadsheet {
                name, id_column, ..
            } => f
                .debug_struct("Spreadsheet")
                .field("name", name)
                .field("id_column", id_column)
                .finish_non_exhaustive(),
        }
    }
}

/// Server configuration.
#[derive(Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub log_level: String,
    pub log_format: LogFormat,
    pub stripe: StripeSettings,
    pub interakt: InteraktSettings,
    /// Read for completeness; webhook payloads are not verified.
    pub webhook_secret: Option<String>,
    pub catalog: CatalogConfig,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("log_level", &self.log_level)
            .field("log_format", &self.log_format)
            .field("stripe_base_url", &self.stripe.base_url)
            .field("interakt_base_url", &self.interakt.base_url)
            .field("catalog", &self.catalog)
            .finish_non_exhaustive()
    }
}

impl Config {
    /// Loads configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads configuration from an arbitrary key lookup.
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let or = |key: &str, default: &str| get(key).unwrap_or_else(|| default.to_string());
        let required = |key: &'static str| get(key).ok_or(ConfigError::Missing(key));

        let timeout = Duration::from_secs(parse(&get, "HTTP_TIMEOUT_SECS", 10u64)?);

        let mut stripe = StripeSettings::new(required("STRIPE_API_KEY")?);
        stripe.base_url = or("STRIPE_API_BASE", &stripe.base_url);
        stripe.currency = or("CHECKOUT_CURRENCY", &stripe.currency).to_lowercase();
        stripe.success_url = or("CHECKOUT_SUCCESS_URL", &stripe.success_url);
        stripe.cancel_url = or("CHECKOUT_CANCEL_URL", &stripe.cancel_url);
        stripe.timeout = timeout;

        let mut interakt = InteraktSettings::new(required("INTERAKT_API_KEY")?);
        interakt.base_url = or("INTERAKT_API_BASE", &interakt.base_url);
        interakt.country_code = or("WHATSAPP_COUNTRY_CODE", &interakt.country_code);
        interakt.template_name = or("WHATSAPP_TEMPLATE", &interakt.template_name);
        interakt.language_code = or("WHATSAPP_TEMPLATE_LANGUAGE", &interakt.language_code);
        interakt.include_product_name = parse_bool(&get, "WHATSAPP_TEMPLATE_INCLUDE_PRODUCT")?;
        interakt.timeout = timeout;

        let id_column = or("CATALOG_ID_COLUMN", catalog::DEFAULT_ID_COLUMN);
        let catalog = match get("CATALOG_SPREADSHEET") {
            Some(name) => CatalogConfig::Spreadsheet {
                name,
                credentials_json: required("GOOGLE_SERVICE_ACCOUNT_JSON")?,
                id_column,
            },
            None => CatalogConfig::Csv {
                path: PathBuf::from(or("CATALOG_PATH", "product_catalog.csv")),
                id_column,
            },
        };

        let log_format = match get("LOG_FORMAT").as_deref().map(str::to_lowercase).as_deref() {
            None | Some("text") => LogFormat::Text,
            Some("json") => LogFormat::Json,
            Some(other) => {
                return Err(ConfigError::Invalid {
                    var: "LOG_FORMAT",
                    reason: format!("expected 'text' or 'json', got '{other}'"),
                });
            }
        };

        Ok(Self {
            host: or("HOST", "0.0.0.0"),
            port: parse(&get, "PORT", 5000u16)?,
            log_level: or("RUST_LOG", "info"),
            log_format,
            stripe,
            interakt,
            webhook_secret: get("WEBHOOK_SECRET"),
            catalog,
        })
    }

    /// Returns the `"host:port"` bind address string.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse<T, G>(get: &G, var: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    G: Fn(&str) -> Option<String>,
{
    match get(var) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            var,
            reason: e.to_string(),
        }),
    }
}

fn parse_bool<G>(get: &G, var: &'static str) -> Result<bool, ConfigError>
where
    G: Fn(&str) -> Option<String>,
{
    match get(var).map(|v| v.trim().to_lowercase()).as_deref() {
        None | Some("0" | "false" | "no" | "off") => Ok(false),
        Some("1" | "true" | "yes" | "on") => Ok(true),
        Some(other) => Err(ConfigError::Invalid {
            var,
            reason: format!("expected a boolean, got '{other}'"),
        }),
    }
}
