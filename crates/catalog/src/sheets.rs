//! Google Sheets catalog source.
//!
//! Authenticates as a service account (signed JWT exchanged for an OAuth
//! access token), finds the spreadsheet by name through the Drive API, and
//! reads every row of its first worksheet through the Sheets API.

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use domain::Catalog;
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};

use crate::error::{CatalogError, Result};
use crate::records;
use crate::source::CatalogSource;

const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";
const SCOPES: &str = "https://www.googleapis.com/auth/spreadsheets.readonly https://www.googleapis.com/auth/drive.readonly";
const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const SPREADSHEET_MIME: &str = "application/vnd.google-apps.spreadsheet";
const ASSERTION_LIFETIME_SECS: i64 = 3600;

/// The fields of a service account key file that are needed to sign in.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceAccountKey {
    pub client_email: String,
    pub private_key: String,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

impl ServiceAccountKey {
    /// Parses a service account key JSON document.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| CatalogError::Credentials(e.to_string()))
    }
}

/// Base URLs of the Google APIs used by the source.
#[derive(Debug, Clone)]
pub struct SheetsEndpoints {
    pub drive_base: String,
    pub sheets_base: String,
}

impl Default for SheetsEndpoints {
    fn default() -> Self {
        Self {
            drive_base: "https://www.googleapis.com".to_string(),
            sheets_base: "https://sheets.googleapis.com".to_string(),
        }
    }
}

#[derive(Serialize)]
struct AssertionClaims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Deserialize)]
struct FileList {
    #[serde(default)]
    files: Vec<DriveFile>,
}

#[derive(Deserialize)]
struct DriveFile {
    id: String,
}

#[derive(Deserialize)]
struct SpreadsheetMeta {
    #[serde(default)]
    sheets: Vec<Sheet>,
}

#[derive(Deserialize)]
struct Sheet {
    properties: SheetProperties,
}

#[derive(Deserialize)]
struct SheetProperties {
    title: String,
}

#[derive(Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<serde_json::Value>>,
}

/// Loads the catalog from the first worksheet of a named spreadsheet.
pub struct SheetsCatalogSource {
    client: reqwest::Client,
    key: ServiceAccountKey,
    spreadsheet: String,
    id_column: String,
    endpoints: SheetsEndpoints,
}

impl SheetsCatalogSource {
    /// Creates a source reading `spreadsheet` with the given credentials.
    pub fn new(
        key: ServiceAccountKey,
        spreadsheet: impl Into<String>,
        id_column: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            key,
            spreadsheet: spreadsheet.into(),
            id_column: id_column.into(),
            endpoints: SheetsEndpoints::default(),
        })
    }

    /// Overrides the API base URLs.
    pub fn with_endpoints(mut self, endpoints: SheetsEndpoints) -> Self {
        self.endpoints = endpoints;
        self
    }

    fn sign_assertion(&self) -> Result<String> {
        let iat = Utc::now().timestamp();
        let claims = AssertionClaims {
            iss: &self.key.client_email,
            scope: SCOPES,
            aud: &self.key.token_uri,
            iat,
            exp: iat + ASSERTION_LIFETIME_SECS,
        };
        let key = EncodingKey::from_rsa_pem(self.key.private_key.as_bytes())
            .map_err(|e| CatalogError::Credentials(e.to_string()))?;
        jsonwebtoken::encode(&Header::new(Algorithm::RS256), &claims, &key)
            .map_err(|e| CatalogError::Credentials(e.to_string()))
    }

    async fn access_token(&self) -> Result<String> {
        let assertion = self.sign_assertion()?;
        let response = self
            .client
            .post(&self.key.token_uri)
            .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
            .send()
            .await?;
        let token: TokenResponse = checked(response, "token exchange").await?.json().await?;
        Ok(token.access_token)
    }

    async fn find_spreadsheet(&self, token: &str) -> Result<String> {
        let query = format!(
            "name = '{}' and mimeType = '{SPREADSHEET_MIME}' and trashed = false",
            escape_query(&self.spreadsheet)
        );
        let response = self
            .client
            .get(format!("{}/drive/v3/files", self.endpoints.drive_base))
            .bearer_auth(token)
            .query(&[("q", query.as_str()), ("fields", "files(id,name)")])
            .send()
            .await?;
        let list: FileList = checked(response, "drive file search").await?.json().await?;
        list.files
            .into_iter()
            .next()
            .map(|f| f.id)
            .ok_or_else(|| CatalogError::SpreadsheetNotFound(self.spreadsheet.clone()))
    }

    async fn first_sheet_title(&self, token: &str, spreadsheet_id: &str) -> Result<String> {
        let url = self.sheets_url(&[spreadsheet_id])?;
        let response = self
            .client
            .get(url)
            .bearer_auth(token)
            .query(&[("fields", "sheets.properties.title")])
            .send()
            .await?;
        let meta: SpreadsheetMeta = checked(response, "spreadsheet metadata").await?.json().await?;
        meta.sheets
            .into_iter()
            .next()
            .map(|s| s.properties.title)
            .ok_or_else(|| CatalogError::EmptySheet(self.spreadsheet.clone()))
    }

    async fn sheet_rows(
        &self,
        token: &str,
        spreadsheet_id: &str,
        sheet: &str,
    ) -> Result<Vec<Vec<String>>> {
        let url = self.sheets_url(&[spreadsheet_id, "values", sheet])?;
        let response = self.client.get(url).bearer_auth(token).send().await?;
        let range: ValueRange = checked(response, "sheet values").await?.json().await?;
        Ok(range
            .values
            .into_iter()
            .map(|row| row.into_iter().map(cell_text).collect())
            .collect())
    }

    fn sheets_url(&self, segments: &[&str]) -> Result<reqwest::Url> {
        let mut url = reqwest::Url::parse(&self.endpoints.sheets_base)
            .map_err(|e| CatalogError::Http(format!("invalid sheets base URL: {e}")))?;
        url.path_segments_mut()
            .map_err(|()| CatalogError::Http("sheets base URL cannot have a path".to_string()))?
            .pop_if_empty()
            .extend(["v4", "spreadsheets"])
            .extend(segments);
        Ok(url)
    }
}

#[async_trait]
impl CatalogSource for SheetsCatalogSource {
    #[tracing::instrument(skip(self), fields(spreadsheet = %self.spreadsheet))]
    async fn load(&self) -> Result<Catalog> {
        let token = self.access_token().await?;
        let spreadsheet_id = self.find_spreadsheet(&token).await?;
        let sheet = self.first_sheet_title(&token, &spreadsheet_id).await?;
        tracing::debug!(%spreadsheet_id, %sheet, "reading worksheet");

        let mut rows = self
            .sheet_rows(&token, &spreadsheet_id, &sheet)
            .await?
            .into_iter();
        let headers = rows
            .next()
            .ok_or_else(|| CatalogError::EmptySheet(self.spreadsheet.clone()))?;

        let catalog = records::build_catalog(headers, rows, &self.id_column)?;
        tracing::info!(products = catalog.len(), "catalog loaded from spreadsheet");
        Ok(catalog)
    }

    fn describe(&self) -> String {
        format!("spreadsheet '{}'", self.spreadsheet)
    }
}

async fn checked(response: reqwest::Response, call: &str) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(CatalogError::Http(format!("{call} returned {status}: {body}")))
}

fn escape_query(value: &str) -> String {
    value.replace('\\', "\\\\").replace('\'', "\\'")
}

fn cell_text(value: serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s,
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}
