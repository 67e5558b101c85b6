//! Interakt WhatsApp template message client.

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;

use crate::error::CheckoutError;
use crate::services::notification::{NotificationService, OrderNotification};

/// Interakt connection and template settings.
#[derive(Clone)]
pub struct InteraktSettings {
    /// API key, sent verbatim after `Basic`.
    pub api_key: String,
    pub base_url: String,
    pub country_code: String,
    pub template_name: String,
    pub language_code: String,
    /// Whether the registered template declares the product name field.
    pub include_product_name: bool,
    pub timeout: Duration,
}

impl std::fmt::Debug for InteraktSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InteraktSettings")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("country_code", &self.country_code)
            .field("template_name", &self.template_name)
            .field("language_code", &self.language_code)
            .field("include_product_name", &self.include_product_name)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl InteraktSettings {
    /// Settings for the live Interakt API with the `payment_link` template.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: "https://api.interakt.ai".to_string(),
            country_code: "+971".to_string(),
            template_name: "payment_link".to_string(),
            language_code: "en".to_string(),
            include_product_name: false,
            timeout: Duration::from_secs(10),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateMessage {
    country_code: String,
    phone_number: String,
    #[serde(rename = "type")]
    kind: &'static str,
    template: Template,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Template {
    name: String,
    language_code: String,
    body_values: Vec<String>,
}

/// Sends payment-link template messages through the Interakt public API.
#[derive(Debug, Clone)]
pub struct InteraktNotificationService {
    client: reqwest::Client,
    settings: InteraktSettings,
}

impl InteraktNotificationService {
    /// Creates a client with the configured request timeout.
    pub fn new(settings: InteraktSettings) -> Result<Self, CheckoutError> {
        let client = reqwest::Client::builder()
            .timeout(settings.timeout)
            .build()
            .map_err(|e| CheckoutError::HttpClient(e.to_string()))?;
        Ok(Self { client, settings })
    }

    /// Request body for a notification.
    pub fn message(&self, notification: &OrderNotification) -> TemplateMessage {
        TemplateMessage {
            country_code: self.settings.country_code.clone(),
            phone_number: notification.phone.clone(),
            kind: "Template",
            template: Template {
                name: self.settings.template_name.clone(),
                language_code: self.settings.language_code.clone(),
                body_values: notification.body_values(self.settings.include_product_name),
            },
        }
    }
}

#[async_trait]
impl NotificationService for InteraktNotificationService {
    #[tracing::instrument(skip(self, notification), fields(order_number = %notification.order_number))]
    async fn send(&self, notification: &OrderNotification) -> Result<(), CheckoutError> {
        let response = self
            .client
            .post(format!("{}/v1/public/message/", self.settings.base_url))
            .header(
                reqwest::header::AUTHORIZATION,
                format!("Basic {}", self.settings.api_key),
            )
            .json(&self.message(notification))
            .send()
            .await
            .map_err(|e| CheckoutError::Notification(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CheckoutError::Notification(format!(
                "Interakt returned {status}: {body}"
            )));
        }

        Ok(())
    }
}
