//! Stripe Checkout client.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::CheckoutError;
use crate::services::payment::{CheckoutRequest, CheckoutSession, PaymentService};

/// Stripe connection and checkout settings.
#[derive(Clone)]
pub struct StripeSettings {
    /// Secret API key, sent as a bearer token.
    pub api_key: String,
    pub base_url: String,
    /// ISO currency code in lowercase, e.g. `aed`.
    pub currency: String,
    pub success_url: String,
    pub cancel_url: String,
    pub timeout: Duration,
}

impl std::fmt::Debug for StripeSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StripeSettings")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("currency", &self.currency)
            .field("success_url", &self.success_url)
            .field("cancel_url", &self.cancel_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl StripeSettings {
    /// Settings for the live Stripe API with default currency and redirects.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: "https://api.stripe.com".to_string(),
            currency: "aed".to_string(),
            success_url: "https://www.vocca.co/".to_string(),
            cancel_url: "https://www.vocca.co/".to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

#[derive(Deserialize)]
struct SessionResponse {
    id: String,
    url: Option<String>,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: ErrorDetail,
}

#[derive(Deserialize)]
struct ErrorDetail {
    message: Option<String>,
}

/// Creates one-time, card-only Checkout sessions with a single line item.
#[derive(Debug, Clone)]
pub struct StripePaymentService {
    client: reqwest::Client,
    settings: StripeSettings,
}

impl StripePaymentService {
    /// Creates a client with the configured request timeout.
    pub fn new(settings: StripeSettings) -> Result<Self, CheckoutError> {
        let client = reqwest::Client::builder()
            .timeout(settings.timeout)
            .build()
            .map_err(|e| CheckoutError::HttpClient(e.to_string()))?;
        Ok(Self { client, settings })
    }

    /// Form fields for `POST /v1/checkout/sessions`.
    pub fn form_fields(&self, request: &CheckoutRequest) -> Vec<(&'static str, String)> {
        vec![
            ("mode", "payment".to_string()),
            ("payment_method_types[0]", "card".to_string()),
            ("line_items[0][quantity]", "1".to_string()),
            (
                "line_items[0][price_data][currency]",
                self.settings.currency.clone(),
            ),
            (
                "line_items[0][price_data][unit_amount]",
                request.amount.minor().to_string(),
            ),
            (
                "line_items[0][price_data][product_data][name]",
                request.line_item_name(),
            ),
            ("success_url", self.settings.success_url.clone()),
            ("cancel_url", self.settings.cancel_url.clone()),
        ]
    }
}

#[async_trait]
impl PaymentService for StripePaymentService {
    #[tracing::instrument(skip(self, request), fields(amount = request.amount.minor()))]
    async fn create_checkout_session(
        &self,
        request: &CheckoutRequest,
    ) -> Result<CheckoutSession, CheckoutError> {
        let response = self
            .client
            .post(format!("{}/v1/checkout/sessions", self.settings.base_url))
            .bearer_auth(&self.settings.api_key)
            .form(&self.form_fields(request))
            .send()
            .await
            .map_err(|e| CheckoutError::PaymentSession(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorResponse>(&body)
                .ok()
                .and_then(|e| e.error.message)
                .unwrap_or(body);
            return Err(CheckoutError::PaymentSession(format!(
                "Stripe returned {status}: {message}"
            )));
        }

        let session: SessionResponse = response
            .json()
            .await
            .map_err(|e| CheckoutError::PaymentSession(format!("invalid Stripe response: {e}")))?;
        let url = session.url.ok_or_else(|| {
            CheckoutError::PaymentSession(format!("session {} has no checkout URL", session.id))
        })?;

        tracing::debug!(session_id = %session.id, "checkout session created");
        Ok(CheckoutSession {
            id: session.id,
            url,
        })
    }
}
