//! Payment service trait and in-memory implementation.

use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use domain::Money;

use crate::error::CheckoutError;

/// A request for a one-time hosted checkout of a single line item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutRequest {
    /// Amount to charge for the whole line, in minor units.
    pub amount: Money,
    /// Product display name.
    pub product_name: String,
    /// Quantity ordered, shown in the line item name.
    pub quantity: u32,
}

impl CheckoutRequest {
    /// Creates a new checkout request.
    pub fn new(amount: Money, product_name: impl Into<String>, quantity: u32) -> Self {
        Self {
            amount,
            product_name: product_name.into(),
            quantity,
        }
    }

    /// Line item name shown on the hosted checkout page.
    pub fn line_item_name(&self) -> String {
        format!("{} x {}", self.product_name, self.quantity)
    }
}

/// A created checkout session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutSession {
    /// The session ID assigned by the payment processor.
    pub id: String,
    /// URL the customer follows to pay.
    pub url: String,
}

/// Trait for payment processor operations.
#[async_trait]
pub trait PaymentService: Send + Sync {
    /// Creates a hosted checkout session.
    async fn create_checkout_session(
        &self,
        request: &CheckoutRequest,
    ) -> Result<CheckoutSession, CheckoutError>;
}

#[derive(Debug, Default)]
struct InMemoryPaymentState {
    requests: Vec<CheckoutRequest>,
    next_id: u32,
    fail_on_create: bool,
}

/// In-memory payment service for testing.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPaymentService {
    state: Arc<RwLock<InMemoryPaymentState>>,
}

impl InMemoryPaymentService {
    /// Creates a new in-memory payment service.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the service to fail on session creation.
    pub fn set_fail_on_create(&self, fail: bool) {
        self.state.write().unwrap().fail_on_create = fail;
    }

    /// Returns the number of sessions created.
    pub fn session_count(&self) -> usize {
        self.state.read().unwrap().requests.len()
    }

    /// Returns every request that produced a session, oldest first.
    pub fn requests(&self) -> Vec<CheckoutRequest> {
        self.state.read().unwrap().requests.clone()
    }
}

#[async_trait]
impl PaymentService for InMemoryPaymentService {
    async fn create_checkout_session(
        &self,
        request: &CheckoutRequest,
    ) -> Result<CheckoutSession, CheckoutError> {
        let mut state = self.state.write().unwrap();

        if state.fail_on_create {
            return Err(CheckoutError::PaymentSession("Card payments unavailable".to_string()));
        }

        state.next_id += 1;
        let id = format!("cs_test_{:04}", state.next_id);
        state.requests.push(request.clone());

        Ok(CheckoutSession {
            url: format!("https://checkout.test/pay/{id}"),
            id,
        })
    }
}
