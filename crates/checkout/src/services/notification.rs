//! Notification service trait and in-memory implementation.

use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use domain::{Money, OrderNumber};

use crate::error::CheckoutError;

/// The payment-link message sent to a customer after checkout is created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderNotification {
    /// Customer phone number, without country code.
    pub phone: String,
    pub customer_name: String,
    pub order_number: OrderNumber,
    /// Order total; rendered in major units with two decimals.
    pub total: Money,
    pub payment_link: String,
    pub product_name: String,
}

impl OrderNotification {
    /// Positional template values.
    ///
    /// The order and count must match the template registered with the
    /// messaging provider: name, order number, total, payment link, and the
    /// product name only for templates that declare a fifth field.
    pub fn body_values(&self, include_product_name: bool) -> Vec<String> {
        let mut values = vec![
            self.customer_name.clone(),
            self.order_number.to_string(),
            self.total.to_string(),
            self.payment_link.clone(),
        ];
        if include_product_name {
            values.push(self.product_name.clone());
        }
        values
    }
}

/// Trait for customer notification operations.
#[async_trait]
pub trait NotificationService: Send + Sync {
    /// Sends the payment-link message.
    async fn send(&self, notification: &OrderNotification) -> Result<(), CheckoutError>;
}

#[derive(Debug, Default)]
struct InMemoryNotificationState {
    sent: Vec<OrderNotification>,
    fail_on_send: bool,
}

/// In-memory notification service for testing.
#[derive(Debug, Clone, Default)]
pub struct InMemoryNotificationService {
    state: Arc<RwLock<InMemoryNotificationState>>,
}

impl InMemoryNotificationService {
    /// Creates a new in-memory notification service.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the service to fail on send.
    pub fn set_fail_on_send(&self, fail: bool) {
        self.state.write().unwrap().fail_on_send = fail;
    }

    /// Returns the number of messages delivered.
    pub fn sent_count(&self) -> usize {
        self.state.read().unwrap().sent.len()
    }

    /// Returns every delivered message, oldest first.
    pub fn sent(&self) -> Vec<OrderNotification> {
        self.state.read().unwrap().sent.clone()
    }
}

#[async_trait]
impl NotificationService for InMemoryNotificationService {
    async fn send(&self, notification: &OrderNotification) -> Result<(), CheckoutError> {
        let mut state = self.state.write().unwrap();

        if state.fail_on_send {
            return Err(CheckoutError::Notification("Messaging provider unavailable".to_string()));
        }

        state.sent.push(notification.clone());
        Ok(())
    }
}
