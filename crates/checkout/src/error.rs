//! Checkout error types.

use domain::OrderError;
use thiserror::Error;

/// Errors that can occur while processing an order.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// The order was rejected before any external call.
    #[error(transparent)]
    Order(#[from] OrderError),

    /// The payment processor did not create a checkout session.
    #[error("Payment session creation failed: {0}")]
    PaymentSession(String),

    /// The messaging provider did not accept the notification.
    #[error("Notification delivery failed: {0}")]
    Notification(String),

    /// An outbound HTTP client could not be constructed.
    #[error("HTTP client setup failed: {0}")]
    HttpClient(String),
}
