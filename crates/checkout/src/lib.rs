//! Order checkout orchestration.
//!
//! Each order runs two sequential external calls:
//! 1. Create a hosted payment (checkout) session
//! 2. Send the customer a templated message with the payment link
//!
//! A failed payment session aborts the order. A failed notification is
//! logged and reported on the receipt, but the order still succeeds.

pub mod error;
pub mod processor;
pub mod services;
pub mod steps;

pub use error::CheckoutError;
pub use processor::{OrderProcessor, OrderReceipt, OrderRequest};
pub use services::{
    CheckoutRequest, CheckoutSession, InMemoryNotificationService, InMemoryPaymentService,
    InteraktNotificationService, InteraktSettings, NotificationService, OrderNotification,
    PaymentService, StripePaymentService, StripeSettings,
};
