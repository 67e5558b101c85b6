//! External service traits, HTTP clients and in-memory implementations.

pub mod interakt;
pub mod notification;
pub mod payment;
pub mod stripe;

pub use interakt::{InteraktNotificationService, InteraktSettings};
pub use notification::{InMemoryNotificationService, NotificationService, OrderNotification};
pub use payment::{CheckoutRequest, CheckoutSession, InMemoryPaymentService, PaymentService};
pub use stripe::{StripePaymentService, StripeSettings};
