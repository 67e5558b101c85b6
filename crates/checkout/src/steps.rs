//! Order processing step names, used in logs.

/// Step name: price the order against the catalog.
pub const STEP_QUOTE: &str = "quote";

/// Step name: create the hosted checkout session.
pub const STEP_CREATE_CHECKOUT_SESSION: &str = "create_checkout_session";

/// Step name: send the payment link to the customer.
pub const STEP_SEND_NOTIFICATION: &str = "send_notification";
