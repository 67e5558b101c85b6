//! Plain-text landing and redirect pages.

use axum::http::StatusCode;

/// GET / — liveness text.
pub async fn home() -> &'static str {
    "Welcome to the order service!"
}

/// GET /favicon.ico — no icon is served.
pub async fn favicon() -> StatusCode {
    StatusCode::NO_CONTENT
}

/// GET /success — checkout success redirect target.
pub async fn success() -> &'static str {
    "Payment successful."
}

/// GET /cancel — checkout cancel redirect target.
pub async fn cancel() -> &'static str {
    "Payment cancelled."
}
