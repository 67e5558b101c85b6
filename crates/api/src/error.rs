//! API error types with HTTP response mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use checkout::CheckoutError;
use domain::OrderError;

/// API-level error type that maps to HTTP responses.
#[derive(Debug)]
pub enum ApiError {
    /// Bad request from the client.
    BadRequest(String),
    /// An upstream service failed.
    BadGateway(String),
    /// Internal server error.
    Internal(String),
}

impl ApiError {
    /// Returns the HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::BadGateway(_) => StatusCode::BAD_GATEWAY,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            ApiError::BadRequest(msg) => msg,
            ApiError::BadGateway(msg) => {
                tracing::warn!(error = %msg, "upstream failure");
                msg
            }
            ApiError::Internal(msg) => {
                tracing::error!(error = %msg, "internal server error");
                msg
            }
        };

        let body = serde_json::json!({ "error": message });
        (status, axum::Json(body)).into_response()
    }
}

impl From<CheckoutError> for ApiError {
    fn from(err: CheckoutError) -> Self {
        match err {
            CheckoutError::Order(OrderError::UnknownProduct { .. }) => {
                ApiError::BadRequest("Invalid product ID".to_string())
            }
            CheckoutError::Order(
                order_err @ (OrderError::InvalidQuantity { .. } | OrderError::AmountOverflow { .. }),
            ) => {
                ApiError::BadRequest(order_err.to_string())
            }
            CheckoutError::Order(order_err) => ApiError::Internal(order_err.to_string()),
            err @ (CheckoutError::PaymentSession(_) | CheckoutError::Notification(_)) => {
                ApiError::BadGateway(err.to_string())
            }
            err @ CheckoutError::HttpClient(_) => ApiError::Internal(err.to_string()),
        }
    }
}
