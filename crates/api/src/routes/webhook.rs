//! Payment processor webhook receiver.

use axum::Json;
use axum::body::Bytes;
use serde_json::{Value, json};

/// POST /webhook — logs the payload and acknowledges it.
///
/// Events are not verified or acted upon.
pub async fn receive(body: Bytes) -> Json<Value> {
    tracing::info!(
        bytes = body.len(),
        payload = %String::from_utf8_lossy(&body),
        "webhook received"
    );
    Json(json!({ "status": "Received" }))
}
