//! Catalog listing endpoint.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use checkout::{NotificationService, PaymentService};
use serde_json::Value;

use crate::AppState;

/// GET /api/products — the full catalog keyed by product ID.
pub async fn list<P, N>(State(state): State<Arc<AppState<P, N>>>) -> Json<Value>
where
    P: PaymentService + 'static,
    N: NotificationService + 'static,
{
    Json(state.processor.catalog().to_json())
}
