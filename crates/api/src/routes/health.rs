//! Health check endpoint.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use checkout::{NotificationService, PaymentService};
use serde::Serialize;

use crate::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    /// Number of products in the loaded catalog.
    pub products: usize,
}

/// GET /health
pub async fn check<P, N>(State(state): State<Arc<AppState<P, N>>>) -> Json<HealthResponse>
where
    P: PaymentService + 'static,
    N: NotificationService + 'static,
{
    Json(HealthResponse {
        status: "ok",
        products: state.processor.catalog().len(),
    })
}
