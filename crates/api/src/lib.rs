//! HTTP API server for the order service.
//!
//! Provides the order endpoint, catalog listing and checkout redirect pages,
//! with structured logging (tracing) and Prometheus metrics.

pub mod config;
pub mod error;
pub mod routes;
pub mod startup;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use checkout::{NotificationService, OrderProcessor, PaymentService};
use domain::Catalog;
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Shared application state accessible from all handlers.
pub struct AppState<P, N>
where
    P: PaymentService,
    N: NotificationService,
{
    pub processor: OrderProcessor<P, N>,
}

/// Creates the application state around a loaded catalog and the two
/// external services.
pub fn create_state<P, N>(catalog: Catalog, payment: P, notifications: N) -> Arc<AppState<P, N>>
where
    P: PaymentService,
    N: NotificationService,
{
    Arc::new(AppState {
        processor: OrderProcessor::new(Arc::new(catalog), payment, notifications),
    })
}

/// Creates the Axum application router with all routes and shared state.
pub fn create_app<P, N>(state: Arc<AppState<P, N>>, metrics_handle: PrometheusHandle) -> Router
where
    P: PaymentService + 'static,
    N: NotificationService + 'static,
{
    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::get))
        .with_state(metrics_handle);

    Router::new()
        .route("/", get(routes::pages::home))
        .route("/favicon.ico", get(routes::pages::favicon))
        .route("/health", get(routes::health::check::<P, N>))
        .route("/success", get(routes::pages::success))
        .route("/cancel", get(routes::pages::cancel))
        .route("/webhook", post(routes::webhook::receive))
        .route("/api/products", get(routes::products::list::<P, N>))
        .route("/api/process-order", post(routes::orders::process::<P, N>))
        .with_state(state)
        .merge(metrics_router)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}
