//! Order processor orchestrating pricing, checkout and notification.

use std::sync::Arc;
use std::time::Instant;

use domain::{Catalog, DeliveryFeeTable, Money, OrderNumber, OrderNumberGenerator, ProductId, Quote};

use crate::error::CheckoutError;
use crate::services::notification::{NotificationService, OrderNotification};
use crate::services::payment::{CheckoutRequest, PaymentService};
use crate::steps;

/// A validated order as received from a customer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderRequest {
    pub product_id: ProductId,
    pub quantity: u32,
    pub location: String,
    pub phone: String,
    pub customer_name: String,
}

/// Outcome of a processed order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderReceipt {
    pub order_number: OrderNumber,
    pub total: Money,
    pub checkout_session_id: String,
    pub checkout_url: String,
    /// False when the payment-link message could not be delivered.
    pub notified: bool,
}

/// Runs the per-order flow: quote, checkout session, notification.
///
/// The catalog is a shared read-only snapshot; the processor itself holds no
/// per-order state, so it can serve concurrent requests.
pub struct OrderProcessor<P, N>
where
    P: PaymentService,
    N: NotificationService,
{
    catalog: Arc<Catalog>,
    fees: DeliveryFeeTable,
    order_numbers: OrderNumberGenerator,
    payment: P,
    notifications: N,
}

impl<P, N> OrderProcessor<P, N>
where
    P: PaymentService,
    N: NotificationService,
{
    /// Creates a processor with the default delivery fee table.
    pub fn new(catalog: Arc<Catalog>, payment: P, notifications: N) -> Self {
        Self {
            catalog,
            fees: DeliveryFeeTable::default(),
            order_numbers: OrderNumberGenerator::new(),
            payment,
            notifications,
        }
    }

    /// Replaces the delivery fee table.
    pub fn with_fees(mut self, fees: DeliveryFeeTable) -> Self {
        self.fees = fees;
        self
    }

    /// Returns the catalog snapshot.
    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    /// Prices an order without side effects.
    pub fn quote(&self, request: &OrderRequest) -> Result<Quote, CheckoutError> {
        Ok(Quote::calculate(
            &self.catalog,
            &self.fees,
            &request.product_id,
            request.quantity,
            &request.location,
        )?)
    }

    /// Processes an order.
    ///
    /// Pricing failures return before any external call. A payment session
    /// failure is returned and no notification is attempted. A notification
    /// failure is logged and reflected in [`OrderReceipt::notified`] only.
    #[tracing::instrument(
        skip(self, request),
        fields(product_id = %request.product_id, quantity = request.quantity)
    )]
    pub async fn process(&self, request: OrderRequest) -> Result<OrderReceipt, CheckoutError> {
        let started = Instant::now();

        // 1. Quote
        let quote = match self.quote(&request) {
            Ok(quote) => quote,
            Err(e) => {
                metrics::counter!("orders_rejected_total").increment(1);
                tracing::info!(step = steps::STEP_QUOTE, error = %e, "order rejected");
                return Err(e);
            }
        };

        // 2. Checkout session
        let checkout = CheckoutRequest::new(quote.total, quote.product.title.clone(), quote.quantity);
        let session = match self.payment.create_checkout_session(&checkout).await {
            Ok(session) => session,
            Err(e) => {
                metrics::counter!("payment_session_failures_total").increment(1);
                tracing::error!(
                    step = steps::STEP_CREATE_CHECKOUT_SESSION,
                    error = %e,
                    "checkout session creation failed"
                );
                return Err(e);
            }
        };
        tracing::info!(
            step = steps::STEP_CREATE_CHECKOUT_SESSION,
            session_id = %session.id,
            amount = quote.total.minor(),
            "order step completed"
        );

        // 3. Order number
        let order_number = self.order_numbers.next();

        // 4. Notification, best effort
        let notification = OrderNotification {
            phone: request.phone,
            customer_name: request.customer_name,
            order_number: order_number.clone(),
            total: quote.total,
            payment_link: session.url.clone(),
            product_name: quote.product.title,
        };
        let notified = match self.notifications.send(&notification).await {
            Ok(()) => {
                tracing::info!(
                    step = steps::STEP_SEND_NOTIFICATION,
                    %order_number,
                    "order step completed"
                );
                true
            }
            Err(e) => {
                metrics::counter!("notification_failures_total").increment(1);
                tracing::warn!(
                    step = steps::STEP_SEND_NOTIFICATION,
                    %order_number,
                    error = %e,
                    "failed to send payment link"
                );
                false
            }
        };

        let duration = started.elapsed().as_secs_f64();
        metrics::histogram!("order_processing_duration_seconds").record(duration);
        metrics::counter!("orders_processed_total").increment(1);
        tracing::info!(%order_number, total = %quote.total, notified, duration, "order processed");

        Ok(OrderReceipt {
            order_number,
            total: quote.total,
            checkout_session_id: session.id,
            checkout_url: session.url,
            notified,
        })
    }
}

#[cfg(test)]
mod tests {
    use domain::{OrderError, Product};

    use super::*;
    use crate::services::{InMemoryNotificationService, InMemoryPaymentService};

    fn processor() -> (
        OrderProcessor<InMemoryPaymentService, InMemoryNotificationService>,
        InMemoryPaymentService,
        InMemoryNotificationService,
    ) {
        let catalog = Catalog::from_products([Product::new(
            "P1",
            "Rose Bouquet",
            Money::from_major(100),
        )])
        .unwrap();
        let payment = InMemoryPaymentService::new();
        let notifications = InMemoryNotificationService::new();
        let processor =
            OrderProcessor::new(Arc::new(catalog), payment.clone(), notifications.clone());
        (processor, payment, notifications)
    }

    fn request(product_id: &str) -> OrderRequest {
        OrderRequest {
            product_id: ProductId::new(product_id),
            quantity: 2,
            location: "Dubai".to_string(),
            phone: "501234567".to_string(),
            customer_name: "Aisha".to_string(),
        }
    }

    #[tokio::test]
    async fn test_quote_has_no_side_effects() {
        let (processor, payment, notifications) = processor();
        let quote = processor.quote(&request("P1")).unwrap();
        assert_eq!(quote.total.major(), 2700);
        assert_eq!(payment.session_count(), 0);
        assert_eq!(notifications.sent_count(), 0);
    }

    #[tokio::test]
    async fn test_unknown_product_makes_no_calls() {
        let (processor, payment, notifications) = processor();
        let err = processor.process(request("P9")).await.unwrap_err();
        assert!(matches!(
            err,
            CheckoutError::Order(OrderError::UnknownProduct { .. })
        ));
        assert_eq!(payment.session_count(), 0);
        assert_eq!(notifications.sent_count(), 0);
    }

    #[tokio::test]
    async fn test_custom_fee_table() {
        let (processor, _, _) = processor();
        let processor = processor.with_fees(DeliveryFeeTable::new([("Dubai", Money::from_major(10))]));
        let receipt = processor.process(request("P1")).await.unwrap();
        assert_eq!(receipt.total, Money::from_major(210));
    }
}
