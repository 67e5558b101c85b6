//! Integration tests for the order processing flow.

use std::collections::HashSet;
use std::sync::Arc;

use checkout::{
    CheckoutError, InMemoryNotificationService, InMemoryPaymentService, OrderProcessor,
    OrderRequest,
};
use domain::{Catalog, DeliveryFeeTable, Money, OrderError, Product, ProductId};

type TestProcessor = OrderProcessor<InMemoryPaymentService, InMemoryNotificationService>;

struct TestHarness {
    processor: Arc<TestProcessor>,
    payment: InMemoryPaymentService,
    notifications: InMemoryNotificationService,
}

impl TestHarness {
    fn new() -> Self {
        let catalog = Catalog::from_products([
            Product::new("P1", "Rose Bouquet", Money::from_major(100)),
            Product::new("P2", "Chocolate Box", Money::from_major(45)),
        ])
        .unwrap();
        let payment = InMemoryPaymentService::new();
        let notifications = InMemoryNotificationService::new();
        let processor = Arc::new(OrderProcessor::new(
            Arc::new(catalog),
            payment.clone(),
            notifications.clone(),
        ));

        Self {
            processor,
            payment,
            notifications,
        }
    }

    fn order(product_id: &str, quantity: u32, location: &str) -> OrderRequest {
        OrderRequest {
            product_id: ProductId::new(product_id),
            quantity,
            location: location.to_string(),
            phone: "501234567".to_string(),
            customer_name: "Aisha".to_string(),
        }
    }
}

fn is_order_number(s: &str) -> bool {
    s.len() == 18 && s.starts_with("ORD-") && s[4..].chars().all(|c| c.is_ascii_digit())
}

#[tokio::test]
async fn test_happy_path_worked_example() {
    let h = TestHarness::new();

    let receipt = h
        .processor
        .process(TestHarness::order("P1", 2, "Dubai"))
        .await
        .unwrap();

    assert_eq!(receipt.total.major(), 2700);
    assert!(receipt.notified);
    assert!(is_order_number(receipt.order_number.as_str()));

    let requests = h.payment.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].amount.minor(), 270_000);
    assert_eq!(requests[0].line_item_name(), "Rose Bouquet x 2");

    let sent = h.notifications.sent();
    assert_eq!(sent.len(), 1);
    let values = sent[0].body_values(false);
    assert_eq!(values[0], "Aisha");
    assert_eq!(values[1], receipt.order_number.as_str());
    assert_eq!(values[2], "2700.00");
    assert_eq!(values[3], receipt.checkout_url);
    assert_eq!(sent[0].phone, "501234567");
}

#[tokio::test]
async fn test_checkout_amount_matches_notification_total() {
    let h = TestHarness::new();
    let fees = DeliveryFeeTable::default();

    for (product, quantity, location) in [
        ("P1", 1, "Abu Dhabi"),
        ("P2", 3, "Sharjah"),
        ("P2", 7, "Somewhere Else"),
    ] {
        let receipt = h
            .processor
            .process(TestHarness::order(product, quantity, location))
            .await
            .unwrap();
        let unit = if product == "P1" { 100 } else { 45 };
        let expected = Money::from_major(unit).multiply(quantity) + fees.fee_for(location);
        assert_eq!(receipt.total, expected);
    }

    let requests = h.payment.requests();
    let sent = h.notifications.sent();
    assert_eq!(requests.len(), sent.len());
    for (request, notification) in requests.iter().zip(sent.iter()) {
        assert_eq!(request.amount.minor(), request.amount.major() * 100);
        let shown = notification.body_values(false)[2].clone();
        assert_eq!(
            shown,
            format!("{:.2}", request.amount.minor() as f64 / 100.0)
        );
    }
}

#[tokio::test]
async fn test_unknown_product_calls_nothing() {
    let h = TestHarness::new();

    let err = h
        .processor
        .process(TestHarness::order("NOPE", 1, "Dubai"))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        CheckoutError::Order(OrderError::UnknownProduct { ref product_id }) if product_id == "NOPE"
    ));
    assert_eq!(h.payment.session_count(), 0);
    assert_eq!(h.notifications.sent_count(), 0);
}

#[tokio::test]
async fn test_zero_quantity_calls_nothing() {
    let h = TestHarness::new();

    let err = h
        .processor
        .process(TestHarness::order("P1", 0, "Dubai"))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        CheckoutError::Order(OrderError::InvalidQuantity { quantity: 0 })
    ));
    assert_eq!(h.payment.session_count(), 0);
}

#[tokio::test]
async fn test_payment_failure_skips_notification() {
    let h = TestHarness::new();
    h.payment.set_fail_on_create(true);

    let err = h
        .processor
        .process(TestHarness::order("P1", 2, "Dubai"))
        .await
        .unwrap_err();

    assert!(matches!(err, CheckoutError::PaymentSession(_)));
    assert_eq!(h.notifications.sent_count(), 0);
}

#[tokio::test]
async fn test_notification_failure_still_succeeds() {
    let h = TestHarness::new();
    h.notifications.set_fail_on_send(true);

    let receipt = h
        .processor
        .process(TestHarness::order("P1", 2, "Dubai"))
        .await
        .unwrap();

    assert!(!receipt.notified);
    assert!(!receipt.checkout_url.is_empty());
    assert_eq!(h.payment.session_count(), 1);
    assert_eq!(h.notifications.sent_count(), 0);
}

#[tokio::test]
async fn test_concurrent_orders_get_distinct_numbers() {
    let h = TestHarness::new();

    let tasks: Vec<_> = (0..20)
        .map(|i| {
            let processor = Arc::clone(&h.processor);
            tokio::spawn(async move {
                let product = if i % 2 == 0 { "P1" } else { "P2" };
                processor
                    .process(TestHarness::order(product, 1, "Ajman"))
                    .await
                    .unwrap()
            })
        })
        .collect();

    let mut numbers = HashSet::new();
    for task in tasks {
        let receipt = task.await.unwrap();
        assert!(is_order_number(receipt.order_number.as_str()));
        assert!(numbers.insert(receipt.order_number));
    }

    assert_eq!(numbers.len(), 20);
    assert_eq!(h.payment.session_count(), 20);
    assert_eq!(h.notifications.sent_count(), 20);
}
