//! Order processing endpoint.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use checkout::{NotificationService, OrderRequest, PaymentService};
use domain::ProductId;
use domain::catalog::major_units_json;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::AppState;
use crate::error::ApiError;

// -- Request types --

/// Raw order body. Fields are optional so that absent or mistyped values
/// produce a descriptive 400 instead of a generic rejection.
#[derive(Debug, Default, Deserialize)]
pub struct ProcessOrderRequest {
    pub product_id: Option<Value>,
    pub quantity: Option<Value>,
    pub location: Option<String>,
    pub phone: Option<Value>,
    pub customer_name: Option<String>,
}

impl ProcessOrderRequest {
    /// Checks every field and builds the order.
    pub fn validate(self) -> Result<OrderRequest, ApiError> {
        let product_id = text_or_number("product_id", self.product_id)?;
        let quantity = positive_quantity(self.quantity)?;
        let location = self.location.ok_or_else(|| missing("location"))?;
        let phone = text_or_number("phone", self.phone)?;
        let customer_name = self
            .customer_name
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| missing("customer_name"))?;

        Ok(OrderRequest {
            product_id: ProductId::new(product_id),
            quantity,
            location: location.trim().to_string(),
            phone,
            customer_name,
        })
    }
}

fn missing(field: &str) -> ApiError {
    ApiError::BadRequest(format!("Missing required field: {field}"))
}

/// Accepts a non-empty string or an integer, e.g. `"P1"` or `101`.
fn text_or_number(field: &str, value: Option<Value>) -> Result<String, ApiError> {
    match value {
        None | Some(Value::Null) => Err(missing(field)),
        Some(Value::String(s)) => {
            let s = s.trim();
            if s.is_empty() {
                Err(missing(field))
            } else {
                Ok(s.to_string())
            }
        }
        Some(Value::Number(n)) if n.is_i64() || n.is_u64() => Ok(n.to_string()),
        Some(_) => Err(ApiError::BadRequest(format!(
            "Field {field} must be a string or an integer"
        ))),
    }
}

/// Accepts a positive integer or a string holding one, e.g. `2` or `"2"`.
fn positive_quantity(value: Option<Value>) -> Result<u32, ApiError> {
    let invalid = || ApiError::BadRequest("Field quantity must be a positive integer".to_string());
    let quantity = match value {
        None | Some(Value::Null) => return Err(missing("quantity")),
        Some(Value::Number(n)) => n.as_u64().ok_or_else(invalid)?,
        Some(Value::String(s)) => s.trim().parse::<u64>().map_err(|_| invalid())?,
        Some(_) => return Err(invalid()),
    };
    match u32::try_from(quantity) {
        Ok(q) if q > 0 => Ok(q),
        _ => Err(invalid()),
    }
}

// -- Response types --

#[derive(Debug, Serialize)]
pub struct ProcessOrderResponse {
    pub message: &'static str,
    pub order_number: String,
    /// Order total in major units.
    pub total: Value,
    pub checkout_url: String,
}

// -- Handlers --

/// POST /api/process-order — price the order, create a checkout session and
/// send the customer the payment link.
#[tracing::instrument(skip(state, payload))]
pub async fn process<P, N>(
    State(state): State<Arc<AppState<P, N>>>,
    payload: Result<Json<ProcessOrderRequest>, JsonRejection>,
) -> Result<Json<ProcessOrderResponse>, ApiError>
where
    P: PaymentService + 'static,
    N: NotificationService + 'static,
{
    let Json(body) = payload.map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;
    let order = body.validate()?;

    let receipt = state.processor.process(order).await?;

    Ok(Json(ProcessOrderResponse {
        message: "Order processed successfully",
        order_number: receipt.order_number.to_string(),
        total: major_units_json(receipt.total),
        checkout_url: receipt.checkout_url,
    }))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn body(value: Value) -> ProcessOrderRequest {
        serde_json::from_value(value).unwrap()
    }

    fn full() -> Value {
        json!({
            "product_id": "P1",
            "quantity": 2,
            "location": "Dubai",
            "phone": "501234567",
            "customer_name": "Aisha"
        })
    }

    #[test]
    fn test_valid_body() {
        let order = body(full()).validate().unwrap();
        assert_eq!(order.product_id, ProductId::new("P1"));
        assert_eq!(order.quantity, 2);
        assert_eq!(order.location, "Dubai");
        assert_eq!(order.phone, "501234567");
        assert_eq!(order.customer_name, "Aisha");
    }

    #[test]
    fn test_numeric_ids_and_string_quantity() {
        let mut value = full();
        value["product_id"] = json!(101);
        value["quantity"] = json!("3");
        value["phone"] = json!(501234567);

        let order = body(value).validate().unwrap();
        assert_eq!(order.product_id.as_str(), "101");
        assert_eq!(order.quantity, 3);
        assert_eq!(order.phone, "501234567");
    }

    #[test]
    fn test_each_missing_field_is_reported() {
        for field in ["product_id", "quantity", "location", "phone", "customer_name"] {
            let mut value = full();
            value.as_object_mut().unwrap().remove(field);
            match body(value).validate() {
                Err(ApiError::BadRequest(msg)) => assert!(msg.contains(field), "{msg}"),
                other => panic!("expected bad request for {field}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_bad_quantities() {
        for quantity in [json!(0), json!(-1), json!(1.5), json!("two"), json!(true), json!(u64::MAX)] {
            let mut value = full();
            value["quantity"] = quantity.clone();
            assert!(
                matches!(body(value).validate(), Err(ApiError::BadRequest(_))),
                "quantity {quantity} accepted"
            );
        }
    }

    #[test]
    fn test_blank_strings_are_missing() {
        let mut value = full();
        value["customer_name"] = json!("   ");
        assert!(matches!(body(value).validate(), Err(ApiError::BadRequest(_))));

        let mut value = full();
        value["product_id"] = json!("");
        assert!(matches!(body(value).validate(), Err(ApiError::BadRequest(_))));
    }
}
