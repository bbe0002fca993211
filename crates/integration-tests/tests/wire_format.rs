//! Wire-format contracts for the enums clients send and receive.
//!
//! These run without a server; they pin the JSON spellings the API and
//! webhook callers depend on.

use orchard_core::{OrderStatus, PaymentMethod, PaymentStatus, Role};
use serde_json::json;

#[test]
fn order_status_uses_snake_case() {
    assert_eq!(json!(OrderStatus::Pending), json!("pending"));
    assert_eq!(json!(OrderStatus::Processing), json!("processing"));
    assert_eq!(json!(OrderStatus::Shipped), json!("shipped"));
    assert_eq!(json!(OrderStatus::Delivered), json!("delivered"));
    assert_eq!(json!(OrderStatus::Cancelled), json!("cancelled"));
}

#[test]
fn payment_enums_use_snake_case() {
    assert_eq!(json!(PaymentMethod::CreditCard), json!("credit_card"));
    assert_eq!(json!(PaymentStatus::Completed), json!("completed"));
    assert_eq!(json!(Role::Customer), json!("customer"));
}

#[test]
fn status_strings_round_trip() {
    for status in [
        OrderStatus::Pending,
        OrderStatus::Processing,
        OrderStatus::Shipped,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
    ] {
        let encoded = serde_json::to_string(&status).expect("serializes");
        let decoded: OrderStatus = serde_json::from_str(&encoded).expect("parses back");
        assert_eq!(decoded, status);
    }
}

#[test]
fn unknown_status_is_rejected() {
    assert!(serde_json::from_str::<OrderStatus>("\"returned\"").is_err());
    assert!(serde_json::from_str::<PaymentMethod>("\"barter\"").is_err());
}
