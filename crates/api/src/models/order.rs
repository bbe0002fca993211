//! Order domain types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use orchard_core::{AddressId, OrderId, OrderItemId, OrderStatus, ProductId, UserId};

use super::{Address, Payment, User};

/// An order header.
#[derive(Debug, Clone, Serialize)]
pub struct Order {
    /// Unique order ID.
    pub id: OrderId,
    /// Owning user.
    pub user_id: UserId,
    /// Shipping address, if one was attached.
    pub address_id: Option<AddressId>,
    /// Order total (sum of item quantity x price-at-purchase).
    pub total_amount: Decimal,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

/// A single order line.
#[derive(Debug, Clone, Serialize)]
pub struct OrderItem {
    pub id: OrderItemId,
    pub order_id: OrderId,
    pub product_id: ProductId,
    /// Ordered quantity (> 0).
    pub quantity: i32,
    /// Price snapshot taken at order time; immune to later product edits.
    pub price_at_purchase: Decimal,
}

/// Admin order listing row.
///
/// Named projection of the orders/users/addresses join; replaces the ad-hoc
/// dynamic row the legacy admin view was built on.
#[derive(Debug, Clone, Serialize)]
pub struct OrderSummary {
    pub id: OrderId,
    pub username: Option<String>,
    pub email: String,
    pub total_amount: Decimal,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    /// Comma-joined shipping address, empty if the order has none.
    pub full_address: String,
}

/// An order with everything hanging off it, for detail views.
#[derive(Debug, Clone, Serialize)]
pub struct FullOrderDetails {
    pub order: Order,
    pub items: Vec<OrderItem>,
    pub payment: Option<Payment>,
    pub address: Option<Address>,
    pub user: Option<User>,
}
