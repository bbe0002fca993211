//! Payment domain type.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use orchard_core::{OrderId, PaymentId, PaymentMethod, PaymentStatus};

/// A payment record; at most one per order.
#[derive(Debug, Clone, Serialize)]
pub struct Payment {
    /// Unique payment ID.
    pub id: PaymentId,
    /// Owning order (unique: one payment per order).
    pub order_id: OrderId,
    pub amount: Decimal,
    pub payment_method: PaymentMethod,
    pub status: PaymentStatus,
    /// External gateway transaction reference, if any.
    pub transaction_id: Option<String>,
    pub created_at: DateTime<Utc>,
}
