//! Guest checkout service.
//!
//! Validates the whole request locally, then hands the database function
//! one atomic call. Nothing persists on any failure path.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use orchard_core::{Email, OrderId, PaymentMethod, PaymentStatus, ProductId, UserId};

use crate::db::audit_logs::AuditLogRepository;
use crate::db::checkout::{CheckoutRepository, GuestOrderInput, GuestOrderItem};

use super::ServiceError;

/// One guest order line as submitted by the client.
#[derive(Debug, Clone, Deserialize)]
pub struct GuestCheckoutItem {
    pub product_id: ProductId,
    pub quantity: i32,
    pub price_at_purchase: Decimal,
}

/// A complete guest checkout request.
#[derive(Debug, Clone, Deserialize)]
pub struct GuestCheckout {
    pub email: String,
    pub username: Option<String>,
    pub street: String,
    pub city: String,
    pub state: Option<String>,
    pub country: String,
    pub zip_code: String,
    pub items: Vec<GuestCheckoutItem>,
    pub payment_method: PaymentMethod,
    pub payment_status: Option<PaymentStatus>,
    pub transaction_id: Option<String>,
}

/// The identifiers a successful guest checkout hands back to the client.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct GuestOrderConfirmation {
    pub order_id: OrderId,
    pub user_id: UserId,
}

/// Guest checkout service.
pub struct CheckoutService<'a> {
    checkout: CheckoutRepository<'a>,
    audit: AuditLogRepository<'a>,
}

impl<'a> CheckoutService<'a> {
    /// Create a new checkout service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            checkout: CheckoutRepository::new(pool),
            audit: AuditLogRepository::new(pool),
        }
    }

    /// Run a guest checkout end to end.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Validation` before any I/O on a malformed
    /// request, and `ServiceError::Conflict` when the database rejects the
    /// order (admin email, unknown product, insufficient stock).
    pub async fn guest_checkout(
        &self,
        request: &GuestCheckout,
    ) -> Result<GuestOrderConfirmation, ServiceError> {
        let email = validate(request)?;

        let items: Vec<GuestOrderItem> = request
            .items
            .iter()
            .map(|item| GuestOrderItem {
                product_id: item.product_id,
                quantity: item.quantity,
                price_at_purchase: item.price_at_purchase,
            })
            .collect();

        let input = GuestOrderInput {
            email: email.as_str(),
            username: request.username.as_deref(),
            street: request.street.trim(),
            city: request.city.trim(),
            state: request.state.as_deref(),
            country: request.country.trim(),
            zip_code: request.zip_code.trim(),
            items: &items,
            payment_method: request.payment_method,
            payment_status: request.payment_status.unwrap_or(PaymentStatus::Pending),
            transaction_id: request.transaction_id.as_deref(),
        };

        let ids = self.checkout.create_guest_order(&input).await?;

        self.audit
            .add(
                "Guest Order Created",
                Some(&format!(
                    "order {} created for guest {} (user {})",
                    ids.order_id, email, ids.user_id
                )),
            )
            .await?;

        Ok(GuestOrderConfirmation {
            order_id: ids.order_id,
            user_id: ids.user_id,
        })
    }
}

/// Reject a malformed request before any database work.
fn validate(request: &GuestCheckout) -> Result<Email, ServiceError> {
    let email = Email::parse(&request.email)
        .map_err(|e| ServiceError::Validation(format!("invalid email: {e}")))?;

    for (field, value) in [
        ("street", &request.street),
        ("city", &request.city),
        ("country", &request.country),
        ("zip_code", &request.zip_code),
    ] {
        if value.trim().is_empty() {
            return Err(ServiceError::Validation(format!("{field} is required")));
        }
    }

    if request.items.is_empty() {
        return Err(ServiceError::Validation(
            "order must contain at least one item".to_owned(),
        ));
    }

    for item in &request.items {
        if item.quantity <= 0 {
            return Err(ServiceError::Validation(
                "quantity must be positive".to_owned(),
            ));
        }
        if item.price_at_purchase < Decimal::ZERO {
            return Err(ServiceError::Validation(
                "price cannot be negative".to_owned(),
            ));
        }
    }

    Ok(email)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> GuestCheckout {
        GuestCheckout {
            email: "guest@example.com".to_owned(),
            username: None,
            street: "1 Main St".to_owned(),
            city: "Springfield".to_owned(),
            state: None,
            country: "US".to_owned(),
            zip_code: "12345".to_owned(),
            items: vec![GuestCheckoutItem {
                product_id: ProductId::new(1),
                quantity: 2,
                price_at_purchase: Decimal::new(999, 2),
            }],
            payment_method: PaymentMethod::CreditCard,
            payment_status: None,
            transaction_id: None,
        }
    }

    #[test]
    fn valid_request_passes() {
        assert!(validate(&request()).is_ok());
    }

    #[test]
    fn bad_email_is_rejected() {
        let mut r = request();
        r.email = "not-an-email".to_owned();
        assert!(matches!(validate(&r), Err(ServiceError::Validation(_))));
    }

    #[test]
    fn empty_items_are_rejected() {
        let mut r = request();
        r.items.clear();
        assert!(matches!(validate(&r), Err(ServiceError::Validation(_))));
    }

    #[test]
    fn zero_quantity_is_rejected() {
        let mut r = request();
        r.items[0].quantity = 0;
        assert!(matches!(validate(&r), Err(ServiceError::Validation(_))));
    }

    #[test]
    fn negative_price_is_rejected() {
        let mut r = request();
        r.items[0].price_at_purchase = Decimal::NEGATIVE_ONE;
        assert!(matches!(validate(&r), Err(ServiceError::Validation(_))));
    }

    #[test]
    fn missing_address_field_is_rejected() {
        let mut r = request();
        r.zip_code = " ".to_owned();
        assert!(matches!(validate(&r), Err(ServiceError::Validation(_))));
    }
}
