//! Guest checkout repository.
//!
//! Wraps the `create_guest_order` database function, which performs the
//! whole checkout (guest user, address, order, items, stock decrement,
//! payment) as one atomic call. The function signals business failures
//! with custom `OC`-prefixed SQLSTATEs, which surface here as
//! [`RepositoryError::Conflict`].

use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::PgPool;

use orchard_core::{OrderId, PaymentMethod, PaymentStatus, ProductId, UserId};

use super::RepositoryError;

/// One order line as the checkout function expects it.
#[derive(Debug, Clone, Serialize)]
pub struct GuestOrderItem {
    pub product_id: ProductId,
    pub quantity: i32,
    #[serde(with = "rust_decimal::serde::str")]
    pub price_at_purchase: Decimal,
}

/// Everything the checkout function needs in one call.
#[derive(Debug)]
pub struct GuestOrderInput<'a> {
    pub email: &'a str,
    pub username: Option<&'a str>,
    pub street: &'a str,
    pub city: &'a str,
    pub state: Option<&'a str>,
    pub country: &'a str,
    pub zip_code: &'a str,
    pub items: &'a [GuestOrderItem],
    pub payment_method: PaymentMethod,
    pub payment_status: PaymentStatus,
    pub transaction_id: Option<&'a str>,
}

/// The identifiers produced by a successful guest checkout.
#[derive(Debug, Clone, Copy)]
pub struct GuestOrderIds {
    pub order_id: OrderId,
    pub user_id: UserId,
}

/// Repository for the guest checkout database function.
pub struct CheckoutRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CheckoutRepository<'a> {
    /// Create a new checkout repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Execute the atomic guest checkout.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` when the database function raises
    /// one of its business errors (admin email, unknown product, insufficient
    /// stock); `RepositoryError::Database` for everything else.
    pub async fn create_guest_order(
        &self,
        input: &GuestOrderInput<'_>,
    ) -> Result<GuestOrderIds, RepositoryError> {
        let items = serde_json::to_value(input.items).map_err(|e| {
            RepositoryError::DataCorruption(format!("failed to serialize order items: {e}"))
        })?;

        let (order_id, user_id) = sqlx::query_as::<_, (i32, i32)>(
            "SELECT new_order_id, new_user_id
             FROM create_guest_order($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)",
        )
        .bind(input.email)
        .bind(input.username)
        .bind(input.street)
        .bind(input.city)
        .bind(input.state)
        .bind(input.country)
        .bind(input.zip_code)
        .bind(items)
        .bind(input.payment_method.to_string())
        .bind(input.payment_status.to_string())
        .bind(input.transaction_id)
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.code().is_some_and(|code| code.starts_with("OC"))
            {
                return RepositoryError::Conflict(db_err.message().to_owned());
            }
            RepositoryError::Database(e)
        })?;

        Ok(GuestOrderIds {
            order_id: OrderId::new(order_id),
            user_id: UserId::new(user_id),
        })
    }
}
