//! Payment repository.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use orchard_core::{OrderId, PaymentId, PaymentMethod, PaymentStatus};

use super::RepositoryError;
use crate::models::Payment;

#[derive(Debug, sqlx::FromRow)]
struct PaymentRow {
    id: i32,
    order_id: i32,
    amount: Decimal,
    payment_method: String,
    status: String,
    transaction_id: Option<String>,
    created_at: DateTime<Utc>,
}

impl TryFrom<PaymentRow> for Payment {
    type Error = RepositoryError;

    fn try_from(row: PaymentRow) -> Result<Self, Self::Error> {
        let payment_method: PaymentMethod = row.payment_method.parse().map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid payment method in database: {e}"))
        })?;
        let status: PaymentStatus = row.status.parse().map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid payment status in database: {e}"))
        })?;

        Ok(Self {
            id: PaymentId::new(row.id),
            order_id: OrderId::new(row.order_id),
            amount: row.amount,
            payment_method,
            status,
            transaction_id: row.transaction_id,
            created_at: row.created_at,
        })
    }
}

/// Repository for payment database operations.
pub struct PaymentRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> PaymentRepository<'a> {
    /// Create a new payment repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all payments, newest first (admin view).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_all(&self) -> Result<Vec<Payment>, RepositoryError> {
        let rows = sqlx::query_as::<_, PaymentRow>(
            "SELECT id, order_id, amount, payment_method, status, transaction_id, created_at
             FROM payments ORDER BY created_at DESC",
        )
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// Get a payment by its own ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: PaymentId) -> Result<Option<Payment>, RepositoryError> {
        let row = sqlx::query_as::<_, PaymentRow>(
            "SELECT id, order_id, amount, payment_method, status, transaction_id, created_at
             FROM payments WHERE id = $1",
        )
        .bind(id.as_i32())
        .fetch_optional(self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    /// Get the payment attached to an order (one-to-one).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_order(&self, order_id: OrderId) -> Result<Option<Payment>, RepositoryError> {
        let row = sqlx::query_as::<_, PaymentRow>(
            "SELECT id, order_id, amount, payment_method, status, transaction_id, created_at
             FROM payments WHERE order_id = $1",
        )
        .bind(order_id.as_i32())
        .fetch_optional(self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    /// Insert a payment row for an order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the order already has a payment
    /// or doesn't exist; `RepositoryError::Database` for other errors.
    pub async fn create(
        &self,
        order_id: OrderId,
        amount: Decimal,
        payment_method: PaymentMethod,
        status: PaymentStatus,
        transaction_id: Option<&str>,
    ) -> Result<Payment, RepositoryError> {
        let row = sqlx::query_as::<_, PaymentRow>(
            "INSERT INTO payments (order_id, amount, payment_method, status, transaction_id)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING id, order_id, amount, payment_method, status, transaction_id, created_at",
        )
        .bind(order_id.as_i32())
        .bind(amount)
        .bind(payment_method.to_string())
        .bind(status.to_string())
        .bind(transaction_id)
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e {
                if db_err.is_unique_violation() {
                    return RepositoryError::Conflict("order already has a payment".to_owned());
                }
                if db_err.is_foreign_key_violation() {
                    return RepositoryError::Conflict("order does not exist".to_owned());
                }
            }
            RepositoryError::Database(e)
        })?;

        row.try_into()
    }

    /// Persist a new status (and optionally a gateway transaction id) by
    /// payment ID.
    ///
    /// A `None` transaction id leaves the stored one untouched.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the payment doesn't exist and
    /// `RepositoryError::Database` for other database errors.
    pub async fn update_status(
        &self,
        id: PaymentId,
        status: PaymentStatus,
        transaction_id: Option<&str>,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            "UPDATE payments
             SET status = $1, transaction_id = COALESCE($2, transaction_id)
             WHERE id = $3",
        )
        .bind(status.to_string())
        .bind(transaction_id)
        .bind(id.as_i32())
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    /// Persist a new status by the owning order's ID (webhook path).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the order has no payment and
    /// `RepositoryError::Database` for other database errors.
    pub async fn update_status_by_order(
        &self,
        order_id: OrderId,
        status: PaymentStatus,
        transaction_id: Option<&str>,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            "UPDATE payments
             SET status = $1, transaction_id = COALESCE($2, transaction_id)
             WHERE order_id = $3",
        )
        .bind(status.to_string())
        .bind(transaction_id)
        .bind(order_id.as_i32())
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
