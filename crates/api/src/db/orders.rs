//! Order repository.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use orchard_core::{AddressId, OrderId, OrderStatus, ProductId, UserId};

use super::RepositoryError;
use crate::models::{Order, OrderSummary};

#[derive(Debug, sqlx::FromRow)]
struct OrderRow {
    id: i32,
    user_id: i32,
    address_id: Option<i32>,
    total_amount: Decimal,
    status: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<OrderRow> for Order {
    type Error = RepositoryError;

    fn try_from(row: OrderRow) -> Result<Self, Self::Error> {
        let status: OrderStatus = row.status.parse().map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid order status in database: {e}"))
        })?;

        Ok(Self {
            id: OrderId::new(row.id),
            user_id: UserId::new(row.user_id),
            address_id: row.address_id.map(AddressId::new),
            total_amount: row.total_amount,
            status,
            created_at: row.created_at,
        })
    }
}

/// Row type for the admin order listing join.
#[derive(Debug, sqlx::FromRow)]
struct OrderSummaryRow {
    id: i32,
    username: Option<String>,
    email: String,
    total_amount: Decimal,
    status: String,
    created_at: DateTime<Utc>,
    street: Option<String>,
    city: Option<String>,
    state: Option<String>,
    country: Option<String>,
    zip_code: Option<String>,
}

impl TryFrom<OrderSummaryRow> for OrderSummary {
    type Error = RepositoryError;

    fn try_from(row: OrderSummaryRow) -> Result<Self, Self::Error> {
        let status: OrderStatus = row.status.parse().map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid order status in database: {e}"))
        })?;

        let full_address = [row.street, row.city, row.state, row.country, row.zip_code]
            .into_iter()
            .flatten()
            .filter(|part| !part.trim().is_empty())
            .collect::<Vec<_>>()
            .join(", ");

        Ok(Self {
            id: OrderId::new(row.id),
            username: row.username,
            email: row.email,
            total_amount: row.total_amount,
            status,
            created_at: row.created_at,
            full_address,
        })
    }
}

/// Repository for order database operations.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get an order by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: OrderId) -> Result<Option<Order>, RepositoryError> {
        let row = sqlx::query_as::<_, OrderRow>(
            "SELECT id, user_id, address_id, total_amount, status, created_at
             FROM orders WHERE id = $1",
        )
        .bind(id.as_i32())
        .fetch_optional(self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    /// List a user's orders, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_by_user(&self, user_id: UserId) -> Result<Vec<Order>, RepositoryError> {
        let rows = sqlx::query_as::<_, OrderRow>(
            "SELECT id, user_id, address_id, total_amount, status, created_at
             FROM orders
             WHERE user_id = $1
             ORDER BY created_at DESC",
        )
        .bind(user_id.as_i32())
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// List every order joined with owner and shipping address (admin view).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails and
    /// `RepositoryError::DataCorruption` on an unknown stored status.
    pub async fn list_all_summaries(&self) -> Result<Vec<OrderSummary>, RepositoryError> {
        let rows = sqlx::query_as::<_, OrderSummaryRow>(
            "SELECT o.id, u.username, u.email, o.total_amount, o.status, o.created_at,
                    a.street, a.city, a.state, a.country, a.zip_code
             FROM orders o
             JOIN users u ON o.user_id = u.id
             LEFT JOIN addresses a ON o.address_id = a.id
             ORDER BY o.created_at DESC",
        )
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// Place an order in a single transaction: guarded stock decrements,
    /// the order header, and its lines commit together or not at all, so a
    /// failed line can never leave stock taken without an order.
    ///
    /// Each line is `(product_id, quantity, price_at_purchase)`. The
    /// decrement is guarded by `stock >= quantity` in the statement, so
    /// concurrent orders can never drive stock negative.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` on an unknown product, missing
    /// stock, or a missing user/address reference;
    /// `RepositoryError::Database` for other database errors.
    pub async fn create_with_items(
        &self,
        user_id: UserId,
        address_id: Option<AddressId>,
        total_amount: Decimal,
        status: OrderStatus,
        items: &[(ProductId, i32, Decimal)],
    ) -> Result<Order, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        for (product_id, quantity, _) in items {
            let result = sqlx::query(
                "UPDATE products SET stock = stock - $1 WHERE id = $2 AND stock >= $1",
            )
            .bind(quantity)
            .bind(product_id.as_i32())
            .execute(&mut *tx)
            .await?;

            // Dropping the transaction on the error paths rolls back any
            // decrements already made for earlier lines.
            if result.rows_affected() == 0 {
                let exists = sqlx::query_scalar::<_, bool>(
                    "SELECT EXISTS (SELECT 1 FROM products WHERE id = $1)",
                )
                .bind(product_id.as_i32())
                .fetch_one(&mut *tx)
                .await?;

                if !exists {
                    return Err(RepositoryError::Conflict(format!(
                        "product {product_id} does not exist"
                    )));
                }

                return Err(RepositoryError::Conflict(format!(
                    "insufficient stock for product {product_id}"
                )));
            }
        }

        let row = sqlx::query_as::<_, OrderRow>(
            "INSERT INTO orders (user_id, address_id, total_amount, status)
             VALUES ($1, $2, $3, $4)
             RETURNING id, user_id, address_id, total_amount, status, created_at",
        )
        .bind(user_id.as_i32())
        .bind(address_id.map(|id| id.as_i32()))
        .bind(total_amount)
        .bind(status.to_string())
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_foreign_key_violation()
            {
                return RepositoryError::Conflict("user or address does not exist".to_owned());
            }
            RepositoryError::Database(e)
        })?;

        for (product_id, quantity, price_at_purchase) in items {
            sqlx::query(
                "INSERT INTO order_items (order_id, product_id, quantity, price_at_purchase)
                 VALUES ($1, $2, $3, $4)",
            )
            .bind(row.id)
            .bind(product_id.as_i32())
            .bind(quantity)
            .bind(price_at_purchase)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        row.try_into()
    }

    /// Persist a new status for an order.
    ///
    /// Transition validity is the service's responsibility; this only writes.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the order doesn't exist and
    /// `RepositoryError::Database` for other database errors.
    pub async fn update_status(
        &self,
        id: OrderId,
        status: OrderStatus,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query("UPDATE orders SET status = $1 WHERE id = $2")
            .bind(status.to_string())
            .bind(id.as_i32())
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
