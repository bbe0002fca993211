//! Payment service.
//!
//! Status updates audit only when the status actually changes; comparing
//! typed enums makes that check case-insensitive by construction.

use sqlx::PgPool;

use orchard_core::{OrderId, PaymentId, PaymentMethod, PaymentStatus};

use crate::db::audit_logs::AuditLogRepository;
use crate::db::orders::OrderRepository;
use crate::db::payments::PaymentRepository;
use crate::models::Payment;

use super::{Requester, ServiceError};

/// Payment service.
pub struct PaymentService<'a> {
    payments: PaymentRepository<'a>,
    orders: OrderRepository<'a>,
    audit: AuditLogRepository<'a>,
}

impl<'a> PaymentService<'a> {
    /// Create a new payment service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            payments: PaymentRepository::new(pool),
            orders: OrderRepository::new(pool),
            audit: AuditLogRepository::new(pool),
        }
    }

    /// List every payment (admin view).
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Repository` on query failure.
    pub async fn list(&self) -> Result<Vec<Payment>, ServiceError> {
        Ok(self.payments.list_all().await?)
    }

    /// Get a payment by ID (admin view).
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::NotFound` if no such payment exists.
    pub async fn get(&self, id: PaymentId) -> Result<Payment, ServiceError> {
        self.payments
            .get_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::NotFound("payment not found".to_owned()))
    }

    /// Get the payment for an order, with ownership verified.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::NotFound` for a missing order or payment and
    /// `ServiceError::Forbidden` when the order belongs to someone else.
    pub async fn get_by_order(
        &self,
        requester: Requester,
        order_id: OrderId,
    ) -> Result<Payment, ServiceError> {
        let order = self
            .orders
            .get_by_id(order_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound("order not found".to_owned()))?;

        if !requester.can_access(order.user_id) {
            return Err(ServiceError::Forbidden(
                "order belongs to another user".to_owned(),
            ));
        }

        self.payments
            .get_by_order(order_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound("payment not found".to_owned()))
    }

    /// Record a payment against an order. The amount is the order's total.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::NotFound` for a missing order,
    /// `ServiceError::Forbidden` when the order belongs to someone else, and
    /// `ServiceError::Conflict` when the order already has a payment.
    pub async fn create(
        &self,
        requester: Requester,
        order_id: OrderId,
        method: PaymentMethod,
        status: PaymentStatus,
        transaction_id: Option<&str>,
    ) -> Result<Payment, ServiceError> {
        let order = self
            .orders
            .get_by_id(order_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound("order not found".to_owned()))?;

        if !requester.can_access(order.user_id) {
            return Err(ServiceError::Forbidden(
                "order belongs to another user".to_owned(),
            ));
        }

        let payment = self
            .payments
            .create(order_id, order.total_amount, method, status, transaction_id)
            .await?;

        self.audit
            .add(
                "Payment Created",
                Some(&format!(
                    "payment {} created for order {} ({})",
                    payment.id, order_id, payment.amount
                )),
            )
            .await?;

        Ok(payment)
    }

    /// Update a payment's status by payment ID (admin path).
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::NotFound` if no such payment exists.
    pub async fn update_status(
        &self,
        id: PaymentId,
        status: PaymentStatus,
        transaction_id: Option<&str>,
    ) -> Result<Payment, ServiceError> {
        let existing = self.get(id).await?;

        self.payments.update_status(id, status, transaction_id).await?;

        if existing.status != status {
            self.audit
                .add(
                    "Payment Status Updated",
                    Some(&format!(
                        "payment {} status {} -> {}",
                        id, existing.status, status
                    )),
                )
                .await?;
        }

        self.get(id).await
    }

    /// Update a payment's status by the owning order's ID.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::NotFound` when the order has no payment.
    pub async fn update_status_by_order(
        &self,
        order_id: OrderId,
        status: PaymentStatus,
        transaction_id: Option<&str>,
    ) -> Result<Payment, ServiceError> {
        let existing = self
            .payments
            .get_by_order(order_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound("payment not found".to_owned()))?;

        self.payments
            .update_status_by_order(order_id, status, transaction_id)
            .await?;

        if existing.status != status {
            self.audit
                .add(
                    "Payment Status Updated (by Order)",
                    Some(&format!(
                        "order {} payment status {} -> {}",
                        order_id, existing.status, status
                    )),
                )
                .await?;
        }

        self.payments
            .get_by_order(order_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound("payment not found".to_owned()))
    }

    /// Apply a payment-gateway webhook notification.
    ///
    /// Runs the by-order update path, then records the webhook receipt
    /// itself in the audit trail.
    ///
    /// # Errors
    ///
    /// Same as [`Self::update_status_by_order`].
    pub async fn handle_webhook(
        &self,
        order_id: OrderId,
        status: PaymentStatus,
        transaction_id: Option<&str>,
    ) -> Result<Payment, ServiceError> {
        let payment = self
            .update_status_by_order(order_id, status, transaction_id)
            .await?;

        self.audit
            .add(
                "Payment Webhook",
                Some(&format!("webhook for order {order_id}: status {status}")),
            )
            .await?;

        Ok(payment)
    }
}
