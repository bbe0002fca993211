//! Order lifecycle service.
//!
//! Owns the status state machine checks, ownership rules, and the order
//! audit trail. Placement runs as one transaction: stock, header, and
//! lines commit together, and two orders racing over the last unit cannot
//! both succeed.

use rust_decimal::Decimal;
use sqlx::PgPool;

use orchard_core::{AddressId, OrderId, OrderStatus, ProductId, UserId};

use crate::db::addresses::AddressRepository;
use crate::db::audit_logs::AuditLogRepository;
use crate::db::order_items::OrderItemRepository;
use crate::db::orders::OrderRepository;
use crate::db::payments::PaymentRepository;
use crate::db::products::ProductRepository;
use crate::db::users::UserRepository;
use crate::models::{FullOrderDetails, Order, OrderItem, OrderSummary};

use super::{Requester, ServiceError};

/// One requested order line.
#[derive(Debug, Clone, Copy)]
pub struct OrderLine {
    pub product_id: ProductId,
    pub quantity: i32,
}

/// Order lifecycle service.
pub struct OrderService<'a> {
    orders: OrderRepository<'a>,
    items: OrderItemRepository<'a>,
    products: ProductRepository<'a>,
    payments: PaymentRepository<'a>,
    addresses: AddressRepository<'a>,
    users: UserRepository<'a>,
    audit: AuditLogRepository<'a>,
}

impl<'a> OrderService<'a> {
    /// Create a new order service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            orders: OrderRepository::new(pool),
            items: OrderItemRepository::new(pool),
            products: ProductRepository::new(pool),
            payments: PaymentRepository::new(pool),
            addresses: AddressRepository::new(pool),
            users: UserRepository::new(pool),
            audit: AuditLogRepository::new(pool),
        }
    }

    /// Place an order for the requesting user.
    ///
    /// Prices are snapshotted from the catalog at order time; the stock
    /// decrements, order header, and lines then commit in one transaction,
    /// so a rejected line (unknown product, missing stock) rolls the whole
    /// placement back.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Validation` on empty lines or non-positive
    /// quantities, `ServiceError::Forbidden` on a foreign shipping address,
    /// and `ServiceError::Conflict` on unknown products or missing stock.
    pub async fn create(
        &self,
        requester: Requester,
        address_id: Option<AddressId>,
        lines: &[OrderLine],
    ) -> Result<Order, ServiceError> {
        if lines.is_empty() {
            return Err(ServiceError::Validation(
                "order must contain at least one item".to_owned(),
            ));
        }
        if lines.iter().any(|line| line.quantity <= 0) {
            return Err(ServiceError::Validation(
                "quantity must be positive".to_owned(),
            ));
        }

        if let Some(address_id) = address_id {
            let address = self
                .addresses
                .get_by_id(address_id)
                .await?
                .ok_or_else(|| ServiceError::NotFound("address not found".to_owned()))?;
            if address.user_id != requester.user_id {
                return Err(ServiceError::Forbidden(
                    "address belongs to another user".to_owned(),
                ));
            }
        }

        // Snapshot prices and compute the total before touching stock.
        let mut priced = Vec::with_capacity(lines.len());
        let mut total = Decimal::ZERO;
        for line in lines {
            let product = self.products.get_by_id(line.product_id).await?.ok_or_else(|| {
                ServiceError::Conflict(format!("product {} does not exist", line.product_id))
            })?;
            total += product.price * Decimal::from(line.quantity);
            priced.push((line.product_id, line.quantity, product.price));
        }

        let order = self
            .orders
            .create_with_items(
                requester.user_id,
                address_id,
                total,
                OrderStatus::Pending,
                &priced,
            )
            .await?;

        self.audit
            .add(
                "Order Created",
                Some(&format!(
                    "order {} created for user {} (total {})",
                    order.id, order.user_id, order.total_amount
                )),
            )
            .await?;

        Ok(order)
    }

    /// List a user's orders, with ownership verified.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Forbidden` if the requester is neither the
    /// owner nor an admin.
    pub async fn list(
        &self,
        requester: Requester,
        user_id: UserId,
    ) -> Result<Vec<Order>, ServiceError> {
        if !requester.can_access(user_id) {
            return Err(ServiceError::Forbidden(
                "cannot view another user's orders".to_owned(),
            ));
        }

        Ok(self.orders.list_by_user(user_id).await?)
    }

    /// Admin listing of every order with owner and address columns.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Repository` on query failure.
    pub async fn list_all_summaries(&self) -> Result<Vec<OrderSummary>, ServiceError> {
        Ok(self.orders.list_all_summaries().await?)
    }

    /// Get one order, with ownership verified.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::NotFound` for a missing order and
    /// `ServiceError::Forbidden` when it belongs to someone else.
    pub async fn get(&self, requester: Requester, id: OrderId) -> Result<Order, ServiceError> {
        let order = self
            .orders
            .get_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::NotFound("order not found".to_owned()))?;

        if !requester.can_access(order.user_id) {
            return Err(ServiceError::Forbidden(
                "order belongs to another user".to_owned(),
            ));
        }

        Ok(order)
    }

    /// Full order view: header, lines, payment, address, owner.
    ///
    /// # Errors
    ///
    /// Same as [`Self::get`], plus `ServiceError::Repository` for the
    /// follow-up reads.
    pub async fn details(
        &self,
        requester: Requester,
        id: OrderId,
    ) -> Result<FullOrderDetails, ServiceError> {
        let order = self.get(requester, id).await?;

        let items = self.items.list_by_order(order.id).await?;
        let payment = self.payments.get_by_order(order.id).await?;
        let address = match order.address_id {
            Some(address_id) => self.addresses.get_by_id(address_id).await?,
            None => None,
        };
        let user = self.users.get_by_id(order.user_id).await?;

        Ok(FullOrderDetails {
            order,
            items,
            payment,
            address,
            user,
        })
    }

    /// List one order's lines (admin view).
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::NotFound` for a missing order.
    pub async fn list_items(&self, id: OrderId) -> Result<Vec<OrderItem>, ServiceError> {
        self.get_unchecked(id).await?;

        Ok(self.items.list_by_order(id).await?)
    }

    /// Move an order to a new status (admin path).
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::NotFound` for a missing order and
    /// `ServiceError::Conflict` for a transition outside the lifecycle.
    pub async fn update_status(
        &self,
        id: OrderId,
        new_status: OrderStatus,
    ) -> Result<Order, ServiceError> {
        let order = self
            .orders
            .get_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::NotFound("order not found".to_owned()))?;

        if !order.status.can_transition_to(new_status) {
            return Err(ServiceError::Conflict(format!(
                "cannot transition order from {} to {}",
                order.status, new_status
            )));
        }

        self.orders.update_status(id, new_status).await?;

        self.audit
            .add(
                "Order Status Updated",
                Some(&format!(
                    "order {} status {} -> {}",
                    id, order.status, new_status
                )),
            )
            .await?;

        self.get_unchecked(id).await
    }

    /// Cancel an order on behalf of its owner.
    ///
    /// Only pending or processing orders can be cancelled; anything later
    /// is a conflict, never a silent no-op.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::NotFound` / `ServiceError::Forbidden` on a
    /// missing or foreign order and `ServiceError::Conflict` when the
    /// status forbids cancellation.
    pub async fn cancel(&self, requester: Requester, id: OrderId) -> Result<Order, ServiceError> {
        let order = self.get(requester, id).await?;

        if !order.status.is_cancellable() {
            return Err(ServiceError::Conflict(format!(
                "cannot cancel an order in status {}",
                order.status
            )));
        }

        self.orders.update_status(id, OrderStatus::Cancelled).await?;

        self.audit
            .add(
                "Order Cancelled",
                Some(&format!("order {} cancelled by user {}", id, requester.user_id)),
            )
            .await?;

        self.get_unchecked(id).await
    }

    async fn get_unchecked(&self, id: OrderId) -> Result<Order, ServiceError> {
        self.orders
            .get_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::NotFound("order not found".to_owned()))
    }
}
