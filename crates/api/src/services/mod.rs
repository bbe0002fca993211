//! Business services.
//!
//! One service per entity, each borrowing the pool and composing the
//! repositories it needs. Services own validation, ownership checks, and
//! the audit trail; repositories stay mechanical.

pub mod addresses;
pub mod audit;
pub mod auth;
pub mod categories;
pub mod checkout;
pub mod orders;
pub mod payments;
pub mod products;
pub mod users;

use thiserror::Error;

use orchard_core::UserId;

use crate::db::RepositoryError;

pub use addresses::AddressService;
pub use audit::AuditService;
pub use auth::{AuthService, TokenService};
pub use categories::CategoryService;
pub use checkout::CheckoutService;
pub use orders::OrderService;
pub use payments::PaymentService;
pub use products::ProductService;
pub use users::UserService;

/// Errors produced by the business layer.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Input failed validation before any I/O.
    #[error("{0}")]
    Validation(String),

    /// The requested entity does not exist.
    #[error("{0}")]
    NotFound(String),

    /// The acting user may not touch this entity.
    #[error("{0}")]
    Forbidden(String),

    /// The operation conflicts with current state.
    #[error("{0}")]
    Conflict(String),

    /// Infrastructure failure below the business layer.
    #[error("repository error: {0}")]
    Repository(RepositoryError),
}

impl From<RepositoryError> for ServiceError {
    fn from(e: RepositoryError) -> Self {
        match e {
            RepositoryError::NotFound => Self::NotFound("not found".to_owned()),
            RepositoryError::Conflict(message) => Self::Conflict(message),
            other => Self::Repository(other),
        }
    }
}

/// The authenticated actor a service call runs on behalf of.
///
/// Ownership checks compare against `user_id`; `is_admin` widens reads and
/// writes to any user's data.
#[derive(Debug, Clone, Copy)]
pub struct Requester {
    pub user_id: UserId,
    pub is_admin: bool,
}

impl Requester {
    /// Whether this requester may act on data owned by `owner`.
    #[must_use]
    pub fn can_access(&self, owner: UserId) -> bool {
        self.is_admin || self.user_id == owner
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_can_access_any_owner() {
        let admin = Requester {
            user_id: UserId::new(1),
            is_admin: true,
        };
        assert!(admin.can_access(UserId::new(99)));
    }

    #[test]
    fn customer_can_access_only_own_data() {
        let customer = Requester {
            user_id: UserId::new(7),
            is_admin: false,
        };
        assert!(customer.can_access(UserId::new(7)));
        assert!(!customer.can_access(UserId::new(8)));
    }

    #[test]
    fn repository_conflict_becomes_service_conflict() {
        let err: ServiceError = RepositoryError::Conflict("taken".to_owned()).into();
        assert!(matches!(err, ServiceError::Conflict(m) if m == "taken"));
    }

    #[test]
    fn repository_not_found_becomes_service_not_found() {
        let err: ServiceError = RepositoryError::NotFound.into();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }
}
