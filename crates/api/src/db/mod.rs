//! Database operations for the store `PostgreSQL` database.
//!
//! One repository module per table:
//!
//! - `users` - Accounts (customers, admins, guests)
//! - `addresses` - Shipping/billing addresses
//! - `categories` - Product categories
//! - `products` - Catalog and stock
//! - `orders` / `order_items` - Order headers and lines
//! - `payments` - One payment row per order
//! - `audit_logs` - Append-only action trail
//! - `checkout` - The `create_guest_order` stored-function call
//!
//! Repositories translate between rows and the domain types in
//! `crate::models`; all queries are parameterized. Migrations live in
//! `crates/api/migrations/` and run via:
//!
//! ```bash
//! cargo run -p orchard-cli -- migrate
//! ```

pub mod addresses;
pub mod audit_logs;
pub mod categories;
pub mod checkout;
pub mod order_items;
pub mod orders;
pub mod payments;
pub mod products;
pub mod users;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub use addresses::AddressRepository;
pub use audit_logs::AuditLogRepository;
pub use categories::CategoryRepository;
pub use checkout::CheckoutRepository;
pub use order_items::OrderItemRepository;
pub use orders::OrderRepository;
pub use payments::PaymentRepository;
pub use products::ProductRepository;
pub use users::UserRepository;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., unique email, guarded stock decrement).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
