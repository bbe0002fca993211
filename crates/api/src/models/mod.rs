//! Domain types.
//!
//! These are validated in-memory records, separate from the database row
//! types that live inside the repository modules. They serialize directly
//! as API response bodies.

pub mod address;
pub mod audit_log;
pub mod category;
pub mod order;
pub mod payment;
pub mod product;
pub mod user;

pub use address::Address;
pub use audit_log::AuditLogEntry;
pub use category::Category;
pub use order::{FullOrderDetails, Order, OrderItem, OrderSummary};
pub use payment::Payment;
pub use product::{Product, ProductSummary};
pub use user::User;
