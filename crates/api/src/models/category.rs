//! Category domain type.

use serde::Serialize;

use orchard_core::CategoryId;

/// A product category.
#[derive(Debug, Clone, Serialize)]
pub struct Category {
    /// Unique category ID.
    pub id: CategoryId,
    /// Unique category name.
    pub name: String,
    pub description: Option<String>,
}
