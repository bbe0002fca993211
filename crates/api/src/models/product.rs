//! Product domain types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use orchard_core::{CategoryId, ProductId};

/// A product as stored.
#[derive(Debug, Clone, Serialize)]
pub struct Product {
    /// Unique product ID.
    pub id: ProductId,
    pub name: String,
    pub description: Option<String>,
    /// Unit price (non-negative).
    pub price: Decimal,
    /// Units in stock (non-negative).
    pub stock: i32,
    /// Owning category, if any (set-null on category delete).
    pub category_id: Option<CategoryId>,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Catalog listing row: a product joined with its category name.
///
/// Produced by the list/search/by-category queries so clients do not need a
/// second lookup for the category label.
#[derive(Debug, Clone, Serialize)]
pub struct ProductSummary {
    pub id: ProductId,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub stock: i32,
    pub category_name: Option<String>,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}
