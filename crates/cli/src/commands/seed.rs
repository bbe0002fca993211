//! Catalog seeding for local development.

use rust_decimal::Decimal;
use secrecy::ExposeSecret;
use sqlx::PgPool;

use super::{CommandError, database_url};

/// Sample categories: (name, description).
const CATEGORIES: &[(&str, &str)] = &[
    ("Tea", "Loose-leaf and bagged teas"),
    ("Coffee", "Whole-bean and ground coffee"),
    ("Accessories", "Brewing gear and tableware"),
];

/// Sample products: (name, description, price cents, stock, category name).
const PRODUCTS: &[(&str, &str, i64, i32, &str)] = &[
    ("Sencha", "Japanese green tea, 100g", 1250, 40, "Tea"),
    ("Assam", "Malty black tea, 250g", 980, 60, "Tea"),
    ("Espresso Blend", "Dark roast, 1kg", 2190, 25, "Coffee"),
    ("Single Origin Ethiopia", "Light roast, 250g", 1490, 30, "Coffee"),
    ("Ceramic Teapot", "600ml with infuser", 3400, 12, "Accessories"),
    ("Hand Grinder", "Steel burr grinder", 5200, 8, "Accessories"),
];

/// Seed the database with sample categories and products.
///
/// Idempotent: existing rows with the same names are left alone.
///
/// # Errors
///
/// Returns `CommandError` on connection or query failure.
pub async fn run() -> Result<(), CommandError> {
    let url = database_url()?;
    let pool = PgPool::connect(url.expose_secret()).await?;

    for (name, description) in CATEGORIES {
        sqlx::query(
            "INSERT INTO categories (name, description)
             VALUES ($1, $2)
             ON CONFLICT (name) DO NOTHING",
        )
        .bind(name)
        .bind(description)
        .execute(&pool)
        .await?;
    }

    for (name, description, price_cents, stock, category) in PRODUCTS {
        sqlx::query(
            "INSERT INTO products (name, description, price, stock, category_id)
             SELECT $1, $2, $3, $4, c.id
             FROM categories c
             WHERE c.name = $5
               AND NOT EXISTS (SELECT 1 FROM products WHERE name = $1)",
        )
        .bind(name)
        .bind(description)
        .bind(Decimal::new(*price_cents, 2))
        .bind(stock)
        .bind(category)
        .execute(&pool)
        .await?;
    }

    tracing::info!(
        "Seeded {} categories and up to {} products",
        CATEGORIES.len(),
        PRODUCTS.len()
    );
    Ok(())
}
