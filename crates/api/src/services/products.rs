//! Product catalog service.

use rust_decimal::Decimal;
use sqlx::PgPool;

use orchard_core::{CategoryId, ProductId};

use crate::db::audit_logs::AuditLogRepository;
use crate::db::products::ProductRepository;
use crate::models::{Product, ProductSummary};

use super::ServiceError;

/// Fields accepted when creating or updating a product.
#[derive(Debug, Clone)]
pub struct ProductInput<'a> {
    pub name: &'a str,
    pub description: Option<&'a str>,
    pub price: Decimal,
    pub stock: i32,
    pub category_id: Option<CategoryId>,
    pub image_url: Option<&'a str>,
}

impl ProductInput<'_> {
    fn validate(&self) -> Result<&str, ServiceError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ServiceError::Validation("name is required".to_owned()));
        }
        if self.price < Decimal::ZERO {
            return Err(ServiceError::Validation(
                "price cannot be negative".to_owned(),
            ));
        }
        if self.stock < 0 {
            return Err(ServiceError::Validation(
                "stock cannot be negative".to_owned(),
            ));
        }
        Ok(name)
    }
}

/// Product catalog service.
pub struct ProductService<'a> {
    products: ProductRepository<'a>,
    audit: AuditLogRepository<'a>,
}

impl<'a> ProductService<'a> {
    /// Create a new product service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            products: ProductRepository::new(pool),
            audit: AuditLogRepository::new(pool),
        }
    }

    /// List the catalog with category names.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Repository` on query failure.
    pub async fn list(&self) -> Result<Vec<ProductSummary>, ServiceError> {
        Ok(self.products.list_all().await?)
    }

    /// List products in one category.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Repository` on query failure.
    pub async fn list_by_category(
        &self,
        category_id: CategoryId,
    ) -> Result<Vec<ProductSummary>, ServiceError> {
        Ok(self.products.list_by_category(category_id).await?)
    }

    /// Search products by name or description.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Validation` on an empty term.
    pub async fn search(&self, term: &str) -> Result<Vec<ProductSummary>, ServiceError> {
        let term = term.trim();
        if term.is_empty() {
            return Err(ServiceError::Validation(
                "search term is required".to_owned(),
            ));
        }

        Ok(self.products.search(term).await?)
    }

    /// Get a product by ID.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::NotFound` if no such product exists.
    pub async fn get(&self, id: ProductId) -> Result<Product, ServiceError> {
        self.products
            .get_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::NotFound("product not found".to_owned()))
    }

    /// Create a product.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Validation` on bad input and
    /// `ServiceError::Conflict` on an unknown category.
    pub async fn create(&self, input: &ProductInput<'_>) -> Result<Product, ServiceError> {
        let name = input.validate()?;

        let product = self
            .products
            .create(
                name,
                input.description,
                input.price,
                input.stock,
                input.category_id,
                input.image_url,
            )
            .await?;

        self.audit
            .add(
                "Product Created",
                Some(&format!("product {} created (id {})", product.name, product.id)),
            )
            .await?;

        Ok(product)
    }

    /// Update a product's fields.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Validation` on bad input,
    /// `ServiceError::NotFound` for a missing product, and
    /// `ServiceError::Conflict` on an unknown category.
    pub async fn update(
        &self,
        id: ProductId,
        input: &ProductInput<'_>,
    ) -> Result<Product, ServiceError> {
        let name = input.validate()?;

        self.products
            .update(
                id,
                name,
                input.description,
                input.price,
                input.stock,
                input.category_id,
                input.image_url,
            )
            .await?;

        self.audit
            .add(
                "Product Updated",
                Some(&format!("product {name} updated (id {id})")),
            )
            .await?;

        self.get(id).await
    }

    /// Set the absolute stock level.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Validation` on negative stock and
    /// `ServiceError::NotFound` for a missing product.
    pub async fn set_stock(&self, id: ProductId, stock: i32) -> Result<(), ServiceError> {
        if stock < 0 {
            return Err(ServiceError::Validation(
                "stock cannot be negative".to_owned(),
            ));
        }

        self.products.set_stock(id, stock).await?;

        self.audit
            .add(
                "Product Stock Updated",
                Some(&format!("product {id} stock set to {stock}")),
            )
            .await?;

        Ok(())
    }

    /// Delete a product.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::NotFound` for a missing product and
    /// `ServiceError::Conflict` while order items reference it.
    pub async fn delete(&self, id: ProductId) -> Result<(), ServiceError> {
        let product = self.get(id).await?;

        self.products.delete(id).await?;

        self.audit
            .add(
                "Product Deleted",
                Some(&format!("product {} deleted (id {})", product.name, product.id)),
            )
            .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(name: &str, price: Decimal, stock: i32) -> ProductInput<'_> {
        ProductInput {
            name,
            description: None,
            price,
            stock,
            category_id: None,
            image_url: None,
        }
    }

    #[test]
    fn empty_name_is_rejected() {
        let err = input("   ", Decimal::ONE, 1).validate().unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }

    #[test]
    fn negative_price_is_rejected() {
        let err = input("Tea", Decimal::NEGATIVE_ONE, 1).validate().unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }

    #[test]
    fn negative_stock_is_rejected() {
        let err = input("Tea", Decimal::ONE, -1).validate().unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }

    #[test]
    fn valid_input_passes_with_trimmed_name() {
        let padded = input(" Tea ", Decimal::ZERO, 0);
        let name = padded.validate().unwrap();
        assert_eq!(name, "Tea");
    }
}
