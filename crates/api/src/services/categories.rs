//! Category service.

use sqlx::PgPool;

use orchard_core::CategoryId;

use crate::db::audit_logs::AuditLogRepository;
use crate::db::categories::CategoryRepository;
use crate::models::Category;

use super::ServiceError;

/// Category service.
pub struct CategoryService<'a> {
    categories: CategoryRepository<'a>,
    audit: AuditLogRepository<'a>,
}

impl<'a> CategoryService<'a> {
    /// Create a new category service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            categories: CategoryRepository::new(pool),
            audit: AuditLogRepository::new(pool),
        }
    }

    /// List all categories by name.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Repository` on query failure.
    pub async fn list(&self) -> Result<Vec<Category>, ServiceError> {
        Ok(self.categories.list_all().await?)
    }

    /// Get a category by ID.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::NotFound` if no such category exists.
    pub async fn get(&self, id: CategoryId) -> Result<Category, ServiceError> {
        self.categories
            .get_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::NotFound("category not found".to_owned()))
    }

    /// Create a category.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Validation` on an empty name and
    /// `ServiceError::Conflict` on a duplicate name.
    pub async fn create(
        &self,
        name: &str,
        description: Option<&str>,
    ) -> Result<Category, ServiceError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ServiceError::Validation("name is required".to_owned()));
        }

        let category = self.categories.create(name, description).await?;

        self.audit
            .add(
                "Category Created",
                Some(&format!("category {} created (id {})", category.name, category.id)),
            )
            .await?;

        Ok(category)
    }

    /// Update a category.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Validation` on an empty name,
    /// `ServiceError::NotFound` for a missing category, and
    /// `ServiceError::Conflict` on a duplicate name.
    pub async fn update(
        &self,
        id: CategoryId,
        name: &str,
        description: Option<&str>,
    ) -> Result<Category, ServiceError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ServiceError::Validation("name is required".to_owned()));
        }

        self.categories.update(id, name, description).await?;

        self.audit
            .add(
                "Category Updated",
                Some(&format!("category {name} updated (id {id})")),
            )
            .await?;

        self.get(id).await
    }

    /// Delete a category. Blocked while products still reference it.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::NotFound` for a missing category and
    /// `ServiceError::Conflict` while products reference it.
    pub async fn delete(&self, id: CategoryId) -> Result<(), ServiceError> {
        let category = self.get(id).await?;

        if self.categories.has_products(id).await? {
            return Err(ServiceError::Conflict(
                "category has products and cannot be deleted".to_owned(),
            ));
        }

        self.categories.delete(id).await?;

        self.audit
            .add(
                "Category Deleted",
                Some(&format!("category {} deleted (id {})", category.name, category.id)),
            )
            .await?;

        Ok(())
    }
}
