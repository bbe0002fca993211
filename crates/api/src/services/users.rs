//! User management service (admin surface).
//!
//! Registration, login, and guest activation live in [`super::auth`]; this
//! service covers the administrative views and mutations.

use sqlx::PgPool;

use orchard_core::{Email, Role, UserId};

use crate::db::audit_logs::AuditLogRepository;
use crate::db::users::UserRepository;
use crate::models::User;

use super::ServiceError;

/// User management service.
pub struct UserService<'a> {
    users: UserRepository<'a>,
    audit: AuditLogRepository<'a>,
}

impl<'a> UserService<'a> {
    /// Create a new user service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            users: UserRepository::new(pool),
            audit: AuditLogRepository::new(pool),
        }
    }

    /// List every account, newest first.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Repository` on query failure.
    pub async fn list(&self) -> Result<Vec<User>, ServiceError> {
        Ok(self.users.list_all().await?)
    }

    /// Get an account by ID.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::NotFound` if no such user exists.
    pub async fn get(&self, id: UserId) -> Result<User, ServiceError> {
        self.users
            .get_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::NotFound("user not found".to_owned()))
    }

    /// Get an account by email.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Validation` on a malformed email and
    /// `ServiceError::NotFound` if no such user exists.
    pub async fn get_by_email(&self, email: &str) -> Result<User, ServiceError> {
        let email = Email::parse(email)
            .map_err(|e| ServiceError::Validation(format!("invalid email: {e}")))?;

        self.users
            .get_by_email(&email)
            .await?
            .ok_or_else(|| ServiceError::NotFound("user not found".to_owned()))
    }

    /// Update an account's username, email, and role.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Validation` on bad input,
    /// `ServiceError::NotFound` for a missing user, and
    /// `ServiceError::Conflict` on a uniqueness collision.
    pub async fn update(
        &self,
        id: UserId,
        username: Option<&str>,
        email: &str,
        role: Role,
    ) -> Result<User, ServiceError> {
        let email = Email::parse(email)
            .map_err(|e| ServiceError::Validation(format!("invalid email: {e}")))?;
        let username = username.map(str::trim).filter(|u| !u.is_empty());

        self.users.update(id, username, &email, role).await?;

        let user = self
            .users
            .get_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::NotFound("user not found".to_owned()))?;

        self.audit
            .add(
                "User Updated",
                Some(&format!("user {} updated (id {})", user.email, user.id)),
            )
            .await?;

        Ok(user)
    }

    /// Delete an account. Admin accounts are protected.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::NotFound` for a missing user and
    /// `ServiceError::Forbidden` for an admin-role target.
    pub async fn delete(&self, id: UserId) -> Result<(), ServiceError> {
        let user = self
            .users
            .get_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::NotFound("user not found".to_owned()))?;

        if user.is_admin() {
            return Err(ServiceError::Forbidden(
                "admin accounts cannot be deleted".to_owned(),
            ));
        }

        self.users.delete(id).await?;

        self.audit
            .add(
                "User Deleted",
                Some(&format!("user {} deleted (id {})", user.email, user.id)),
            )
            .await?;

        Ok(())
    }
}
