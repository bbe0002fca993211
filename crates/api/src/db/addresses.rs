//! Address repository.
//!
//! `set_default` is the one multi-statement operation here: the unset/set
//! pair runs inside a single transaction so no interleaving can leave a user
//! with two defaults.

use sqlx::PgPool;

use orchard_core::{AddressId, UserId};

use super::RepositoryError;
use crate::models::Address;

#[derive(Debug, sqlx::FromRow)]
struct AddressRow {
    id: i32,
    user_id: i32,
    street: String,
    city: String,
    state: Option<String>,
    country: String,
    zip_code: String,
    is_default: bool,
}

impl From<AddressRow> for Address {
    fn from(row: AddressRow) -> Self {
        Self {
            id: AddressId::new(row.id),
            user_id: UserId::new(row.user_id),
            street: row.street,
            city: row.city,
            state: row.state,
            country: row.country,
            zip_code: row.zip_code,
            is_default: row.is_default,
        }
    }
}

/// Fields accepted when creating or updating an address.
#[derive(Debug, Clone)]
pub struct NewAddress<'a> {
    pub street: &'a str,
    pub city: &'a str,
    pub state: Option<&'a str>,
    pub country: &'a str,
    pub zip_code: &'a str,
    pub is_default: bool,
}

/// Repository for address database operations.
pub struct AddressRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> AddressRepository<'a> {
    /// Create a new address repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get an address by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: AddressId) -> Result<Option<Address>, RepositoryError> {
        let row = sqlx::query_as::<_, AddressRow>(
            "SELECT id, user_id, street, city, state, country, zip_code, is_default
             FROM addresses WHERE id = $1",
        )
        .bind(id.as_i32())
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    /// List a user's addresses, default first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_by_user(&self, user_id: UserId) -> Result<Vec<Address>, RepositoryError> {
        let rows = sqlx::query_as::<_, AddressRow>(
            "SELECT id, user_id, street, city, state, country, zip_code, is_default
             FROM addresses
             WHERE user_id = $1
             ORDER BY is_default DESC, id DESC",
        )
        .bind(user_id.as_i32())
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Count a user's addresses.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count_by_user(&self, user_id: UserId) -> Result<i64, RepositoryError> {
        let count =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM addresses WHERE user_id = $1")
                .bind(user_id.as_i32())
                .fetch_one(self.pool)
                .await?;

        Ok(count)
    }

    /// Insert a new address for a user.
    ///
    /// If the new address is flagged default, the user's other defaults are
    /// cleared in the same transaction.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if any statement fails.
    pub async fn create(
        &self,
        user_id: UserId,
        address: &NewAddress<'_>,
    ) -> Result<Address, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        if address.is_default {
            sqlx::query("UPDATE addresses SET is_default = FALSE WHERE user_id = $1")
                .bind(user_id.as_i32())
                .execute(&mut *tx)
                .await?;
        }

        let row = sqlx::query_as::<_, AddressRow>(
            "INSERT INTO addresses (user_id, street, city, state, country, zip_code, is_default)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING id, user_id, street, city, state, country, zip_code, is_default",
        )
        .bind(user_id.as_i32())
        .bind(address.street)
        .bind(address.city)
        .bind(address.state)
        .bind(address.country)
        .bind(address.zip_code)
        .bind(address.is_default)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(row.into())
    }

    /// Update an address's fields.
    ///
    /// If the update flags the address default, the user's other defaults
    /// are cleared in the same transaction.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the address doesn't exist and
    /// `RepositoryError::Database` for other database errors.
    pub async fn update(
        &self,
        id: AddressId,
        user_id: UserId,
        address: &NewAddress<'_>,
    ) -> Result<(), RepositoryError> {
        let mut tx = self.pool.begin().await?;

        if address.is_default {
            sqlx::query("UPDATE addresses SET is_default = FALSE WHERE user_id = $1 AND id <> $2")
                .bind(user_id.as_i32())
                .bind(id.as_i32())
                .execute(&mut *tx)
                .await?;
        }

        let result = sqlx::query(
            "UPDATE addresses
             SET street = $1, city = $2, state = $3, country = $4, zip_code = $5, is_default = $6
             WHERE id = $7 AND user_id = $8",
        )
        .bind(address.street)
        .bind(address.city)
        .bind(address.state)
        .bind(address.country)
        .bind(address.zip_code)
        .bind(address.is_default)
        .bind(id.as_i32())
        .bind(user_id.as_i32())
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }

    /// Make one address the user's default.
    ///
    /// Two UPDATEs in one transaction: clear every default the user has,
    /// then set the target, guarded by ownership in the WHERE clause.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the address doesn't exist for
    /// this user and `RepositoryError::Database` for other database errors.
    pub async fn set_default(&self, id: AddressId, user_id: UserId) -> Result<(), RepositoryError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("UPDATE addresses SET is_default = FALSE WHERE user_id = $1")
            .bind(user_id.as_i32())
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query(
            "UPDATE addresses SET is_default = TRUE WHERE id = $1 AND user_id = $2",
        )
        .bind(id.as_i32())
        .bind(user_id.as_i32())
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }

    /// Delete an address.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the address doesn't exist and
    /// `RepositoryError::Database` for other database errors.
    pub async fn delete(&self, id: AddressId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM addresses WHERE id = $1")
            .bind(id.as_i32())
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
