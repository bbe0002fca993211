//! Address service.
//!
//! All operations are scoped to the owning user; admins may act on any
//! user's addresses. Not-found and not-owner are distinct failures.

use sqlx::PgPool;

use orchard_core::{AddressId, UserId};

use crate::db::addresses::{AddressRepository, NewAddress};
use crate::models::Address;

use super::{Requester, ServiceError};

/// Address service.
pub struct AddressService<'a> {
    addresses: AddressRepository<'a>,
}

impl<'a> AddressService<'a> {
    /// Create a new address service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            addresses: AddressRepository::new(pool),
        }
    }

    /// List a user's addresses, default first.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Forbidden` if the requester is neither the
    /// owner nor an admin.
    pub async fn list(
        &self,
        requester: Requester,
        user_id: UserId,
    ) -> Result<Vec<Address>, ServiceError> {
        if !requester.can_access(user_id) {
            return Err(ServiceError::Forbidden(
                "cannot view another user's addresses".to_owned(),
            ));
        }

        Ok(self.addresses.list_by_user(user_id).await?)
    }

    /// Get one address, with ownership verified.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::NotFound` for a missing address and
    /// `ServiceError::Forbidden` when it belongs to someone else.
    pub async fn get(&self, requester: Requester, id: AddressId) -> Result<Address, ServiceError> {
        let address = self
            .addresses
            .get_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::NotFound("address not found".to_owned()))?;

        if !requester.can_access(address.user_id) {
            return Err(ServiceError::Forbidden(
                "address belongs to another user".to_owned(),
            ));
        }

        Ok(address)
    }

    /// Create an address for the requesting user.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Validation` when a required field is empty.
    pub async fn create(
        &self,
        requester: Requester,
        input: &NewAddress<'_>,
    ) -> Result<Address, ServiceError> {
        validate(input)?;

        Ok(self.addresses.create(requester.user_id, input).await?)
    }

    /// Update an address, with ownership verified.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::NotFound` / `ServiceError::Forbidden` on a
    /// missing or foreign address and `ServiceError::Validation` on empty
    /// required fields.
    pub async fn update(
        &self,
        requester: Requester,
        id: AddressId,
        input: &NewAddress<'_>,
    ) -> Result<Address, ServiceError> {
        validate(input)?;

        let address = self.get(requester, id).await?;
        self.addresses.update(id, address.user_id, input).await?;

        self.get(requester, id).await
    }

    /// Make one address the user's default.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::NotFound` / `ServiceError::Forbidden` on a
    /// missing or foreign address.
    pub async fn set_default(
        &self,
        requester: Requester,
        id: AddressId,
    ) -> Result<(), ServiceError> {
        let address = self.get(requester, id).await?;
        self.addresses.set_default(id, address.user_id).await?;

        Ok(())
    }

    /// Delete an address. A user's last address cannot be deleted.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::NotFound` / `ServiceError::Forbidden` on a
    /// missing or foreign address and `ServiceError::Conflict` for the last
    /// remaining one.
    pub async fn delete(&self, requester: Requester, id: AddressId) -> Result<(), ServiceError> {
        let address = self.get(requester, id).await?;

        if self.addresses.count_by_user(address.user_id).await? <= 1 {
            return Err(ServiceError::Conflict(
                "cannot delete the only address".to_owned(),
            ));
        }

        self.addresses.delete(id).await?;

        Ok(())
    }
}

fn validate(input: &NewAddress<'_>) -> Result<(), ServiceError> {
    for (field, value) in [
        ("street", input.street),
        ("city", input.city),
        ("country", input.country),
        ("zip_code", input.zip_code),
    ] {
        if value.trim().is_empty() {
            return Err(ServiceError::Validation(format!("{field} is required")));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_required_field_is_rejected() {
        let input = NewAddress {
            street: "1 Main St",
            city: "  ",
            state: None,
            country: "US",
            zip_code: "12345",
            is_default: false,
        };

        let err = validate(&input).unwrap_err();
        assert!(matches!(err, ServiceError::Validation(m) if m == "city is required"));
    }

    #[test]
    fn optional_state_may_be_absent() {
        let input = NewAddress {
            street: "1 Main St",
            city: "Springfield",
            state: None,
            country: "US",
            zip_code: "12345",
            is_default: true,
        };

        assert!(validate(&input).is_ok());
    }
}
