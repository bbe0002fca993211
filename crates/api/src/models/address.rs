//! Address domain type.

use serde::Serialize;

use orchard_core::{AddressId, UserId};

/// A shipping/billing address owned by a user.
///
/// At most one address per user carries `is_default`; the swap is done in a
/// single database transaction (see `db::addresses::set_default`).
#[derive(Debug, Clone, Serialize)]
pub struct Address {
    /// Unique address ID.
    pub id: AddressId,
    /// Owning user.
    pub user_id: UserId,
    pub street: String,
    pub city: String,
    /// State/province (optional).
    pub state: Option<String>,
    pub country: String,
    pub zip_code: String,
    /// Whether this is the user's default address.
    pub is_default: bool,
}

impl Address {
    /// Single-line rendering used in admin order summaries.
    #[must_use]
    pub fn full_address(&self) -> String {
        let mut parts = vec![self.street.as_str(), self.city.as_str()];
        if let Some(state) = self.state.as_deref()
            && !state.is_empty()
        {
            parts.push(state);
        }
        parts.push(self.country.as_str());
        parts.push(self.zip_code.as_str());
        parts.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(state: Option<&str>) -> Address {
        Address {
            id: AddressId::new(1),
            user_id: UserId::new(1),
            street: "1 Main St".to_owned(),
            city: "Springfield".to_owned(),
            state: state.map(str::to_owned),
            country: "USA".to_owned(),
            zip_code: "12345".to_owned(),
            is_default: true,
        }
    }

    #[test]
    fn test_full_address_with_state() {
        assert_eq!(
            sample(Some("IL")).full_address(),
            "1 Main St, Springfield, IL, USA, 12345"
        );
    }

    #[test]
    fn test_full_address_skips_empty_state() {
        assert_eq!(
            sample(None).full_address(),
            "1 Main St, Springfield, USA, 12345"
        );
        assert_eq!(
            sample(Some("")).full_address(),
            "1 Main St, Springfield, USA, 12345"
        );
    }
}
