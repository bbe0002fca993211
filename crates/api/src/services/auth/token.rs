//! JWT issuance and verification.

use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use orchard_core::{Role, UserId};

use super::AuthError;
use crate::models::User;

/// Claims carried in every access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User ID.
    pub sub: i32,
    /// User email at issuance time.
    pub email: String,
    /// Role at issuance time.
    pub role: Role,
    /// Issued-at, seconds since epoch.
    pub iat: i64,
    /// Expiry, seconds since epoch.
    pub exp: i64,
}

impl Claims {
    /// The subject as a typed user ID.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        UserId::new(self.sub)
    }

    /// Whether the token was issued to an admin.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Stateless HS256 token service.
///
/// Built once at startup from the configured secret and shared via
/// application state.
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl TokenService {
    /// Create a token service from the shared secret and token lifetime.
    #[must_use]
    pub fn new(secret: &SecretString, ttl_minutes: i64) -> Self {
        let bytes = secret.expose_secret().as_bytes();
        Self {
            encoding: EncodingKey::from_secret(bytes),
            decoding: DecodingKey::from_secret(bytes),
            validation: Validation::new(Algorithm::HS256),
            ttl: Duration::minutes(ttl_minutes),
        }
    }

    /// Issue an access token for a user.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Token` if signing fails.
    pub fn issue(&self, user: &User) -> Result<String, AuthError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user.id.as_i32(),
            email: user.email.as_str().to_owned(),
            role: user.role,
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };

        let token = jsonwebtoken::encode(&Header::default(), &claims, &self.encoding)?;
        Ok(token)
    }

    /// Verify a token and return its claims.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Token` on a bad signature, malformed token, or
    /// expiry.
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        let data = jsonwebtoken::decode::<Claims>(token, &self.decoding, &self.validation)?;
        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use orchard_core::{Email, Role, UserId};

    use super::*;

    fn secret() -> SecretString {
        SecretString::from("an-entirely-test-only-secret-of-decent-length")
    }

    fn user(role: Role) -> User {
        User {
            id: UserId::new(42),
            username: Some("casey".to_owned()),
            email: Email::parse("casey@example.com").unwrap(),
            role,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn issued_token_verifies_with_same_secret() {
        let tokens = TokenService::new(&secret(), 60);
        let token = tokens.issue(&user(Role::Customer)).unwrap();

        let claims = tokens.verify(&token).unwrap();
        assert_eq!(claims.sub, 42);
        assert_eq!(claims.email, "casey@example.com");
        assert_eq!(claims.role, Role::Customer);
        assert!(!claims.is_admin());
        assert_eq!(claims.user_id(), UserId::new(42));
    }

    #[test]
    fn admin_claims_report_admin() {
        let tokens = TokenService::new(&secret(), 60);
        let token = tokens.issue(&user(Role::Admin)).unwrap();

        let claims = tokens.verify(&token).unwrap();
        assert!(claims.is_admin());
    }

    #[test]
    fn verification_rejects_wrong_secret() {
        let tokens = TokenService::new(&secret(), 60);
        let other = TokenService::new(
            &SecretString::from("a-completely-different-secret-also-long-enough"),
            60,
        );

        let token = tokens.issue(&user(Role::Customer)).unwrap();
        assert!(other.verify(&token).is_err());
    }

    #[test]
    fn verification_rejects_garbage() {
        let tokens = TokenService::new(&secret(), 60);
        assert!(tokens.verify("not.a.token").is_err());
    }
}
