//! Admin user management.

use argon2::{
    Argon2,
    password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
};
use secrecy::ExposeSecret;
use sqlx::PgPool;

use orchard_core::Email;

use super::{CommandError, database_url};

/// Minimum password length, matching the API's registration rule.
const MIN_PASSWORD_LENGTH: usize = 6;

/// Create an admin user, or promote/rehash an existing account with the
/// same email.
///
/// # Errors
///
/// Returns `CommandError::InvalidInput` on a bad email or short password
/// and `CommandError::Database` on connection or query failure.
pub async fn create_user(email: &str, username: &str, password: &str) -> Result<(), CommandError> {
    let email = Email::parse(email)
        .map_err(|e| CommandError::InvalidInput(format!("invalid email: {e}")))?;
    if username.trim().is_empty() {
        return Err(CommandError::InvalidInput("username is required".to_owned()));
    }
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(CommandError::InvalidInput(format!(
            "password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }

    let salt = SaltString::generate(&mut OsRng);
    let password_hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| CommandError::InvalidInput(format!("password hashing failed: {e}")))?
        .to_string();

    let url = database_url()?;
    let pool = PgPool::connect(url.expose_secret()).await?;

    let id = sqlx::query_scalar::<_, i32>(
        "INSERT INTO users (username, email, password_hash, role)
         VALUES ($1, $2, $3, 'admin')
         ON CONFLICT (email) DO UPDATE
         SET username = EXCLUDED.username,
             password_hash = EXCLUDED.password_hash,
             role = 'admin'
         RETURNING id",
    )
    .bind(username.trim())
    .bind(email.as_str())
    .bind(&password_hash)
    .fetch_one(&pool)
    .await?;

    tracing::info!("Admin user {} ready (id {})", email, id);
    Ok(())
}
