//! Integration tests for Orchard.
//!
//! # Running Tests
//!
//! ```bash
//! # Start the database and apply migrations
//! cargo run -p orchard-cli -- migrate
//!
//! # Start the API
//! cargo run -p orchard-api
//!
//! # Run the live tests
//! cargo test -p orchard-integration-tests -- --ignored
//! ```
//!
//! Tests that need a running server and database are `#[ignore]`-gated;
//! everything else runs in a plain `cargo test`.

use reqwest::Client;

/// Base URL for the API (configurable via environment).
#[must_use]
pub fn api_base_url() -> String {
    std::env::var("ORCHARD_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

/// Build an HTTP client for talking to the API.
///
/// # Panics
///
/// Panics if the client cannot be constructed; acceptable in test setup.
#[must_use]
pub fn client() -> Client {
    Client::builder()
        .build()
        .expect("Failed to create HTTP client")
}

/// A unique email per test run so reruns don't collide on unique columns.
#[must_use]
pub fn unique_email(prefix: &str) -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default();
    format!("{prefix}-{nanos}@example.com")
}

/// Register a fresh customer account and return its bearer token.
///
/// # Panics
///
/// Panics if registration fails; acceptable in test setup.
pub async fn register_customer(client: &Client, prefix: &str) -> String {
    let response = client
        .post(format!("{}/api/auth/register", api_base_url()))
        .json(&serde_json::json!({
            "email": unique_email(prefix),
            "username": format!("{prefix}-tester"),
            "password": "correct horse battery",
        }))
        .send()
        .await
        .expect("Failed to reach API");

    assert_eq!(response.status().as_u16(), 201, "registration failed");

    let body: serde_json::Value = response.json().await.expect("Invalid JSON");
    body["token"]
        .as_str()
        .expect("Missing token in response")
        .to_string()
}

/// Log in as the admin account and return its bearer token.
///
/// Expects an admin bootstrapped via `cargo run -p orchard-cli -- admin
/// create`; credentials come from `ORCHARD_ADMIN_EMAIL` /
/// `ORCHARD_ADMIN_PASSWORD` (defaults `admin@example.com` /
/// `admin-password`).
///
/// # Panics
///
/// Panics if the login fails; acceptable in test setup.
pub async fn admin_token(client: &Client) -> String {
    let email = std::env::var("ORCHARD_ADMIN_EMAIL")
        .unwrap_or_else(|_| "admin@example.com".to_string());
    let password =
        std::env::var("ORCHARD_ADMIN_PASSWORD").unwrap_or_else(|_| "admin-password".to_string());

    let response = client
        .post(format!("{}/api/auth/login", api_base_url()))
        .json(&serde_json::json!({ "email": email, "password": password }))
        .send()
        .await
        .expect("Failed to reach API");

    assert_eq!(response.status().as_u16(), 200, "admin login failed");

    let body: serde_json::Value = response.json().await.expect("Invalid JSON");
    body["token"]
        .as_str()
        .expect("Missing token in response")
        .to_string()
}
