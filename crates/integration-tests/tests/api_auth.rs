//! Registration, login, and token-protected endpoints.

use orchard_integration_tests::{api_base_url, client, unique_email};
use reqwest::StatusCode;
use serde_json::json;

const PASSWORD: &str = "correct horse battery";

/// Register a fresh account and return its bearer token.
async fn register(email: &str) -> String {
    let response = client()
        .post(format!("{}/api/auth/register", api_base_url()))
        .json(&json!({
            "email": email,
            "username": "integration-tester",
            "password": PASSWORD,
        }))
        .send()
        .await
        .expect("Failed to reach API");

    assert_eq!(response.status(), StatusCode::CREATED);

    let body: serde_json::Value = response.json().await.expect("Invalid JSON");
    body["token"]
        .as_str()
        .expect("Missing token in response")
        .to_string()
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn register_then_login_returns_token() {
    let email = unique_email("auth-flow");
    register(&email).await;

    let response = client()
        .post(format!("{}/api/auth/login", api_base_url()))
        .json(&json!({ "email": email, "password": PASSWORD }))
        .send()
        .await
        .expect("Failed to reach API");

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Invalid JSON");
    assert!(body["token"].as_str().is_some_and(|t| !t.is_empty()));
    assert_eq!(body["user"]["email"], email);
    assert_eq!(body["user"]["role"], "customer");
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn login_with_wrong_password_is_rejected() {
    let email = unique_email("bad-password");
    register(&email).await;

    let response = client()
        .post(format!("{}/api/auth/login", api_base_url()))
        .json(&json!({ "email": email, "password": "not-the-password" }))
        .send()
        .await
        .expect("Failed to reach API");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn register_rejects_short_password() {
    let response = client()
        .post(format!("{}/api/auth/register", api_base_url()))
        .json(&json!({
            "email": unique_email("short-pw"),
            "username": "integration-tester",
            "password": "abc",
        }))
        .send()
        .await
        .expect("Failed to reach API");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn duplicate_registration_conflicts() {
    let email = unique_email("duplicate");
    register(&email).await;

    let response = client()
        .post(format!("{}/api/auth/register", api_base_url()))
        .json(&json!({
            "email": email,
            "username": "integration-tester",
            "password": PASSWORD,
        }))
        .send()
        .await
        .expect("Failed to reach API");

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn me_requires_bearer_token() {
    let response = client()
        .get(format!("{}/api/users/me", api_base_url()))
        .send()
        .await
        .expect("Failed to reach API");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn me_returns_current_user() {
    let email = unique_email("whoami");
    let token = register(&email).await;

    let response = client()
        .get(format!("{}/api/users/me", api_base_url()))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to reach API");

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Invalid JSON");
    assert_eq!(body["email"], email);
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn customer_cannot_list_users() {
    let token = register(&unique_email("not-admin")).await;

    let response = client()
        .get(format!("{}/api/users", api_base_url()))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to reach API");

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
