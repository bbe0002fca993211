//! Liveness and readiness probes.

use orchard_integration_tests::{api_base_url, client};
use reqwest::StatusCode;

#[tokio::test]
#[ignore = "Requires running API server"]
async fn health_returns_ok() {
    let response = client()
        .get(format!("{}/health", api_base_url()))
        .send()
        .await
        .expect("Failed to reach API");

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Invalid JSON");
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn readiness_checks_database() {
    let response = client()
        .get(format!("{}/health/ready", api_base_url()))
        .send()
        .await
        .expect("Failed to reach API");

    assert_eq!(response.status(), StatusCode::OK);
}
