//! Address book rules: the single-default invariant and the last-address
//! guard.

use orchard_integration_tests::{api_base_url, client, register_customer};
use reqwest::{Client, StatusCode};
use serde_json::json;

async fn create_address(client: &Client, token: &str, street: &str, is_default: bool) -> i64 {
    let response = client
        .post(format!("{}/api/addresses", api_base_url()))
        .bearer_auth(token)
        .json(&json!({
            "street": street,
            "city": "Portland",
            "state": "OR",
            "country": "US",
            "zip_code": "97201",
            "is_default": is_default,
        }))
        .send()
        .await
        .expect("Failed to reach API");

    assert_eq!(response.status(), StatusCode::CREATED);

    let address: serde_json::Value = response.json().await.expect("Invalid JSON");
    address["id"].as_i64().expect("Missing address id")
}

async fn list_addresses(client: &Client, token: &str) -> Vec<serde_json::Value> {
    let response = client
        .get(format!("{}/api/addresses", api_base_url()))
        .bearer_auth(token)
        .send()
        .await
        .expect("Failed to reach API");

    assert_eq!(response.status(), StatusCode::OK);
    response.json().await.expect("Invalid JSON")
}

fn default_ids(addresses: &[serde_json::Value]) -> Vec<i64> {
    addresses
        .iter()
        .filter(|a| a["is_default"] == json!(true))
        .filter_map(|a| a["id"].as_i64())
        .collect()
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn at_most_one_default_after_any_sequence() {
    let client = client();
    let token = register_customer(&client, "default-swap").await;

    let first = create_address(&client, &token, "1 First St", true).await;
    let second = create_address(&client, &token, "2 Second St", true).await;
    create_address(&client, &token, "3 Third St", false).await;

    // Creating a second default must have displaced the first.
    assert_eq!(default_ids(&list_addresses(&client, &token).await), vec![second]);

    let response = client
        .put(format!("{}/api/addresses/{first}/default", api_base_url()))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to reach API");
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    assert_eq!(default_ids(&list_addresses(&client, &token).await), vec![first]);
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn deleting_only_address_conflicts() {
    let client = client();
    let token = register_customer(&client, "last-address").await;

    let only = create_address(&client, &token, "1 Lonely Ln", true).await;

    let response = client
        .delete(format!("{}/api/addresses/{only}", api_base_url()))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to reach API");

    assert_eq!(response.status(), StatusCode::CONFLICT);

    // Still there.
    assert_eq!(list_addresses(&client, &token).await.len(), 1);
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn second_address_can_be_deleted() {
    let client = client();
    let token = register_customer(&client, "two-addresses").await;

    create_address(&client, &token, "1 Keep St", true).await;
    let spare = create_address(&client, &token, "2 Spare St", false).await;

    let response = client
        .delete(format!("{}/api/addresses/{spare}", api_base_url()))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to reach API");

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert_eq!(list_addresses(&client, &token).await.len(), 1);
}
