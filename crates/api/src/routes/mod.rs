//! HTTP route handlers.
//!
//! Resource routes live under `/api/...`; `/health` and `/health/ready`
//! sit at the root for the platform's probes.

pub mod addresses;
pub mod audit_logs;
pub mod auth;
pub mod categories;
pub mod checkout;
pub mod orders;
pub mod payments;
pub mod products;
pub mod users;

use axum::{Json, Router, extract::State, http::StatusCode, routing::get};
use serde_json::json;

use crate::state::AppState;

/// Build the full application router.
pub fn router(state: AppState) -> Router {
    let api = Router::new()
        .merge(auth::router())
        .merge(users::router())
        .merge(products::router())
        .merge(categories::router())
        .merge(addresses::router())
        .merge(orders::router())
        .merge(payments::router())
        .merge(checkout::router())
        .merge(audit_logs::router());

    Router::new()
        .nest("/api", api)
        .route("/health", get(health))
        .route("/health/ready", get(ready))
        .with_state(state)
}

/// Liveness probe.
async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

/// Readiness probe: verifies the database answers.
async fn ready(State(state): State<AppState>) -> StatusCode {
    match sqlx::query_scalar::<_, i32>("SELECT 1")
        .fetch_one(state.pool())
        .await
    {
        Ok(_) => StatusCode::OK,
        Err(e) => {
            tracing::error!(error = %e, "Readiness check failed");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}
