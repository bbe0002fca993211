//! Payment routes, including the anonymous gateway webhook.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
};
use serde::Deserialize;

use orchard_core::{OrderId, PaymentId, PaymentMethod, PaymentStatus};

use crate::error::Result;
use crate::middleware::{CurrentUser, RequireAdmin};
use crate::models::Payment;
use crate::services::PaymentService;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/payments", get(list).post(create))
        .route("/payments/webhook", post(webhook))
        .route("/payments/order/{order_id}", get(get_by_order))
        .route("/payments/{id}", get(get_one))
        .route("/payments/{id}/status", put(update_status))
}

async fn list(State(state): State<AppState>, _admin: RequireAdmin) -> Result<Json<Vec<Payment>>> {
    let payments = PaymentService::new(state.pool()).list().await?;
    Ok(Json(payments))
}

async fn get_one(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Path(id): Path<PaymentId>,
) -> Result<Json<Payment>> {
    let payment = PaymentService::new(state.pool()).get(id).await?;
    Ok(Json(payment))
}

async fn get_by_order(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(order_id): Path<OrderId>,
) -> Result<Json<Payment>> {
    let payment = PaymentService::new(state.pool())
        .get_by_order(user.requester(), order_id)
        .await?;
    Ok(Json(payment))
}

#[derive(Debug, Deserialize)]
struct CreatePaymentRequest {
    order_id: OrderId,
    payment_method: PaymentMethod,
    status: Option<PaymentStatus>,
    transaction_id: Option<String>,
}

async fn create(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(req): Json<CreatePaymentRequest>,
) -> Result<(StatusCode, Json<Payment>)> {
    let payment = PaymentService::new(state.pool())
        .create(
            user.requester(),
            req.order_id,
            req.payment_method,
            req.status.unwrap_or(PaymentStatus::Pending),
            req.transaction_id.as_deref(),
        )
        .await?;
    Ok((StatusCode::CREATED, Json(payment)))
}

#[derive(Debug, Deserialize)]
struct UpdateStatusRequest {
    status: PaymentStatus,
    transaction_id: Option<String>,
}

async fn update_status(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Path(id): Path<PaymentId>,
    Json(req): Json<UpdateStatusRequest>,
) -> Result<Json<Payment>> {
    let payment = PaymentService::new(state.pool())
        .update_status(id, req.status, req.transaction_id.as_deref())
        .await?;
    Ok(Json(payment))
}

#[derive(Debug, Deserialize)]
struct WebhookRequest {
    order_id: OrderId,
    status: PaymentStatus,
    transaction_id: Option<String>,
}

/// Payment-gateway notification endpoint.
///
/// Deliberately anonymous so gateways can reach it, but it performs no
/// signature verification yet; do not expose it publicly before adding
/// gateway signature checks.
async fn webhook(
    State(state): State<AppState>,
    Json(req): Json<WebhookRequest>,
) -> Result<Json<Payment>> {
    let payment = PaymentService::new(state.pool())
        .handle_webhook(req.order_id, req.status, req.transaction_id.as_deref())
        .await?;
    Ok(Json(payment))
}
