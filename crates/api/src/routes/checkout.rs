//! Guest checkout route.

use axum::{Json, Router, extract::State, http::StatusCode, routing::post};

use crate::error::Result;
use crate::services::CheckoutService;
use crate::services::checkout::{GuestCheckout, GuestOrderConfirmation};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/checkout/guest", post(guest_checkout))
}

/// Anonymous single-call checkout: user, address, order, items, payment
/// in one atomic database operation.
async fn guest_checkout(
    State(state): State<AppState>,
    Json(req): Json<GuestCheckout>,
) -> Result<(StatusCode, Json<GuestOrderConfirmation>)> {
    let confirmation = CheckoutService::new(state.pool()).guest_checkout(&req).await?;
    Ok((StatusCode::CREATED, Json(confirmation)))
}
