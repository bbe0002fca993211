//! Order routes: placement, views, lifecycle transitions.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
};
use serde::Deserialize;

use orchard_core::{AddressId, OrderId, OrderStatus, ProductId};

use crate::error::Result;
use crate::middleware::{CurrentUser, RequireAdmin};
use crate::models::{FullOrderDetails, Order, OrderItem, OrderSummary};
use crate::services::OrderService;
use crate::services::orders::OrderLine;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/orders", get(list_own).post(create))
        .route("/orders/all", get(list_all))
        .route("/orders/{id}", get(get_one))
        .route("/orders/{id}/details", get(details))
        .route("/orders/{id}/items", get(items))
        .route("/orders/{id}/status", put(update_status))
        .route("/orders/{id}/cancel", post(cancel))
}

#[derive(Debug, Deserialize)]
struct OrderLineRequest {
    product_id: ProductId,
    quantity: i32,
}

#[derive(Debug, Deserialize)]
struct CreateOrderRequest {
    address_id: Option<AddressId>,
    items: Vec<OrderLineRequest>,
}

async fn create(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(req): Json<CreateOrderRequest>,
) -> Result<(StatusCode, Json<Order>)> {
    let lines: Vec<OrderLine> = req
        .items
        .iter()
        .map(|item| OrderLine {
            product_id: item.product_id,
            quantity: item.quantity,
        })
        .collect();

    let order = OrderService::new(state.pool())
        .create(user.requester(), req.address_id, &lines)
        .await?;
    Ok((StatusCode::CREATED, Json(order)))
}

async fn list_own(State(state): State<AppState>, user: CurrentUser) -> Result<Json<Vec<Order>>> {
    let orders = OrderService::new(state.pool())
        .list(user.requester(), user.user_id)
        .await?;
    Ok(Json(orders))
}

async fn list_all(
    State(state): State<AppState>,
    _admin: RequireAdmin,
) -> Result<Json<Vec<OrderSummary>>> {
    let orders = OrderService::new(state.pool()).list_all_summaries().await?;
    Ok(Json(orders))
}

async fn get_one(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<OrderId>,
) -> Result<Json<Order>> {
    let order = OrderService::new(state.pool())
        .get(user.requester(), id)
        .await?;
    Ok(Json(order))
}

async fn details(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<OrderId>,
) -> Result<Json<FullOrderDetails>> {
    let details = OrderService::new(state.pool())
        .details(user.requester(), id)
        .await?;
    Ok(Json(details))
}

async fn items(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Path(id): Path<OrderId>,
) -> Result<Json<Vec<OrderItem>>> {
    let items = OrderService::new(state.pool()).list_items(id).await?;
    Ok(Json(items))
}

#[derive(Debug, Deserialize)]
struct StatusRequest {
    status: OrderStatus,
}

async fn update_status(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Path(id): Path<OrderId>,
    Json(req): Json<StatusRequest>,
) -> Result<Json<Order>> {
    let order = OrderService::new(state.pool())
        .update_status(id, req.status)
        .await?;
    Ok(Json(order))
}

async fn cancel(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<OrderId>,
) -> Result<Json<Order>> {
    let order = OrderService::new(state.pool())
        .cancel(user.requester(), id)
        .await?;
    Ok(Json(order))
}
