//! Address routes, scoped to the authenticated owner.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, put},
};
use serde::Deserialize;

use orchard_core::{AddressId, UserId};

use crate::db::addresses::NewAddress;
use crate::error::Result;
use crate::middleware::CurrentUser;
use crate::models::Address;
use crate::services::AddressService;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/addresses", get(list).post(create))
        .route("/addresses/{id}", get(get_one).put(update).delete(remove))
        .route("/addresses/{id}/default", put(set_default))
}

#[derive(Debug, Deserialize)]
struct ListQuery {
    /// Admin-only escape hatch for viewing another user's addresses.
    user_id: Option<UserId>,
}

async fn list(
    State(state): State<AppState>,
    user: CurrentUser,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Address>>> {
    let owner = query.user_id.unwrap_or(user.user_id);
    let addresses = AddressService::new(state.pool())
        .list(user.requester(), owner)
        .await?;
    Ok(Json(addresses))
}

async fn get_one(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<AddressId>,
) -> Result<Json<Address>> {
    let address = AddressService::new(state.pool())
        .get(user.requester(), id)
        .await?;
    Ok(Json(address))
}

#[derive(Debug, Deserialize)]
struct AddressRequest {
    street: String,
    city: String,
    state: Option<String>,
    country: String,
    zip_code: String,
    #[serde(default)]
    is_default: bool,
}

impl AddressRequest {
    fn as_input(&self) -> NewAddress<'_> {
        NewAddress {
            street: &self.street,
            city: &self.city,
            state: self.state.as_deref(),
            country: &self.country,
            zip_code: &self.zip_code,
            is_default: self.is_default,
        }
    }
}

async fn create(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(req): Json<AddressRequest>,
) -> Result<(StatusCode, Json<Address>)> {
    let address = AddressService::new(state.pool())
        .create(user.requester(), &req.as_input())
        .await?;
    Ok((StatusCode::CREATED, Json(address)))
}

async fn update(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<AddressId>,
    Json(req): Json<AddressRequest>,
) -> Result<Json<Address>> {
    let address = AddressService::new(state.pool())
        .update(user.requester(), id, &req.as_input())
        .await?;
    Ok(Json(address))
}

async fn set_default(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<AddressId>,
) -> Result<StatusCode> {
    AddressService::new(state.pool())
        .set_default(user.requester(), id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn remove(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<AddressId>,
) -> Result<StatusCode> {
    AddressService::new(state.pool())
        .delete(user.requester(), id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
