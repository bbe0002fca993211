//! User management routes (admin) plus the self-profile view.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
};
use serde::Deserialize;

use orchard_core::{Role, UserId};

use crate::error::Result;
use crate::middleware::{CurrentUser, RequireAdmin};
use crate::models::User;
use crate::services::UserService;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users", get(list))
        .route("/users/me", get(me))
        .route("/users/lookup", get(lookup))
        .route("/users/{id}", get(get_one).put(update).delete(remove))
}

async fn list(State(state): State<AppState>, _admin: RequireAdmin) -> Result<Json<Vec<User>>> {
    let users = UserService::new(state.pool()).list().await?;
    Ok(Json(users))
}

async fn me(State(state): State<AppState>, user: CurrentUser) -> Result<Json<User>> {
    let user = UserService::new(state.pool()).get(user.user_id).await?;
    Ok(Json(user))
}

#[derive(Debug, Deserialize)]
struct LookupQuery {
    email: String,
}

async fn lookup(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Query(query): Query<LookupQuery>,
) -> Result<Json<User>> {
    let user = UserService::new(state.pool()).get_by_email(&query.email).await?;
    Ok(Json(user))
}

async fn get_one(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Path(id): Path<UserId>,
) -> Result<Json<User>> {
    let user = UserService::new(state.pool()).get(id).await?;
    Ok(Json(user))
}

#[derive(Debug, Deserialize)]
struct UpdateUserRequest {
    username: Option<String>,
    email: String,
    role: Role,
}

async fn update(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Path(id): Path<UserId>,
    Json(req): Json<UpdateUserRequest>,
) -> Result<Json<User>> {
    let user = UserService::new(state.pool())
        .update(id, req.username.as_deref(), &req.email, req.role)
        .await?;
    Ok(Json(user))
}

async fn remove(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Path(id): Path<UserId>,
) -> Result<StatusCode> {
    UserService::new(state.pool()).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
