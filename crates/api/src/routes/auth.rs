//! Registration, login, and guest-account activation.

use axum::{Json, Router, extract::State, http::StatusCode, routing::post};
use serde::{Deserialize, Serialize};

use orchard_core::UserId;

use crate::error::Result;
use crate::models::User;
use crate::services::AuthService;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/activate", post(activate))
}

#[derive(Debug, Deserialize)]
struct RegisterRequest {
    email: String,
    username: String,
    password: String,
}

#[derive(Debug, Deserialize)]
struct LoginRequest {
    email: String,
    password: String,
}

#[derive(Debug, Deserialize)]
struct ActivateRequest {
    user_id: UserId,
    username: String,
    password: String,
}

/// A user together with a freshly issued access token.
#[derive(Debug, Serialize)]
struct AuthResponse {
    user: User,
    token: String,
}

async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>)> {
    let auth = AuthService::new(state.pool());
    let user = auth.register(&req.email, &req.username, &req.password).await?;
    let token = state.tokens().issue(&user)?;

    Ok((StatusCode::CREATED, Json(AuthResponse { user, token })))
}

async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<AuthResponse>> {
    let auth = AuthService::new(state.pool());
    let user = auth.login(&req.email, &req.password).await?;
    let token = state.tokens().issue(&user)?;

    Ok(Json(AuthResponse { user, token }))
}

/// Promote a guest account from a prior guest checkout into a full
/// customer account. Anonymous by design: guests hold no credentials yet.
async fn activate(
    State(state): State<AppState>,
    Json(req): Json<ActivateRequest>,
) -> Result<Json<AuthResponse>> {
    let auth = AuthService::new(state.pool());
    let user = auth
        .activate_guest(req.user_id, &req.username, &req.password)
        .await?;
    let token = state.tokens().issue(&user)?;

    Ok(Json(AuthResponse { user, token }))
}
