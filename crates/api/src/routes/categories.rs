//! Category routes. Reads are public; writes are admin-only.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};
use serde::Deserialize;

use orchard_core::CategoryId;

use crate::error::Result;
use crate::middleware::RequireAdmin;
use crate::models::Category;
use crate::services::CategoryService;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/categories", get(list).post(create))
        .route("/categories/{id}", get(get_one).put(update).delete(remove))
}

async fn list(State(state): State<AppState>) -> Result<Json<Vec<Category>>> {
    let categories = CategoryService::new(state.pool()).list().await?;
    Ok(Json(categories))
}

async fn get_one(
    State(state): State<AppState>,
    Path(id): Path<CategoryId>,
) -> Result<Json<Category>> {
    let category = CategoryService::new(state.pool()).get(id).await?;
    Ok(Json(category))
}

#[derive(Debug, Deserialize)]
struct CategoryRequest {
    name: String,
    description: Option<String>,
}

async fn create(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Json(req): Json<CategoryRequest>,
) -> Result<(StatusCode, Json<Category>)> {
    let category = CategoryService::new(state.pool())
        .create(&req.name, req.description.as_deref())
        .await?;
    Ok((StatusCode::CREATED, Json(category)))
}

async fn update(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Path(id): Path<CategoryId>,
    Json(req): Json<CategoryRequest>,
) -> Result<Json<Category>> {
    let category = CategoryService::new(state.pool())
        .update(id, &req.name, req.description.as_deref())
        .await?;
    Ok(Json(category))
}

async fn remove(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Path(id): Path<CategoryId>,
) -> Result<StatusCode> {
    CategoryService::new(state.pool()).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
