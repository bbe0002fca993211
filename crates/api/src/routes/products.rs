//! Product catalog routes. Reads are public; writes are admin-only.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, put},
};
use rust_decimal::Decimal;
use serde::Deserialize;

use orchard_core::{CategoryId, ProductId};

use crate::error::Result;
use crate::middleware::RequireAdmin;
use crate::models::{Product, ProductSummary};
use crate::services::ProductService;
use crate::services::products::ProductInput;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/products", get(list).post(create))
        .route("/products/search", get(search))
        .route("/products/category/{category_id}", get(list_by_category))
        .route("/products/{id}", get(get_one).put(update).delete(remove))
        .route("/products/{id}/stock", put(set_stock))
}

async fn list(State(state): State<AppState>) -> Result<Json<Vec<ProductSummary>>> {
    let products = ProductService::new(state.pool()).list().await?;
    Ok(Json(products))
}

#[derive(Debug, Deserialize)]
struct SearchQuery {
    q: String,
}

async fn search(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<ProductSummary>>> {
    let products = ProductService::new(state.pool()).search(&query.q).await?;
    Ok(Json(products))
}

async fn list_by_category(
    State(state): State<AppState>,
    Path(category_id): Path<CategoryId>,
) -> Result<Json<Vec<ProductSummary>>> {
    let products = ProductService::new(state.pool())
        .list_by_category(category_id)
        .await?;
    Ok(Json(products))
}

async fn get_one(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<Json<Product>> {
    let product = ProductService::new(state.pool()).get(id).await?;
    Ok(Json(product))
}

#[derive(Debug, Deserialize)]
struct ProductRequest {
    name: String,
    description: Option<String>,
    price: Decimal,
    stock: i32,
    category_id: Option<CategoryId>,
    image_url: Option<String>,
}

impl ProductRequest {
    fn as_input(&self) -> ProductInput<'_> {
        ProductInput {
            name: &self.name,
            description: self.description.as_deref(),
            price: self.price,
            stock: self.stock,
            category_id: self.category_id,
            image_url: self.image_url.as_deref(),
        }
    }
}

async fn create(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Json(req): Json<ProductRequest>,
) -> Result<(StatusCode, Json<Product>)> {
    let product = ProductService::new(state.pool()).create(&req.as_input()).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

async fn update(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Path(id): Path<ProductId>,
    Json(req): Json<ProductRequest>,
) -> Result<Json<Product>> {
    let product = ProductService::new(state.pool())
        .update(id, &req.as_input())
        .await?;
    Ok(Json(product))
}

#[derive(Debug, Deserialize)]
struct StockRequest {
    stock: i32,
}

async fn set_stock(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Path(id): Path<ProductId>,
    Json(req): Json<StockRequest>,
) -> Result<StatusCode> {
    ProductService::new(state.pool()).set_stock(id, req.stock).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn remove(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Path(id): Path<ProductId>,
) -> Result<StatusCode> {
    ProductService::new(state.pool()).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
