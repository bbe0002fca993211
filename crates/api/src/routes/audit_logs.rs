//! Audit trail routes (admin-only).

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use serde::Deserialize;

use crate::error::Result;
use crate::middleware::RequireAdmin;
use crate::models::AuditLogEntry;
use crate::services::AuditService;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/audit-logs", get(list))
        .route("/audit-logs/recent", get(recent))
}

#[derive(Debug, Deserialize)]
struct ListQuery {
    action: Option<String>,
}

async fn list(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<AuditLogEntry>>> {
    let audit = AuditService::new(state.pool());
    let entries = match query.action {
        Some(action) => audit.list_by_action(&action).await?,
        None => audit.list_all().await?,
    };
    Ok(Json(entries))
}

#[derive(Debug, Deserialize)]
struct RecentQuery {
    count: Option<i64>,
}

async fn recent(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Query(query): Query<RecentQuery>,
) -> Result<Json<Vec<AuditLogEntry>>> {
    let entries = AuditService::new(state.pool()).recent(query.count).await?;
    Ok(Json(entries))
}
