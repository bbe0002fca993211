//! Audit log repository.
//!
//! Append-only: rows are inserted and read, never updated or deleted.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use orchard_core::AuditLogId;

use super::RepositoryError;
use crate::models::AuditLogEntry;

#[derive(Debug, sqlx::FromRow)]
struct AuditLogRow {
    id: i32,
    action: String,
    details: Option<String>,
    created_at: DateTime<Utc>,
}

impl From<AuditLogRow> for AuditLogEntry {
    fn from(row: AuditLogRow) -> Self {
        Self {
            id: AuditLogId::new(row.id),
            action: row.action,
            details: row.details,
            created_at: row.created_at,
        }
    }
}

/// Repository for audit log database operations.
pub struct AuditLogRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> AuditLogRepository<'a> {
    /// Create a new audit log repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Append an audit entry.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn add(
        &self,
        action: &str,
        details: Option<&str>,
    ) -> Result<AuditLogEntry, RepositoryError> {
        let row = sqlx::query_as::<_, AuditLogRow>(
            "INSERT INTO audit_logs (action, details)
             VALUES ($1, $2)
             RETURNING id, action, details, created_at",
        )
        .bind(action)
        .bind(details)
        .fetch_one(self.pool)
        .await?;

        Ok(row.into())
    }

    /// List every audit entry, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_all(&self) -> Result<Vec<AuditLogEntry>, RepositoryError> {
        let rows = sqlx::query_as::<_, AuditLogRow>(
            "SELECT id, action, details, created_at
             FROM audit_logs
             ORDER BY created_at DESC, id DESC",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// List the most recent `count` entries.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_recent(&self, count: i64) -> Result<Vec<AuditLogEntry>, RepositoryError> {
        let rows = sqlx::query_as::<_, AuditLogRow>(
            "SELECT id, action, details, created_at
             FROM audit_logs
             ORDER BY created_at DESC, id DESC
             LIMIT $1",
        )
        .bind(count)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// List entries with an exact action label, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_by_action(&self, action: &str) -> Result<Vec<AuditLogEntry>, RepositoryError> {
        let rows = sqlx::query_as::<_, AuditLogRow>(
            "SELECT id, action, details, created_at
             FROM audit_logs
             WHERE action = $1
             ORDER BY created_at DESC, id DESC",
        )
        .bind(action)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}
