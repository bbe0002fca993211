//! Audit trail service.

use sqlx::PgPool;

use crate::db::audit_logs::AuditLogRepository;
use crate::models::AuditLogEntry;

use super::ServiceError;

/// Default number of entries returned by the recent-entries view.
const DEFAULT_RECENT: i64 = 50;

/// Upper bound on the recent-entries view.
const MAX_RECENT: i64 = 500;

/// Audit trail service.
pub struct AuditService<'a> {
    audit: AuditLogRepository<'a>,
}

impl<'a> AuditService<'a> {
    /// Create a new audit service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            audit: AuditLogRepository::new(pool),
        }
    }

    /// Append an entry to the trail.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Validation` on an empty action and
    /// `ServiceError::Repository` on insert failure.
    pub async fn log_action(
        &self,
        action: &str,
        details: Option<&str>,
    ) -> Result<AuditLogEntry, ServiceError> {
        let action = action.trim();
        if action.is_empty() {
            return Err(ServiceError::Validation("action is required".to_owned()));
        }

        Ok(self.audit.add(action, details).await?)
    }

    /// List every entry, newest first.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Repository` on query failure.
    pub async fn list_all(&self) -> Result<Vec<AuditLogEntry>, ServiceError> {
        Ok(self.audit.list_all().await?)
    }

    /// List the most recent entries. `count` defaults to 50 and is clamped
    /// to 500; non-positive values fall back to the default.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Repository` on query failure.
    pub async fn recent(&self, count: Option<i64>) -> Result<Vec<AuditLogEntry>, ServiceError> {
        let count = match count {
            Some(n) if n > 0 => n.min(MAX_RECENT),
            _ => DEFAULT_RECENT,
        };

        Ok(self.audit.list_recent(count).await?)
    }

    /// List entries with an exact action label.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Validation` on an empty action and
    /// `ServiceError::Repository` on query failure.
    pub async fn list_by_action(&self, action: &str) -> Result<Vec<AuditLogEntry>, ServiceError> {
        let action = action.trim();
        if action.is_empty() {
            return Err(ServiceError::Validation("action is required".to_owned()));
        }

        Ok(self.audit.list_by_action(action).await?)
    }
}
