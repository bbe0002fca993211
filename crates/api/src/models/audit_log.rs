//! Audit log domain type.

use chrono::{DateTime, Utc};
use serde::Serialize;

use orchard_core::AuditLogId;

/// An append-only record of an administrative or customer action.
#[derive(Debug, Clone, Serialize)]
pub struct AuditLogEntry {
    pub id: AuditLogId,
    /// Short action label, e.g. "Order Status Updated".
    pub action: String,
    /// Free-text details.
    pub details: Option<String>,
    pub created_at: DateTime<Utc>,
}
