use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::store::Store;

/// One line of the audit trail. `actor` is the staff user that triggered the
/// change, when the request carried one.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AuditEntry {
    pub id: Uuid,
    pub actor: Option<Uuid>,
    pub action: String,
    pub resource: Option<String>,
    pub metadata: Value,
    pub recorded_at: DateTime<Utc>,
}

pub fn log_audit(
    store: &Store,
    actor: Option<Uuid>,
    action: &str,
    resource: Option<&str>,
    metadata: Option<Value>,
) {
    store.audit_log.insert(AuditEntry {
        id: Uuid::new_v4(),
        actor,
        action: action.to_string(),
        resource: resource.map(str::to_string),
        metadata: metadata.unwrap_or(Value::Null),
        recorded_at: Utc::now(),
    });
}
