//! Audit-log use cases. Pure delegation; the records are append-only and
//! the caller decides who may read them.

use stride_core::{
  audit::{AuditLog, NewAuditLog},
  store::AuditLogStore,
};
use uuid::Uuid;

use crate::error::{Error, Result};

/// Append an audit record.
pub async fn record_audit<S>(store: &S, input: NewAuditLog) -> Result<AuditLog>
where
  S: AuditLogStore,
{
  let log = store
    .record_audit(input)
    .await
    .map_err(|e| Error::Store(Box::new(e)))?;

  tracing::debug!(log_id = %log.log_id, action = %log.action, "audit recorded");
  Ok(log)
}

/// Records where `actor_id` was the actor, most recent first.
pub async fn list_audit_by_user<S>(
  store: &S,
  actor_id: Uuid,
  limit: Option<usize>,
) -> Result<Vec<AuditLog>>
where
  S: AuditLogStore,
{
  store
    .audit_by_user(actor_id, limit)
    .await
    .map_err(|e| Error::Store(Box::new(e)))
}

/// Records touching one entity, most recent first.
pub async fn list_audit_by_entity<S>(
  store: &S,
  entity_type: &str,
  entity_id: Uuid,
  limit: Option<usize>,
) -> Result<Vec<AuditLog>>
where
  S: AuditLogStore,
{
  store
    .audit_by_entity(entity_type, entity_id, limit)
    .await
    .map_err(|e| Error::Store(Box::new(e)))
}
