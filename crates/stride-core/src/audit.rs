//! Audit log records — strictly append-only.
//!
//! Once written, a record is never updated or deleted through the modeled
//! interface. Reads return most-recent-first.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An immutable record of a state-changing action.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditLog {
  pub log_id:      Uuid,
  /// The user that performed the action.
  pub actor_id:    Uuid,
  /// Verb, e.g. `"project.create"` or `"entry.delete"`.
  pub action:      String,
  pub entity_type: String,
  pub entity_id:   Uuid,
  /// JSON snapshot of the entity before the action, if it existed.
  pub before:      Option<serde_json::Value>,
  /// JSON snapshot after the action, if it still exists.
  pub after:       Option<serde_json::Value>,
  /// Server-assigned timestamp; never changes after creation.
  pub recorded_at: DateTime<Utc>,
}

/// Input to [`crate::store::AuditLogStore::record_audit`].
/// `recorded_at` is always set by the store.
#[derive(Debug, Clone)]
pub struct NewAuditLog {
  pub actor_id:    Uuid,
  pub action:      String,
  pub entity_type: String,
  pub entity_id:   Uuid,
  pub before:      Option<serde_json::Value>,
  pub after:       Option<serde_json::Value>,
}
