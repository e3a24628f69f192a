//! Metrics events — strictly append-only, like the audit log.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An immutable product-analytics event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsEvent {
  pub event_id:   Uuid,
  /// Absent for anonymous or system-generated events.
  pub user_id:    Option<Uuid>,
  /// Discriminant, e.g. `"entry.created"` or `"reward.claimed"`.
  pub event_type: String,
  pub payload:    serde_json::Value,
  /// Server-assigned timestamp; never changes after creation.
  pub recorded_at: DateTime<Utc>,
}

/// Input to [`crate::store::MetricsStore::record_event`].
/// `recorded_at` is always set by the store.
#[derive(Debug, Clone)]
pub struct NewMetricsEvent {
  pub user_id:    Option<Uuid>,
  pub event_type: String,
  pub payload:    serde_json::Value,
}
