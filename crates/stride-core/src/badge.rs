//! Badge catalog and the user/badge join record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A catalog badge. The catalog is seeded once and read thereafter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Badge {
  pub badge_id:    Uuid,
  pub name:        String,
  pub description: Option<String>,
  /// Asset identifier resolved by the exposure layer.
  pub icon:        Option<String>,
  pub created_at:  DateTime<Utc>,
}

/// Input to [`crate::store::BadgeStore::create_badge`].
#[derive(Debug, Clone)]
pub struct NewBadge {
  pub name:        String,
  pub description: Option<String>,
  pub icon:        Option<String>,
}

/// Records that a user earned a badge. Unique per (user, badge).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserBadge {
  pub user_id:   Uuid,
  pub badge_id:  Uuid,
  pub earned_at: DateTime<Utc>,
}
