//! Milestone — a tracked checkpoint within a project.
//!
//! Milestones are written by the planning module, which is outside this
//! core. Here they are read-only: the reward-ownership resolver walks them
//! to collect reward references.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Milestone {
  pub milestone_id: Uuid,
  pub project_id:   Uuid,
  pub name:         String,
  /// Reward claimed when this milestone completes, if any.
  pub reward_id:    Option<Uuid>,
  pub completed:    bool,
  pub created_at:   DateTime<Utc>,
}
