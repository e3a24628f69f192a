//! Rewards — claimable prizes linked from projects and milestones.
//!
//! A reward carries no owner field. Ownership is indirect: a user owns a
//! reward if one of their projects, or a milestone of one of their projects,
//! references it. That set is computed by traversal at query time, never
//! stored.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reward {
  pub reward_id:  Uuid,
  /// The sponsoring party, if the reward is externally funded.
  pub sponsor_id: Option<Uuid>,
  pub name:       String,
  pub description:        Option<String>,
  pub claim_instructions: Option<String>,
  pub claim_link:         Option<String>,
  pub created_at:         DateTime<Utc>,
}

/// Input to [`crate::store::RewardStore::create_reward`].
#[derive(Debug, Clone)]
pub struct NewReward {
  pub sponsor_id:         Option<Uuid>,
  pub name:               String,
  pub description:        Option<String>,
  pub claim_instructions: Option<String>,
  pub claim_link:         Option<String>,
}

impl NewReward {
  pub fn new(name: impl Into<String>) -> Self {
    Self {
      sponsor_id: None,
      name: name.into(),
      description: None,
      claim_instructions: None,
      claim_link: None,
    }
  }
}
