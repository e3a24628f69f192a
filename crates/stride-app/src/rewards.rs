//! Reward-ownership resolution.
//!
//! A reward has no owner column. A user owns a reward if one of their
//! projects references it, or if a milestone belonging to one of those
//! projects does. The reachable set is computed by traversal on every read
//! (one milestone query per project) rather than denormalized, so there is
//! no second source of truth to drift.

use std::collections::HashSet;

use stride_core::{
  reward::Reward,
  store::{MilestoneStore, ProjectStore, RewardStore},
};
use uuid::Uuid;

use crate::error::{Error, Result};

/// The de-duplicated set of reward ids reachable from a user's projects and
/// their milestones.
async fn owned_reward_ids<S>(store: &S, user_id: Uuid) -> Result<HashSet<Uuid>>
where
  S: ProjectStore + MilestoneStore,
{
  let projects = store
    .list_projects(user_id)
    .await
    .map_err(|e| Error::Store(Box::new(e)))?;

  let mut ids = HashSet::new();
  for project in &projects {
    if let Some(reward_id) = project.reward_id {
      ids.insert(reward_id);
    }

    let milestones = store
      .list_milestones(project.project_id)
      .await
      .map_err(|e| Error::Store(Box::new(e)))?;
    for milestone in milestones {
      if let Some(reward_id) = milestone.reward_id {
        ids.insert(reward_id);
      }
    }
  }

  Ok(ids)
}

/// Fetch one reward, as visible to `user_id`.
///
/// A reward outside the user's reachable set is `Forbidden` even if it
/// exists; a reachable reward whose row is gone is `NotFound`.
pub async fn get_reward<S>(
  store: &S,
  user_id: Uuid,
  reward_id: Uuid,
) -> Result<Reward>
where
  S: ProjectStore + MilestoneStore + RewardStore,
{
  let owned = owned_reward_ids(store, user_id).await?;

  if !owned.contains(&reward_id) {
    return Err(Error::Forbidden(format!(
      "reward {reward_id} is not referenced by any project or milestone of \
       user {user_id}"
    )));
  }

  store
    .get_reward(reward_id)
    .await
    .map_err(|e| Error::Store(Box::new(e)))?
    .ok_or_else(|| Error::NotFound(format!("reward {reward_id} not found")))
}

/// All rewards reachable from the user's projects and milestones, each
/// distinct reward exactly once. An empty set is an empty list, not an
/// error.
pub async fn list_rewards<S>(store: &S, user_id: Uuid) -> Result<Vec<Reward>>
where
  S: ProjectStore + MilestoneStore + RewardStore,
{
  let owned = owned_reward_ids(store, user_id).await?;
  if owned.is_empty() {
    return Ok(Vec::new());
  }

  let ids: Vec<Uuid> = owned.into_iter().collect();
  store
    .get_rewards(&ids)
    .await
    .map_err(|e| Error::Store(Box::new(e)))
}
