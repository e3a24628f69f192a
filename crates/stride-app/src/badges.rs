//! Badge use cases: catalog reads and awarding.

use stride_core::{
  badge::{Badge, UserBadge},
  store::BadgeStore,
};
use uuid::Uuid;

use crate::error::{Error, Result};

/// Award a catalog badge to a user.
///
/// An unknown badge is `NotFound`; a badge the user already earned is
/// `Conflict`. The (user, badge) pair is also UNIQUE at the storage layer.
pub async fn award_badge<S>(
  store: &S,
  user_id: Uuid,
  badge_id: Uuid,
) -> Result<UserBadge>
where
  S: BadgeStore,
{
  store
    .get_badge(badge_id)
    .await
    .map_err(|e| Error::Store(Box::new(e)))?
    .ok_or_else(|| Error::NotFound(format!("badge {badge_id} not found")))?;

  let existing = store
    .find_user_badge(user_id, badge_id)
    .await
    .map_err(|e| Error::Store(Box::new(e)))?;
  if existing.is_some() {
    return Err(Error::Conflict(format!(
      "user {user_id} already earned badge {badge_id}"
    )));
  }

  let earned = store
    .award_badge(user_id, badge_id)
    .await
    .map_err(|e| Error::Store(Box::new(e)))?;

  tracing::info!(%user_id, %badge_id, "badge awarded");
  Ok(earned)
}

/// The full badge catalog.
pub async fn list_badges<S>(store: &S) -> Result<Vec<Badge>>
where
  S: BadgeStore,
{
  store
    .list_badges()
    .await
    .map_err(|e| Error::Store(Box::new(e)))
}

/// All badges earned by `user_id`, most recent first.
pub async fn list_user_badges<S>(
  store: &S,
  user_id: Uuid,
) -> Result<Vec<UserBadge>>
where
  S: BadgeStore,
{
  store
    .list_user_badges(user_id)
    .await
    .map_err(|e| Error::Store(Box::new(e)))
}
