//! Error type for `stride-store-sqlite`.

use chrono::NaiveDate;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] stride_core::Error),

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),

  #[error("uuid parse error: {0}")]
  Uuid(#[from] uuid::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  /// The UNIQUE (user, day, sprint) index rejected a second daily entry.
  #[error("entry already exists for user {user_id} on {day} in sprint {sprint_id}")]
  DuplicateEntry {
    user_id:   Uuid,
    day:       NaiveDate,
    sprint_id: Uuid,
  },

  /// The UNIQUE (user, badge) constraint rejected a second award.
  #[error("user {user_id} already has badge {badge_id}")]
  AlreadyAwarded { user_id: Uuid, badge_id: Uuid },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
