//! Daily entries — stand-up style records scoped to a sprint.
//!
//! At most one entry exists per (user, calendar day, sprint). The day is a
//! local calendar day (midnight-to-midnight), not a timestamp comparison,
//! and is stored alongside the exact creation instant.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::Error;

/// How hard the day's work felt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
  Low,
  Medium,
  High,
}

impl Difficulty {
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Low => "low",
      Self::Medium => "medium",
      Self::High => "high",
    }
  }

  pub fn parse(s: &str) -> Result<Self, Error> {
    match s {
      "low" => Ok(Self::Low),
      "medium" => Ok(Self::Medium),
      "high" => Ok(Self::High),
      other => Err(Error::UnknownDifficulty(other.to_owned())),
    }
  }
}

/// Self-reported energy trend over the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnergyChange {
  Increased,
  Stable,
  Decreased,
}

impl EnergyChange {
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Increased => "increased",
      Self::Stable => "stable",
      Self::Decreased => "decreased",
    }
  }

  pub fn parse(s: &str) -> Result<Self, Error> {
    match s {
      "increased" => Ok(Self::Increased),
      "stable" => Ok(Self::Stable),
      "decreased" => Ok(Self::Decreased),
      other => Err(Error::UnknownEnergyChange(other.to_owned())),
    }
  }
}

/// One stand-up record. Updated by replacing the whole record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyEntry {
  pub entry_id:   Uuid,
  pub user_id:    Uuid,
  pub task_id:    Option<Uuid>,
  pub sprint_id:  Uuid,
  /// The local calendar day this entry covers.
  pub entry_date: NaiveDate,
  /// What got done.
  pub accomplished: String,
  /// What comes next.
  pub planned:      String,
  pub difficulty:   Difficulty,
  pub energy:       EnergyChange,
  /// Server-assigned timestamp; never changes after creation.
  pub created_at:   DateTime<Utc>,
}

/// Input to [`crate::store::DailyEntryStore::create_entry`].
/// `entry_id`, `entry_date`, and `created_at` are assigned at creation time,
/// not accepted from callers.
#[derive(Debug, Clone)]
pub struct NewDailyEntry {
  pub user_id:      Uuid,
  pub task_id:      Option<Uuid>,
  pub sprint_id:    Uuid,
  pub accomplished: String,
  pub planned:      String,
  pub difficulty:   Difficulty,
  pub energy:       EnergyChange,
}
