//! Project — the top-level container a user organises work under.
//!
//! A project may link a reward (claimed when the project completes) and
//! carries free-form JSON blobs for resources and schedule; the core never
//! interprets those blobs, it only stores and returns them.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::Error;

/// The maximum number of projects a single user may own at once.
pub const PROJECT_LIMIT: usize = 6;

/// Coarse progress state of a project, distinct from the `active` flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
  #[default]
  NotStarted,
  InProgress,
  Completed,
  OnHold,
}

impl ProjectStatus {
  /// The discriminant string stored in the `status` column.
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::NotStarted => "not_started",
      Self::InProgress => "in_progress",
      Self::Completed => "completed",
      Self::OnHold => "on_hold",
    }
  }

  pub fn parse(s: &str) -> Result<Self, Error> {
    match s {
      "not_started" => Ok(Self::NotStarted),
      "in_progress" => Ok(Self::InProgress),
      "completed" => Ok(Self::Completed),
      "on_hold" => Ok(Self::OnHold),
      other => Err(Error::UnknownProjectStatus(other.to_owned())),
    }
  }
}

/// A user-owned project. Updated by replacing the whole record; the owning
/// user id and creation timestamp never change after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
  pub project_id: Uuid,
  pub user_id:    Uuid,
  pub name:       String,
  pub description: Option<String>,
  pub purpose:     Option<String>,
  pub budget:      Option<f64>,
  pub final_date:  Option<NaiveDate>,
  /// Free-form JSON; owned by the exposure layer, opaque here.
  pub resources:   Option<serde_json::Value>,
  pub schedule:    Option<serde_json::Value>,
  /// Reward claimed when this project completes, if any.
  pub reward_id:   Option<Uuid>,
  pub active:      bool,
  pub status:      ProjectStatus,
  /// Server-assigned timestamp; never changes after creation.
  pub created_at:  DateTime<Utc>,
}

/// Input to [`crate::store::ProjectStore::create_project`].
/// `project_id` and `created_at` are always set by the store.
#[derive(Debug, Clone)]
pub struct NewProject {
  pub user_id:     Uuid,
  pub name:        String,
  pub description: Option<String>,
  pub purpose:     Option<String>,
  pub budget:      Option<f64>,
  pub final_date:  Option<NaiveDate>,
  pub resources:   Option<serde_json::Value>,
  pub schedule:    Option<serde_json::Value>,
  pub reward_id:   Option<Uuid>,
  pub status:      ProjectStatus,
}

impl NewProject {
  /// Convenience constructor with all optional fields unset.
  pub fn new(user_id: Uuid, name: impl Into<String>) -> Self {
    Self {
      user_id,
      name: name.into(),
      description: None,
      purpose: None,
      budget: None,
      final_date: None,
      resources: None,
      schedule: None,
      reward_id: None,
      status: ProjectStatus::default(),
    }
  }
}
