//! Repository traits — one per aggregate.
//!
//! The traits are implemented by storage backends (e.g.
//! `stride-store-sqlite`). The use-case layer (`stride-app`) depends on
//! these abstractions, not on any concrete backend. A single backend type
//! normally implements all of them.
//!
//! All methods return `Send` futures so the traits can be used in
//! multi-threaded async runtimes.

use std::future::Future;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::{
  audit::{AuditLog, NewAuditLog},
  badge::{Badge, NewBadge, UserBadge},
  entry::{DailyEntry, NewDailyEntry},
  metrics::{MetricsEvent, NewMetricsEvent},
  milestone::Milestone,
  project::{NewProject, Project},
  reward::{NewReward, Reward},
};

// ─── Projects ────────────────────────────────────────────────────────────────

pub trait ProjectStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Create and persist a new project. The id and `created_at` are set by
  /// the store.
  fn create_project(
    &self,
    input: NewProject,
  ) -> impl Future<Output = Result<Project, Self::Error>> + Send + '_;

  /// Retrieve a project by id. Returns `None` if not found.
  fn get_project(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Project>, Self::Error>> + Send + '_;

  /// All projects owned by a user, most recent first.
  fn list_projects(
    &self,
    user_id: Uuid,
  ) -> impl Future<Output = Result<Vec<Project>, Self::Error>> + Send + '_;

  /// How many projects the user currently owns.
  fn count_projects(
    &self,
    user_id: Uuid,
  ) -> impl Future<Output = Result<usize, Self::Error>> + Send + '_;

  /// Replace the stored record wholesale. Returns `false` if no project
  /// with that id exists.
  fn update_project(
    &self,
    project: Project,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  /// Hard delete. Returns `false` if no project with that id exists.
  fn delete_project(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;
}

// ─── Daily entries ───────────────────────────────────────────────────────────

pub trait DailyEntryStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Create and persist a new entry covering `day`. The id and `created_at`
  /// are set by the store.
  fn create_entry(
    &self,
    day: NaiveDate,
    input: NewDailyEntry,
  ) -> impl Future<Output = Result<DailyEntry, Self::Error>> + Send + '_;

  /// Retrieve an entry by id. Returns `None` if not found.
  fn get_entry(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<DailyEntry>, Self::Error>> + Send + '_;

  /// The single entry for (user, day, sprint), if one exists.
  fn find_entry_for_day(
    &self,
    user_id: Uuid,
    day: NaiveDate,
    sprint_id: Uuid,
  ) -> impl Future<Output = Result<Option<DailyEntry>, Self::Error>> + Send + '_;

  /// All entries by a user, most recent first.
  fn list_entries(
    &self,
    user_id: Uuid,
  ) -> impl Future<Output = Result<Vec<DailyEntry>, Self::Error>> + Send + '_;

  /// Replace the stored record wholesale. Returns `false` if no entry with
  /// that id exists.
  fn update_entry(
    &self,
    entry: DailyEntry,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  /// Hard delete. Returns `false` if no entry with that id exists.
  fn delete_entry(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;
}

// ─── Rewards ─────────────────────────────────────────────────────────────────

pub trait RewardStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  fn create_reward(
    &self,
    input: NewReward,
  ) -> impl Future<Output = Result<Reward, Self::Error>> + Send + '_;

  /// Retrieve a reward by id. Returns `None` if not found.
  fn get_reward(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Reward>, Self::Error>> + Send + '_;

  /// Batched lookup. Ids with no matching row are silently absent from the
  /// result; order follows creation time, most recent first.
  fn get_rewards<'a>(
    &'a self,
    ids: &'a [Uuid],
  ) -> impl Future<Output = Result<Vec<Reward>, Self::Error>> + Send + 'a;
}

// ─── Milestones (read-only collaborator) ─────────────────────────────────────

/// Milestones are owned by the planning module; this core only reads them
/// while resolving reward ownership.
pub trait MilestoneStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  fn list_milestones(
    &self,
    project_id: Uuid,
  ) -> impl Future<Output = Result<Vec<Milestone>, Self::Error>> + Send + '_;
}

// ─── Badges ──────────────────────────────────────────────────────────────────

pub trait BadgeStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Add a badge to the catalog (seeding path).
  fn create_badge(
    &self,
    input: NewBadge,
  ) -> impl Future<Output = Result<Badge, Self::Error>> + Send + '_;

  fn get_badge(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Badge>, Self::Error>> + Send + '_;

  /// The full catalog, oldest first.
  fn list_badges(
    &self,
  ) -> impl Future<Output = Result<Vec<Badge>, Self::Error>> + Send + '_;

  /// Record that a user earned a badge. `earned_at` is set by the store.
  /// Fails on a duplicate (user, badge) pair.
  fn award_badge(
    &self,
    user_id: Uuid,
    badge_id: Uuid,
  ) -> impl Future<Output = Result<UserBadge, Self::Error>> + Send + '_;

  /// The join record for (user, badge), if the badge was earned.
  fn find_user_badge(
    &self,
    user_id: Uuid,
    badge_id: Uuid,
  ) -> impl Future<Output = Result<Option<UserBadge>, Self::Error>> + Send + '_;

  /// All badges earned by a user, most recent first.
  fn list_user_badges(
    &self,
    user_id: Uuid,
  ) -> impl Future<Output = Result<Vec<UserBadge>, Self::Error>> + Send + '_;
}

// ─── Audit log ───────────────────────────────────────────────────────────────

/// Append-only. No update or delete method exists, deliberately.
pub trait AuditLogStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Record an audit entry. `recorded_at` is set by the store.
  fn record_audit(
    &self,
    input: NewAuditLog,
  ) -> impl Future<Output = Result<AuditLog, Self::Error>> + Send + '_;

  /// Entries where the given user was the actor, most recent first.
  fn audit_by_user(
    &self,
    actor_id: Uuid,
    limit: Option<usize>,
  ) -> impl Future<Output = Result<Vec<AuditLog>, Self::Error>> + Send + '_;

  /// Entries touching a specific entity, most recent first.
  fn audit_by_entity<'a>(
    &'a self,
    entity_type: &'a str,
    entity_id: Uuid,
    limit: Option<usize>,
  ) -> impl Future<Output = Result<Vec<AuditLog>, Self::Error>> + Send + 'a;
}

// ─── Metrics events ──────────────────────────────────────────────────────────

/// Append-only. No update or delete method exists, deliberately.
pub trait MetricsStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Record a metrics event. `recorded_at` is set by the store.
  fn record_event(
    &self,
    input: NewMetricsEvent,
  ) -> impl Future<Output = Result<MetricsEvent, Self::Error>> + Send + '_;

  /// Events of a given type, most recent first.
  fn events_by_type<'a>(
    &'a self,
    event_type: &'a str,
    limit: Option<usize>,
  ) -> impl Future<Output = Result<Vec<MetricsEvent>, Self::Error>> + Send + 'a;

  /// Events attributed to a user, most recent first.
  fn events_by_user(
    &self,
    user_id: Uuid,
    limit: Option<usize>,
  ) -> impl Future<Output = Result<Vec<MetricsEvent>, Self::Error>> + Send + '_;
}
