//! Encoding and decoding helpers between Rust domain types and the
//! plain-text representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings and calendar dates as ISO 8601
//! dates. JSON blobs are stored as compact JSON text. UUIDs are stored as
//! hyphenated lowercase strings.

use chrono::{DateTime, NaiveDate, Utc};
use stride_core::{
  audit::AuditLog,
  badge::{Badge, UserBadge},
  entry::{DailyEntry, Difficulty, EnergyChange},
  metrics::MetricsEvent,
  milestone::Milestone,
  project::{Project, ProjectStatus},
  reward::Reward,
};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ─────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

pub fn decode_uuid_opt(s: Option<&str>) -> Result<Option<Uuid>> {
  s.map(decode_uuid).transpose()
}

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── NaiveDate ───────────────────────────────────────────────────────────────

pub fn encode_date(d: NaiveDate) -> String { d.format("%Y-%m-%d").to_string() }

pub fn decode_date(s: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(s, "%Y-%m-%d")
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Opaque JSON blobs ───────────────────────────────────────────────────────

pub fn encode_json_opt(v: Option<&serde_json::Value>) -> Option<String> {
  v.map(serde_json::Value::to_string)
}

pub fn decode_json_opt(s: Option<&str>) -> Result<Option<serde_json::Value>> {
  Ok(s.map(serde_json::from_str).transpose()?)
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw values read directly from a `projects` row.
pub struct RawProject {
  pub project_id:  String,
  pub user_id:     String,
  pub name:        String,
  pub description: Option<String>,
  pub purpose:     Option<String>,
  pub budget:      Option<f64>,
  pub final_date:  Option<String>,
  pub resources:   Option<String>,
  pub schedule:    Option<String>,
  pub reward_id:   Option<String>,
  pub active:      bool,
  pub status:      String,
  pub created_at:  String,
}

impl RawProject {
  pub fn into_project(self) -> Result<Project> {
    Ok(Project {
      project_id:  decode_uuid(&self.project_id)?,
      user_id:     decode_uuid(&self.user_id)?,
      name:        self.name,
      description: self.description,
      purpose:     self.purpose,
      budget:      self.budget,
      final_date:  self.final_date.as_deref().map(decode_date).transpose()?,
      resources:   decode_json_opt(self.resources.as_deref())?,
      schedule:    decode_json_opt(self.schedule.as_deref())?,
      reward_id:   decode_uuid_opt(self.reward_id.as_deref())?,
      active:      self.active,
      status:      ProjectStatus::parse(&self.status).map_err(Error::Core)?,
      created_at:  decode_dt(&self.created_at)?,
    })
  }
}

/// Raw values read directly from a `daily_entries` row.
pub struct RawEntry {
  pub entry_id:     String,
  pub user_id:      String,
  pub task_id:      Option<String>,
  pub sprint_id:    String,
  pub entry_date:   String,
  pub accomplished: String,
  pub planned:      String,
  pub difficulty:   String,
  pub energy:       String,
  pub created_at:   String,
}

impl RawEntry {
  pub fn into_entry(self) -> Result<DailyEntry> {
    Ok(DailyEntry {
      entry_id:     decode_uuid(&self.entry_id)?,
      user_id:      decode_uuid(&self.user_id)?,
      task_id:      decode_uuid_opt(self.task_id.as_deref())?,
      sprint_id:    decode_uuid(&self.sprint_id)?,
      entry_date:   decode_date(&self.entry_date)?,
      accomplished: self.accomplished,
      planned:      self.planned,
      difficulty:   Difficulty::parse(&self.difficulty).map_err(Error::Core)?,
      energy:       EnergyChange::parse(&self.energy).map_err(Error::Core)?,
      created_at:   decode_dt(&self.created_at)?,
    })
  }
}

/// Raw values read directly from a `rewards` row.
pub struct RawReward {
  pub reward_id:          String,
  pub sponsor_id:         Option<String>,
  pub name:               String,
  pub description:        Option<String>,
  pub claim_instructions: Option<String>,
  pub claim_link:         Option<String>,
  pub created_at:         String,
}

impl RawReward {
  pub fn into_reward(self) -> Result<Reward> {
    Ok(Reward {
      reward_id:          decode_uuid(&self.reward_id)?,
      sponsor_id:         decode_uuid_opt(self.sponsor_id.as_deref())?,
      name:               self.name,
      description:        self.description,
      claim_instructions: self.claim_instructions,
      claim_link:         self.claim_link,
      created_at:         decode_dt(&self.created_at)?,
    })
  }
}

/// Raw values read directly from a `milestones` row.
pub struct RawMilestone {
  pub milestone_id: String,
  pub project_id:   String,
  pub name:         String,
  pub reward_id:    Option<String>,
  pub completed:    bool,
  pub created_at:   String,
}

impl RawMilestone {
  pub fn into_milestone(self) -> Result<Milestone> {
    Ok(Milestone {
      milestone_id: decode_uuid(&self.milestone_id)?,
      project_id:   decode_uuid(&self.project_id)?,
      name:         self.name,
      reward_id:    decode_uuid_opt(self.reward_id.as_deref())?,
      completed:    self.completed,
      created_at:   decode_dt(&self.created_at)?,
    })
  }
}

/// Raw values read directly from a `badges` row.
pub struct RawBadge {
  pub badge_id:    String,
  pub name:        String,
  pub description: Option<String>,
  pub icon:        Option<String>,
  pub created_at:  String,
}

impl RawBadge {
  pub fn into_badge(self) -> Result<Badge> {
    Ok(Badge {
      badge_id:    decode_uuid(&self.badge_id)?,
      name:        self.name,
      description: self.description,
      icon:        self.icon,
      created_at:  decode_dt(&self.created_at)?,
    })
  }
}

/// Raw values read directly from a `user_badges` row.
pub struct RawUserBadge {
  pub user_id:   String,
  pub badge_id:  String,
  pub earned_at: String,
}

impl RawUserBadge {
  pub fn into_user_badge(self) -> Result<UserBadge> {
    Ok(UserBadge {
      user_id:   decode_uuid(&self.user_id)?,
      badge_id:  decode_uuid(&self.badge_id)?,
      earned_at: decode_dt(&self.earned_at)?,
    })
  }
}

/// Raw values read directly from an `audit_logs` row.
pub struct RawAuditLog {
  pub log_id:      String,
  pub actor_id:    String,
  pub action:      String,
  pub entity_type: String,
  pub entity_id:   String,
  pub before_json: Option<String>,
  pub after_json:  Option<String>,
  pub recorded_at: String,
}

impl RawAuditLog {
  pub fn into_audit_log(self) -> Result<AuditLog> {
    Ok(AuditLog {
      log_id:      decode_uuid(&self.log_id)?,
      actor_id:    decode_uuid(&self.actor_id)?,
      action:      self.action,
      entity_type: self.entity_type,
      entity_id:   decode_uuid(&self.entity_id)?,
      before:      decode_json_opt(self.before_json.as_deref())?,
      after:       decode_json_opt(self.after_json.as_deref())?,
      recorded_at: decode_dt(&self.recorded_at)?,
    })
  }
}

/// Raw values read directly from a `metrics_events` row.
pub struct RawMetricsEvent {
  pub event_id:     String,
  pub user_id:      Option<String>,
  pub event_type:   String,
  pub payload_json: String,
  pub recorded_at:  String,
}

impl RawMetricsEvent {
  pub fn into_event(self) -> Result<MetricsEvent> {
    Ok(MetricsEvent {
      event_id:    decode_uuid(&self.event_id)?,
      user_id:     decode_uuid_opt(self.user_id.as_deref())?,
      event_type:  self.event_type,
      payload:     serde_json::from_str(&self.payload_json)?,
      recorded_at: decode_dt(&self.recorded_at)?,
    })
  }
}
