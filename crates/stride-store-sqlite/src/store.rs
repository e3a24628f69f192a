//! [`SqliteStore`] — the SQLite implementation of every repository trait.

use std::path::Path;

use chrono::{NaiveDate, Utc};
use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use stride_core::{
  audit::{AuditLog, NewAuditLog},
  badge::{Badge, NewBadge, UserBadge},
  entry::{DailyEntry, NewDailyEntry},
  metrics::{MetricsEvent, NewMetricsEvent},
  milestone::Milestone,
  project::{NewProject, Project},
  reward::{NewReward, Reward},
  store::{
    AuditLogStore, BadgeStore, DailyEntryStore, MetricsStore, MilestoneStore,
    ProjectStore, RewardStore,
  },
};

use crate::{
  Error, Result,
  encode::{
    RawAuditLog, RawBadge, RawEntry, RawMetricsEvent, RawMilestone, RawProject,
    RawReward, RawUserBadge, encode_date, encode_dt, encode_json_opt,
    encode_uuid,
  },
  schema::SCHEMA,
};

/// `true` if the error is a UNIQUE/PRIMARY KEY constraint violation.
fn unique_violation(err: &tokio_rusqlite::Error) -> bool {
  matches!(
    err,
    tokio_rusqlite::Error::Rusqlite(rusqlite::Error::SqliteFailure(e, _))
      if e.code == rusqlite::ErrorCode::ConstraintViolation
  )
}

/// SQLite `LIMIT -1` means unlimited.
fn limit_param(limit: Option<usize>) -> i64 {
  limit.map(|l| l as i64).unwrap_or(-1)
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Stride store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Insert a milestone row. Milestones are written by the planning module;
  /// this inherent method exists for that module's sync path and for tests.
  /// It is deliberately not part of [`MilestoneStore`].
  pub async fn insert_milestone(&self, milestone: &Milestone) -> Result<()> {
    let milestone_id = encode_uuid(milestone.milestone_id);
    let project_id   = encode_uuid(milestone.project_id);
    let name         = milestone.name.clone();
    let reward_id    = milestone.reward_id.map(encode_uuid);
    let completed    = milestone.completed;
    let created_at   = encode_dt(milestone.created_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO milestones
             (milestone_id, project_id, name, reward_id, completed, created_at)
           VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
          rusqlite::params![
            milestone_id,
            project_id,
            name,
            reward_id,
            completed,
            created_at,
          ],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── ProjectStore ────────────────────────────────────────────────────────────

const PROJECT_COLUMNS: &str = "project_id, user_id, name, description, \
  purpose, budget, final_date, resources, schedule, reward_id, active, \
  status, created_at";

fn project_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawProject> {
  Ok(RawProject {
    project_id:  row.get(0)?,
    user_id:     row.get(1)?,
    name:        row.get(2)?,
    description: row.get(3)?,
    purpose:     row.get(4)?,
    budget:      row.get(5)?,
    final_date:  row.get(6)?,
    resources:   row.get(7)?,
    schedule:    row.get(8)?,
    reward_id:   row.get(9)?,
    active:      row.get(10)?,
    status:      row.get(11)?,
    created_at:  row.get(12)?,
  })
}

impl ProjectStore for SqliteStore {
  type Error = Error;

  async fn create_project(&self, input: NewProject) -> Result<Project> {
    let project = Project {
      project_id:  Uuid::new_v4(),
      user_id:     input.user_id,
      name:        input.name,
      description: input.description,
      purpose:     input.purpose,
      budget:      input.budget,
      final_date:  input.final_date,
      resources:   input.resources,
      schedule:    input.schedule,
      reward_id:   input.reward_id,
      active:      true,
      status:      input.status,
      created_at:  Utc::now(),
    };

    let project_id  = encode_uuid(project.project_id);
    let user_id     = encode_uuid(project.user_id);
    let name        = project.name.clone();
    let description = project.description.clone();
    let purpose     = project.purpose.clone();
    let budget      = project.budget;
    let final_date  = project.final_date.map(encode_date);
    let resources   = encode_json_opt(project.resources.as_ref());
    let schedule    = encode_json_opt(project.schedule.as_ref());
    let reward_id   = project.reward_id.map(encode_uuid);
    let active      = project.active;
    let status      = project.status.as_str().to_owned();
    let created_at  = encode_dt(project.created_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO projects (
             project_id, user_id, name, description, purpose, budget,
             final_date, resources, schedule, reward_id, active, status,
             created_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
          rusqlite::params![
            project_id,
            user_id,
            name,
            description,
            purpose,
            budget,
            final_date,
            resources,
            schedule,
            reward_id,
            active,
            status,
            created_at,
          ],
        )?;
        Ok(())
      })
      .await?;

    Ok(project)
  }

  async fn get_project(&self, id: Uuid) -> Result<Option<Project>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawProject> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!(
                "SELECT {PROJECT_COLUMNS} FROM projects WHERE project_id = ?1"
              ),
              rusqlite::params![id_str],
              project_from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawProject::into_project).transpose()
  }

  async fn list_projects(&self, user_id: Uuid) -> Result<Vec<Project>> {
    let user_str = encode_uuid(user_id);

    let raws: Vec<RawProject> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {PROJECT_COLUMNS} FROM projects
           WHERE user_id = ?1
           ORDER BY created_at DESC"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![user_str], project_from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawProject::into_project).collect()
  }

  async fn count_projects(&self, user_id: Uuid) -> Result<usize> {
    let user_str = encode_uuid(user_id);

    let count: i64 = self
      .conn
      .call(move |conn| {
        Ok(conn.query_row(
          "SELECT COUNT(*) FROM projects WHERE user_id = ?1",
          rusqlite::params![user_str],
          |row| row.get(0),
        )?)
      })
      .await?;

    Ok(count as usize)
  }

  async fn update_project(&self, project: Project) -> Result<bool> {
    let project_id  = encode_uuid(project.project_id);
    let user_id     = encode_uuid(project.user_id);
    let name        = project.name;
    let description = project.description;
    let purpose     = project.purpose;
    let budget      = project.budget;
    let final_date  = project.final_date.map(encode_date);
    let resources   = encode_json_opt(project.resources.as_ref());
    let schedule    = encode_json_opt(project.schedule.as_ref());
    let reward_id   = project.reward_id.map(encode_uuid);
    let active      = project.active;
    let status      = project.status.as_str().to_owned();

    let changed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE projects SET
             user_id = ?2, name = ?3, description = ?4, purpose = ?5,
             budget = ?6, final_date = ?7, resources = ?8, schedule = ?9,
             reward_id = ?10, active = ?11, status = ?12
           WHERE project_id = ?1",
          rusqlite::params![
            project_id,
            user_id,
            name,
            description,
            purpose,
            budget,
            final_date,
            resources,
            schedule,
            reward_id,
            active,
            status,
          ],
        )?)
      })
      .await?;

    Ok(changed > 0)
  }

  async fn delete_project(&self, id: Uuid) -> Result<bool> {
    let id_str = encode_uuid(id);

    let changed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "DELETE FROM projects WHERE project_id = ?1",
          rusqlite::params![id_str],
        )?)
      })
      .await?;

    Ok(changed > 0)
  }
}

// ─── DailyEntryStore ─────────────────────────────────────────────────────────

const ENTRY_COLUMNS: &str = "entry_id, user_id, task_id, sprint_id, \
  entry_date, accomplished, planned, difficulty, energy, created_at";

fn entry_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawEntry> {
  Ok(RawEntry {
    entry_id:     row.get(0)?,
    user_id:      row.get(1)?,
    task_id:      row.get(2)?,
    sprint_id:    row.get(3)?,
    entry_date:   row.get(4)?,
    accomplished: row.get(5)?,
    planned:      row.get(6)?,
    difficulty:   row.get(7)?,
    energy:       row.get(8)?,
    created_at:   row.get(9)?,
  })
}

impl DailyEntryStore for SqliteStore {
  type Error = Error;

  async fn create_entry(
    &self,
    day: NaiveDate,
    input: NewDailyEntry,
  ) -> Result<DailyEntry> {
    let entry = DailyEntry {
      entry_id:     Uuid::new_v4(),
      user_id:      input.user_id,
      task_id:      input.task_id,
      sprint_id:    input.sprint_id,
      entry_date:   day,
      accomplished: input.accomplished,
      planned:      input.planned,
      difficulty:   input.difficulty,
      energy:       input.energy,
      created_at:   Utc::now(),
    };

    let entry_id     = encode_uuid(entry.entry_id);
    let user_id      = encode_uuid(entry.user_id);
    let task_id      = entry.task_id.map(encode_uuid);
    let sprint_id    = encode_uuid(entry.sprint_id);
    let entry_date   = encode_date(entry.entry_date);
    let accomplished = entry.accomplished.clone();
    let planned      = entry.planned.clone();
    let difficulty   = entry.difficulty.as_str().to_owned();
    let energy       = entry.energy.as_str().to_owned();
    let created_at   = encode_dt(entry.created_at);

    let result = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO daily_entries (
             entry_id, user_id, task_id, sprint_id, entry_date,
             accomplished, planned, difficulty, energy, created_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
          rusqlite::params![
            entry_id,
            user_id,
            task_id,
            sprint_id,
            entry_date,
            accomplished,
            planned,
            difficulty,
            energy,
            created_at,
          ],
        )?;
        Ok(())
      })
      .await;

    match result {
      Ok(()) => Ok(entry),
      Err(e) if unique_violation(&e) => Err(Error::DuplicateEntry {
        user_id:   entry.user_id,
        day,
        sprint_id: entry.sprint_id,
      }),
      Err(e) => Err(e.into()),
    }
  }

  async fn get_entry(&self, id: Uuid) -> Result<Option<DailyEntry>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawEntry> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!(
                "SELECT {ENTRY_COLUMNS} FROM daily_entries WHERE entry_id = ?1"
              ),
              rusqlite::params![id_str],
              entry_from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawEntry::into_entry).transpose()
  }

  async fn find_entry_for_day(
    &self,
    user_id: Uuid,
    day: NaiveDate,
    sprint_id: Uuid,
  ) -> Result<Option<DailyEntry>> {
    let user_str   = encode_uuid(user_id);
    let day_str    = encode_date(day);
    let sprint_str = encode_uuid(sprint_id);

    let raw: Option<RawEntry> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!(
                "SELECT {ENTRY_COLUMNS} FROM daily_entries
                 WHERE user_id = ?1 AND entry_date = ?2 AND sprint_id = ?3"
              ),
              rusqlite::params![user_str, day_str, sprint_str],
              entry_from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawEntry::into_entry).transpose()
  }

  async fn list_entries(&self, user_id: Uuid) -> Result<Vec<DailyEntry>> {
    let user_str = encode_uuid(user_id);

    let raws: Vec<RawEntry> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {ENTRY_COLUMNS} FROM daily_entries
           WHERE user_id = ?1
           ORDER BY entry_date DESC, created_at DESC"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![user_str], entry_from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawEntry::into_entry).collect()
  }

  async fn update_entry(&self, entry: DailyEntry) -> Result<bool> {
    let entry_id     = encode_uuid(entry.entry_id);
    let task_id      = entry.task_id.map(encode_uuid);
    let sprint_id    = encode_uuid(entry.sprint_id);
    let accomplished = entry.accomplished;
    let planned      = entry.planned;
    let difficulty   = entry.difficulty.as_str().to_owned();
    let energy       = entry.energy.as_str().to_owned();

    let changed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE daily_entries SET
             task_id = ?2, sprint_id = ?3, accomplished = ?4, planned = ?5,
             difficulty = ?6, energy = ?7
           WHERE entry_id = ?1",
          rusqlite::params![
            entry_id,
            task_id,
            sprint_id,
            accomplished,
            planned,
            difficulty,
            energy,
          ],
        )?)
      })
      .await?;

    Ok(changed > 0)
  }

  async fn delete_entry(&self, id: Uuid) -> Result<bool> {
    let id_str = encode_uuid(id);

    let changed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "DELETE FROM daily_entries WHERE entry_id = ?1",
          rusqlite::params![id_str],
        )?)
      })
      .await?;

    Ok(changed > 0)
  }
}

// ─── RewardStore ─────────────────────────────────────────────────────────────

const REWARD_COLUMNS: &str = "reward_id, sponsor_id, name, description, \
  claim_instructions, claim_link, created_at";

fn reward_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawReward> {
  Ok(RawReward {
    reward_id:          row.get(0)?,
    sponsor_id:         row.get(1)?,
    name:               row.get(2)?,
    description:        row.get(3)?,
    claim_instructions: row.get(4)?,
    claim_link:         row.get(5)?,
    created_at:         row.get(6)?,
  })
}

impl RewardStore for SqliteStore {
  type Error = Error;

  async fn create_reward(&self, input: NewReward) -> Result<Reward> {
    let reward = Reward {
      reward_id:          Uuid::new_v4(),
      sponsor_id:         input.sponsor_id,
      name:               input.name,
      description:        input.description,
      claim_instructions: input.claim_instructions,
      claim_link:         input.claim_link,
      created_at:         Utc::now(),
    };

    let reward_id          = encode_uuid(reward.reward_id);
    let sponsor_id         = reward.sponsor_id.map(encode_uuid);
    let name               = reward.name.clone();
    let description        = reward.description.clone();
    let claim_instructions = reward.claim_instructions.clone();
    let claim_link         = reward.claim_link.clone();
    let created_at         = encode_dt(reward.created_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO rewards (
             reward_id, sponsor_id, name, description, claim_instructions,
             claim_link, created_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
          rusqlite::params![
            reward_id,
            sponsor_id,
            name,
            description,
            claim_instructions,
            claim_link,
            created_at,
          ],
        )?;
        Ok(())
      })
      .await?;

    Ok(reward)
  }

  async fn get_reward(&self, id: Uuid) -> Result<Option<Reward>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawReward> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!(
                "SELECT {REWARD_COLUMNS} FROM rewards WHERE reward_id = ?1"
              ),
              rusqlite::params![id_str],
              reward_from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawReward::into_reward).transpose()
  }

  async fn get_rewards(&self, ids: &[Uuid]) -> Result<Vec<Reward>> {
    if ids.is_empty() {
      return Ok(Vec::new());
    }

    let id_strs: Vec<String> = ids.iter().copied().map(encode_uuid).collect();

    let raws: Vec<RawReward> = self
      .conn
      .call(move |conn| {
        let placeholders = vec!["?"; id_strs.len()].join(", ");
        let sql = format!(
          "SELECT {REWARD_COLUMNS} FROM rewards
           WHERE reward_id IN ({placeholders})
           ORDER BY created_at DESC"
        );
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(rusqlite::params_from_iter(id_strs.iter()), reward_from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawReward::into_reward).collect()
  }
}

// ─── MilestoneStore ──────────────────────────────────────────────────────────

impl MilestoneStore for SqliteStore {
  type Error = Error;

  async fn list_milestones(&self, project_id: Uuid) -> Result<Vec<Milestone>> {
    let project_str = encode_uuid(project_id);

    let raws: Vec<RawMilestone> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT milestone_id, project_id, name, reward_id, completed,
                  created_at
           FROM milestones
           WHERE project_id = ?1
           ORDER BY created_at ASC",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![project_str], |row| {
            Ok(RawMilestone {
              milestone_id: row.get(0)?,
              project_id:   row.get(1)?,
              name:         row.get(2)?,
              reward_id:    row.get(3)?,
              completed:    row.get(4)?,
              created_at:   row.get(5)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawMilestone::into_milestone).collect()
  }
}

// ─── BadgeStore ──────────────────────────────────────────────────────────────

impl BadgeStore for SqliteStore {
  type Error = Error;

  async fn create_badge(&self, input: NewBadge) -> Result<Badge> {
    let badge = Badge {
      badge_id:    Uuid::new_v4(),
      name:        input.name,
      description: input.description,
      icon:        input.icon,
      created_at:  Utc::now(),
    };

    let badge_id    = encode_uuid(badge.badge_id);
    let name        = badge.name.clone();
    let description = badge.description.clone();
    let icon        = badge.icon.clone();
    let created_at  = encode_dt(badge.created_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO badges (badge_id, name, description, icon, created_at)
           VALUES (?1, ?2, ?3, ?4, ?5)",
          rusqlite::params![badge_id, name, description, icon, created_at],
        )?;
        Ok(())
      })
      .await?;

    Ok(badge)
  }

  async fn get_badge(&self, id: Uuid) -> Result<Option<Badge>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawBadge> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT badge_id, name, description, icon, created_at
               FROM badges WHERE badge_id = ?1",
              rusqlite::params![id_str],
              |row| {
                Ok(RawBadge {
                  badge_id:    row.get(0)?,
                  name:        row.get(1)?,
                  description: row.get(2)?,
                  icon:        row.get(3)?,
                  created_at:  row.get(4)?,
                })
              },
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawBadge::into_badge).transpose()
  }

  async fn list_badges(&self) -> Result<Vec<Badge>> {
    let raws: Vec<RawBadge> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT badge_id, name, description, icon, created_at
           FROM badges ORDER BY created_at ASC",
        )?;
        let rows = stmt
          .query_map([], |row| {
            Ok(RawBadge {
              badge_id:    row.get(0)?,
              name:        row.get(1)?,
              description: row.get(2)?,
              icon:        row.get(3)?,
              created_at:  row.get(4)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawBadge::into_badge).collect()
  }

  async fn award_badge(
    &self,
    user_id: Uuid,
    badge_id: Uuid,
  ) -> Result<UserBadge> {
    let earned = UserBadge { user_id, badge_id, earned_at: Utc::now() };

    let user_str  = encode_uuid(user_id);
    let badge_str = encode_uuid(badge_id);
    let at_str    = encode_dt(earned.earned_at);

    let result = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO user_badges (user_id, badge_id, earned_at)
           VALUES (?1, ?2, ?3)",
          rusqlite::params![user_str, badge_str, at_str],
        )?;
        Ok(())
      })
      .await;

    match result {
      Ok(()) => Ok(earned),
      Err(e) if unique_violation(&e) => {
        Err(Error::AlreadyAwarded { user_id, badge_id })
      }
      Err(e) => Err(e.into()),
    }
  }

  async fn find_user_badge(
    &self,
    user_id: Uuid,
    badge_id: Uuid,
  ) -> Result<Option<UserBadge>> {
    let user_str  = encode_uuid(user_id);
    let badge_str = encode_uuid(badge_id);

    let raw: Option<RawUserBadge> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT user_id, badge_id, earned_at FROM user_badges
               WHERE user_id = ?1 AND badge_id = ?2",
              rusqlite::params![user_str, badge_str],
              |row| {
                Ok(RawUserBadge {
                  user_id:   row.get(0)?,
                  badge_id:  row.get(1)?,
                  earned_at: row.get(2)?,
                })
              },
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawUserBadge::into_user_badge).transpose()
  }

  async fn list_user_badges(&self, user_id: Uuid) -> Result<Vec<UserBadge>> {
    let user_str = encode_uuid(user_id);

    let raws: Vec<RawUserBadge> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT user_id, badge_id, earned_at FROM user_badges
           WHERE user_id = ?1
           ORDER BY earned_at DESC",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![user_str], |row| {
            Ok(RawUserBadge {
              user_id:   row.get(0)?,
              badge_id:  row.get(1)?,
              earned_at: row.get(2)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws
      .into_iter()
      .map(RawUserBadge::into_user_badge)
      .collect()
  }
}

// ─── AuditLogStore ───────────────────────────────────────────────────────────

const AUDIT_COLUMNS: &str = "log_id, actor_id, action, entity_type, \
  entity_id, before_json, after_json, recorded_at";

fn audit_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawAuditLog> {
  Ok(RawAuditLog {
    log_id:      row.get(0)?,
    actor_id:    row.get(1)?,
    action:      row.get(2)?,
    entity_type: row.get(3)?,
    entity_id:   row.get(4)?,
    before_json: row.get(5)?,
    after_json:  row.get(6)?,
    recorded_at: row.get(7)?,
  })
}

impl AuditLogStore for SqliteStore {
  type Error = Error;

  async fn record_audit(&self, input: NewAuditLog) -> Result<AuditLog> {
    let log = AuditLog {
      log_id:      Uuid::new_v4(),
      actor_id:    input.actor_id,
      action:      input.action,
      entity_type: input.entity_type,
      entity_id:   input.entity_id,
      before:      input.before,
      after:       input.after,
      recorded_at: Utc::now(),
    };

    let log_id      = encode_uuid(log.log_id);
    let actor_id    = encode_uuid(log.actor_id);
    let action      = log.action.clone();
    let entity_type = log.entity_type.clone();
    let entity_id   = encode_uuid(log.entity_id);
    let before_json = encode_json_opt(log.before.as_ref());
    let after_json  = encode_json_opt(log.after.as_ref());
    let recorded_at = encode_dt(log.recorded_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO audit_logs (
             log_id, actor_id, action, entity_type, entity_id,
             before_json, after_json, recorded_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
          rusqlite::params![
            log_id,
            actor_id,
            action,
            entity_type,
            entity_id,
            before_json,
            after_json,
            recorded_at,
          ],
        )?;
        Ok(())
      })
      .await?;

    Ok(log)
  }

  async fn audit_by_user(
    &self,
    actor_id: Uuid,
    limit: Option<usize>,
  ) -> Result<Vec<AuditLog>> {
    let actor_str = encode_uuid(actor_id);
    let limit_val = limit_param(limit);

    let raws: Vec<RawAuditLog> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {AUDIT_COLUMNS} FROM audit_logs
           WHERE actor_id = ?1
           ORDER BY recorded_at DESC
           LIMIT ?2"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![actor_str, limit_val], audit_from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawAuditLog::into_audit_log).collect()
  }

  async fn audit_by_entity(
    &self,
    entity_type: &str,
    entity_id: Uuid,
    limit: Option<usize>,
  ) -> Result<Vec<AuditLog>> {
    let type_str   = entity_type.to_owned();
    let entity_str = encode_uuid(entity_id);
    let limit_val  = limit_param(limit);

    let raws: Vec<RawAuditLog> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {AUDIT_COLUMNS} FROM audit_logs
           WHERE entity_type = ?1 AND entity_id = ?2
           ORDER BY recorded_at DESC
           LIMIT ?3"
        ))?;
        let rows = stmt
          .query_map(
            rusqlite::params![type_str, entity_str, limit_val],
            audit_from_row,
          )?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawAuditLog::into_audit_log).collect()
  }
}

// ─── MetricsStore ────────────────────────────────────────────────────────────

const METRICS_COLUMNS: &str =
  "event_id, user_id, event_type, payload_json, recorded_at";

fn event_from_row(
  row: &rusqlite::Row<'_>,
) -> rusqlite::Result<RawMetricsEvent> {
  Ok(RawMetricsEvent {
    event_id:     row.get(0)?,
    user_id:      row.get(1)?,
    event_type:   row.get(2)?,
    payload_json: row.get(3)?,
    recorded_at:  row.get(4)?,
  })
}

impl MetricsStore for SqliteStore {
  type Error = Error;

  async fn record_event(&self, input: NewMetricsEvent) -> Result<MetricsEvent> {
    let event = MetricsEvent {
      event_id:    Uuid::new_v4(),
      user_id:     input.user_id,
      event_type:  input.event_type,
      payload:     input.payload,
      recorded_at: Utc::now(),
    };

    let event_id     = encode_uuid(event.event_id);
    let user_id      = event.user_id.map(encode_uuid);
    let event_type   = event.event_type.clone();
    let payload_json = event.payload.to_string();
    let recorded_at  = encode_dt(event.recorded_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO metrics_events
             (event_id, user_id, event_type, payload_json, recorded_at)
           VALUES (?1, ?2, ?3, ?4, ?5)",
          rusqlite::params![
            event_id,
            user_id,
            event_type,
            payload_json,
            recorded_at,
          ],
        )?;
        Ok(())
      })
      .await?;

    Ok(event)
  }

  async fn events_by_type(
    &self,
    event_type: &str,
    limit: Option<usize>,
  ) -> Result<Vec<MetricsEvent>> {
    let type_str  = event_type.to_owned();
    let limit_val = limit_param(limit);

    let raws: Vec<RawMetricsEvent> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {METRICS_COLUMNS} FROM metrics_events
           WHERE event_type = ?1
           ORDER BY recorded_at DESC
           LIMIT ?2"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![type_str, limit_val], event_from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawMetricsEvent::into_event).collect()
  }

  async fn events_by_user(
    &self,
    user_id: Uuid,
    limit: Option<usize>,
  ) -> Result<Vec<MetricsEvent>> {
    let user_str  = encode_uuid(user_id);
    let limit_val = limit_param(limit);

    let raws: Vec<RawMetricsEvent> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {METRICS_COLUMNS} FROM metrics_events
           WHERE user_id = ?1
           ORDER BY recorded_at DESC
           LIMIT ?2"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![user_str, limit_val], event_from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawMetricsEvent::into_event).collect()
  }
}
