//! Integration tests for `SqliteStore` against an in-memory database.

use chrono::{NaiveDate, Utc};
use stride_core::{
  audit::NewAuditLog,
  badge::NewBadge,
  entry::{Difficulty, EnergyChange, NewDailyEntry},
  metrics::NewMetricsEvent,
  milestone::Milestone,
  project::{NewProject, ProjectStatus},
  reward::NewReward,
  store::{
    AuditLogStore, BadgeStore, DailyEntryStore, MetricsStore, MilestoneStore,
    ProjectStore, RewardStore,
  },
};
use uuid::Uuid;

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn day(s: &str) -> NaiveDate {
  NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn entry_input(user_id: Uuid, sprint_id: Uuid) -> NewDailyEntry {
  NewDailyEntry {
    user_id,
    task_id: None,
    sprint_id,
    accomplished: "shipped the thing".into(),
    planned: "ship the next thing".into(),
    difficulty: Difficulty::Medium,
    energy: EnergyChange::Stable,
  }
}

// ─── Projects ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_and_get_project() {
  let s = store().await;
  let user = Uuid::new_v4();

  let mut input = NewProject::new(user, "garden overhaul");
  input.description = Some("replace the back beds".into());
  input.budget = Some(450.0);
  input.final_date = Some(day("2026-10-01"));
  input.resources = Some(serde_json::json!({"links": ["a", "b"]}));

  let project = s.create_project(input).await.unwrap();
  assert!(project.active);
  assert_eq!(project.status, ProjectStatus::NotStarted);

  let fetched = s.get_project(project.project_id).await.unwrap().unwrap();
  assert_eq!(fetched.project_id, project.project_id);
  assert_eq!(fetched.user_id, user);
  assert_eq!(fetched.name, "garden overhaul");
  assert_eq!(fetched.budget, Some(450.0));
  assert_eq!(fetched.final_date, Some(day("2026-10-01")));
  assert_eq!(
    fetched.resources,
    Some(serde_json::json!({"links": ["a", "b"]}))
  );
}

#[tokio::test]
async fn get_project_missing_returns_none() {
  let s = store().await;
  assert!(s.get_project(Uuid::new_v4()).await.unwrap().is_none());
}

#[tokio::test]
async fn list_and_count_projects_per_user() {
  let s = store().await;
  let alice = Uuid::new_v4();
  let bob = Uuid::new_v4();

  s.create_project(NewProject::new(alice, "one")).await.unwrap();
  s.create_project(NewProject::new(alice, "two")).await.unwrap();
  s.create_project(NewProject::new(bob, "theirs")).await.unwrap();

  let mine = s.list_projects(alice).await.unwrap();
  assert_eq!(mine.len(), 2);
  assert!(mine.iter().all(|p| p.user_id == alice));

  assert_eq!(s.count_projects(alice).await.unwrap(), 2);
  assert_eq!(s.count_projects(bob).await.unwrap(), 1);
}

#[tokio::test]
async fn update_project_replaces_record() {
  let s = store().await;
  let user = Uuid::new_v4();

  let mut project =
    s.create_project(NewProject::new(user, "draft")).await.unwrap();
  project.name = "final".into();
  project.status = ProjectStatus::InProgress;
  project.active = false;

  assert!(s.update_project(project.clone()).await.unwrap());

  let fetched = s.get_project(project.project_id).await.unwrap().unwrap();
  assert_eq!(fetched.name, "final");
  assert_eq!(fetched.status, ProjectStatus::InProgress);
  assert!(!fetched.active);
}

#[tokio::test]
async fn update_missing_project_returns_false() {
  let s = store().await;
  let user = Uuid::new_v4();

  let mut ghost = s.create_project(NewProject::new(user, "x")).await.unwrap();
  assert!(s.delete_project(ghost.project_id).await.unwrap());

  ghost.name = "still gone".into();
  assert!(!s.update_project(ghost).await.unwrap());
}

#[tokio::test]
async fn delete_project_hard_deletes() {
  let s = store().await;
  let user = Uuid::new_v4();

  let project = s.create_project(NewProject::new(user, "x")).await.unwrap();
  assert!(s.delete_project(project.project_id).await.unwrap());
  assert!(s.get_project(project.project_id).await.unwrap().is_none());
  assert!(!s.delete_project(project.project_id).await.unwrap());
}

// ─── Daily entries ───────────────────────────────────────────────────────────

#[tokio::test]
async fn create_entry_and_find_by_day() {
  let s = store().await;
  let user = Uuid::new_v4();
  let sprint = Uuid::new_v4();
  let d = day("2026-08-20");

  let entry = s.create_entry(d, entry_input(user, sprint)).await.unwrap();
  assert_eq!(entry.entry_date, d);

  let found = s
    .find_entry_for_day(user, d, sprint)
    .await
    .unwrap()
    .unwrap();
  assert_eq!(found.entry_id, entry.entry_id);
  assert_eq!(found.difficulty, Difficulty::Medium);
  assert_eq!(found.energy, EnergyChange::Stable);

  // Other day / other sprint: nothing.
  assert!(
    s.find_entry_for_day(user, day("2026-08-21"), sprint)
      .await
      .unwrap()
      .is_none()
  );
  assert!(
    s.find_entry_for_day(user, d, Uuid::new_v4())
      .await
      .unwrap()
      .is_none()
  );
}

#[tokio::test]
async fn duplicate_entry_rejected_by_unique_index() {
  let s = store().await;
  let user = Uuid::new_v4();
  let sprint = Uuid::new_v4();
  let d = day("2026-08-20");

  s.create_entry(d, entry_input(user, sprint)).await.unwrap();

  // Straight to the store, bypassing the use-case guard: the UNIQUE index
  // still rejects the second row.
  let err = s
    .create_entry(d, entry_input(user, sprint))
    .await
    .unwrap_err();
  assert!(matches!(err, crate::Error::DuplicateEntry { .. }));

  // Different sprint and different day are both fine.
  s.create_entry(d, entry_input(user, Uuid::new_v4()))
    .await
    .unwrap();
  s.create_entry(day("2026-08-21"), entry_input(user, sprint))
    .await
    .unwrap();
}

#[tokio::test]
async fn list_entries_most_recent_first() {
  let s = store().await;
  let user = Uuid::new_v4();
  let sprint = Uuid::new_v4();

  s.create_entry(day("2026-08-18"), entry_input(user, sprint))
    .await
    .unwrap();
  s.create_entry(day("2026-08-20"), entry_input(user, sprint))
    .await
    .unwrap();
  s.create_entry(day("2026-08-19"), entry_input(user, sprint))
    .await
    .unwrap();

  let entries = s.list_entries(user).await.unwrap();
  let dates: Vec<_> = entries.iter().map(|e| e.entry_date).collect();
  assert_eq!(
    dates,
    vec![day("2026-08-20"), day("2026-08-19"), day("2026-08-18")]
  );
}

#[tokio::test]
async fn update_and_delete_entry() {
  let s = store().await;
  let user = Uuid::new_v4();
  let sprint = Uuid::new_v4();

  let mut entry = s
    .create_entry(day("2026-08-20"), entry_input(user, sprint))
    .await
    .unwrap();
  entry.accomplished = "rewrote it".into();
  entry.difficulty = Difficulty::High;

  assert!(s.update_entry(entry.clone()).await.unwrap());
  let fetched = s.get_entry(entry.entry_id).await.unwrap().unwrap();
  assert_eq!(fetched.accomplished, "rewrote it");
  assert_eq!(fetched.difficulty, Difficulty::High);

  assert!(s.delete_entry(entry.entry_id).await.unwrap());
  assert!(s.get_entry(entry.entry_id).await.unwrap().is_none());
}

// ─── Rewards & milestones ────────────────────────────────────────────────────

#[tokio::test]
async fn reward_roundtrip_and_batched_get() {
  let s = store().await;

  let mut input = NewReward::new("coffee voucher");
  input.claim_link = Some("https://example.com/claim".into());
  let a = s.create_reward(input).await.unwrap();
  let b = s.create_reward(NewReward::new("day off")).await.unwrap();
  s.create_reward(NewReward::new("unrelated")).await.unwrap();

  let fetched = s.get_reward(a.reward_id).await.unwrap().unwrap();
  assert_eq!(fetched.name, "coffee voucher");
  assert_eq!(fetched.claim_link.as_deref(), Some("https://example.com/claim"));

  let batch = s
    .get_rewards(&[a.reward_id, b.reward_id, Uuid::new_v4()])
    .await
    .unwrap();
  assert_eq!(batch.len(), 2);

  assert!(s.get_rewards(&[]).await.unwrap().is_empty());
}

#[tokio::test]
async fn milestones_listed_by_project() {
  let s = store().await;
  let user = Uuid::new_v4();
  let project = s.create_project(NewProject::new(user, "p")).await.unwrap();

  let milestone = Milestone {
    milestone_id: Uuid::new_v4(),
    project_id:   project.project_id,
    name:         "first checkpoint".into(),
    reward_id:    None,
    completed:    false,
    created_at:   Utc::now(),
  };
  s.insert_milestone(&milestone).await.unwrap();

  let listed = s.list_milestones(project.project_id).await.unwrap();
  assert_eq!(listed.len(), 1);
  assert_eq!(listed[0].milestone_id, milestone.milestone_id);
  assert!(s.list_milestones(Uuid::new_v4()).await.unwrap().is_empty());
}

// ─── Badges ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn badge_catalog_and_awards() {
  let s = store().await;
  let user = Uuid::new_v4();

  let badge = s
    .create_badge(NewBadge {
      name:        "first entry".into(),
      description: Some("logged a daily entry".into()),
      icon:        None,
    })
    .await
    .unwrap();

  assert_eq!(s.list_badges().await.unwrap().len(), 1);
  assert!(s.get_badge(badge.badge_id).await.unwrap().is_some());

  let earned = s.award_badge(user, badge.badge_id).await.unwrap();
  assert_eq!(earned.badge_id, badge.badge_id);

  let found = s
    .find_user_badge(user, badge.badge_id)
    .await
    .unwrap()
    .unwrap();
  assert_eq!(found.user_id, user);

  assert_eq!(s.list_user_badges(user).await.unwrap().len(), 1);
}

#[tokio::test]
async fn double_award_rejected_by_primary_key() {
  let s = store().await;
  let user = Uuid::new_v4();

  let badge = s
    .create_badge(NewBadge { name: "streak".into(), description: None, icon: None })
    .await
    .unwrap();

  s.award_badge(user, badge.badge_id).await.unwrap();
  let err = s.award_badge(user, badge.badge_id).await.unwrap_err();
  assert!(matches!(err, crate::Error::AlreadyAwarded { .. }));
}

// ─── Audit log ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn audit_reads_are_most_recent_first_and_limited() {
  let s = store().await;
  let actor = Uuid::new_v4();
  let entity = Uuid::new_v4();

  let mut ids = Vec::new();
  for i in 0..3 {
    let log = s
      .record_audit(NewAuditLog {
        actor_id:    actor,
        action:      format!("project.update.{i}"),
        entity_type: "project".into(),
        entity_id:   entity,
        before:      Some(serde_json::json!({"rev": i})),
        after:       Some(serde_json::json!({"rev": i + 1})),
      })
      .await
      .unwrap();
    ids.push(log.log_id);
  }

  let by_user = s.audit_by_user(actor, None).await.unwrap();
  assert_eq!(by_user.len(), 3);
  assert_eq!(by_user[0].log_id, ids[2]);
  assert_eq!(by_user[2].log_id, ids[0]);

  let limited = s.audit_by_user(actor, Some(2)).await.unwrap();
  assert_eq!(limited.len(), 2);
  assert_eq!(limited[0].log_id, ids[2]);

  let by_entity = s.audit_by_entity("project", entity, Some(1)).await.unwrap();
  assert_eq!(by_entity.len(), 1);
  assert_eq!(by_entity[0].log_id, ids[2]);
  assert_eq!(by_entity[0].before, Some(serde_json::json!({"rev": 2})));
}

// ─── Metrics events ──────────────────────────────────────────────────────────

#[tokio::test]
async fn metrics_reads_by_type_and_user() {
  let s = store().await;
  let user = Uuid::new_v4();

  s.record_event(NewMetricsEvent {
    user_id:    Some(user),
    event_type: "entry.created".into(),
    payload:    serde_json::json!({"sprint": "s1"}),
  })
  .await
  .unwrap();
  s.record_event(NewMetricsEvent {
    user_id:    None,
    event_type: "entry.created".into(),
    payload:    serde_json::json!({}),
  })
  .await
  .unwrap();
  s.record_event(NewMetricsEvent {
    user_id:    Some(user),
    event_type: "reward.claimed".into(),
    payload:    serde_json::json!({}),
  })
  .await
  .unwrap();

  let created = s.events_by_type("entry.created", None).await.unwrap();
  assert_eq!(created.len(), 2);
  // Most recent first: the anonymous event was recorded after the first.
  assert_eq!(created[0].user_id, None);

  let mine = s.events_by_user(user, None).await.unwrap();
  assert_eq!(mine.len(), 2);
  assert_eq!(mine[0].event_type, "reward.claimed");

  let limited = s.events_by_user(user, Some(1)).await.unwrap();
  assert_eq!(limited.len(), 1);
}
