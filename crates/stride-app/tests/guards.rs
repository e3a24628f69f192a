//! Use-case tests against the in-memory SQLite store: the project-count
//! limit, the one-entry-per-day-per-sprint guard, ownership checks, and
//! reward-ownership resolution.

use chrono::{NaiveDate, Utc};
use stride_app::{Error, badges, entries, projects, rewards};
use stride_core::{
  badge::NewBadge,
  entry::{Difficulty, EnergyChange, NewDailyEntry},
  milestone::Milestone,
  project::{NewProject, PROJECT_LIMIT},
  reward::NewReward,
  store::{BadgeStore, RewardStore},
};
use stride_store_sqlite::SqliteStore;
use uuid::Uuid;

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
    accomplished: "wrote tests".into(),
    planned: "write more tests".into(),
    difficulty: Difficulty::Low,
    energy: EnergyChange::Increased,
  }
}

async fn seed_milestone(
  s: &SqliteStore,
  project_id: Uuid,
  reward_id: Option<Uuid>,
) {
  s.insert_milestone(&Milestone {
    milestone_id: Uuid::new_v4(),
    project_id,
    name: "checkpoint".into(),
    reward_id,
    completed: false,
    created_at: Utc::now(),
  })
  .await
  .unwrap();
}

// ─── Daily-entry uniqueness guard ────────────────────────────────────────────

#[tokio::test]
async fn second_entry_same_day_same_sprint_conflicts() {
  let s = store().await;
  let user = Uuid::new_v4();
  let sprint = Uuid::new_v4();
  let d = day("2026-08-20");

  entries::create_daily_entry_for_day(&s, d, entry_input(user, sprint))
    .await
    .unwrap();

  let err = entries::create_daily_entry_for_day(&s, d, entry_input(user, sprint))
    .await
    .unwrap_err();
  assert!(matches!(err, Error::Conflict(_)));
}

#[tokio::test]
async fn different_day_or_sprint_both_succeed() {
  let s = store().await;
  let user = Uuid::new_v4();
  let sprint = Uuid::new_v4();
  let d = day("2026-08-20");

  entries::create_daily_entry_for_day(&s, d, entry_input(user, sprint))
    .await
    .unwrap();

  // Same sprint, next day.
  entries::create_daily_entry_for_day(
    &s,
    day("2026-08-21"),
    entry_input(user, sprint),
  )
  .await
  .unwrap();

  // Same day, different sprint.
  entries::create_daily_entry_for_day(
    &s,
    d,
    entry_input(user, Uuid::new_v4()),
  )
  .await
  .unwrap();
}

#[tokio::test]
async fn create_daily_entry_uses_today() {
  let s = store().await;
  let user = Uuid::new_v4();
  let sprint = Uuid::new_v4();

  let entry = entries::create_daily_entry(&s, entry_input(user, sprint))
    .await
    .unwrap();
  assert_eq!(entry.entry_date, chrono::Local::now().date_naive());

  let err = entries::create_daily_entry(&s, entry_input(user, sprint))
    .await
    .unwrap_err();
  assert!(matches!(err, Error::Conflict(_)));
}

#[tokio::test]
async fn entry_ownership_checks() {
  let s = store().await;
  let owner = Uuid::new_v4();
  let stranger = Uuid::new_v4();

  let entry = entries::create_daily_entry_for_day(
    &s,
    day("2026-08-20"),
    entry_input(owner, Uuid::new_v4()),
  )
  .await
  .unwrap();

  let err = entries::get_daily_entry(&s, stranger, entry.entry_id)
    .await
    .unwrap_err();
  assert!(matches!(err, Error::Forbidden(_)));

  let err = entries::delete_daily_entry(&s, stranger, entry.entry_id)
    .await
    .unwrap_err();
  assert!(matches!(err, Error::Forbidden(_)));

  let err = entries::get_daily_entry(&s, owner, Uuid::new_v4())
    .await
    .unwrap_err();
  assert!(matches!(err, Error::NotFound(_)));

  entries::delete_daily_entry(&s, owner, entry.entry_id)
    .await
    .unwrap();
}

#[tokio::test]
async fn entry_update_pins_owner_and_day() {
  let s = store().await;
  let owner = Uuid::new_v4();
  let d = day("2026-08-20");

  let mut entry =
    entries::create_daily_entry_for_day(&s, d, entry_input(owner, Uuid::new_v4()))
      .await
      .unwrap();

  entry.accomplished = "revised".into();
  entry.entry_date = day("1999-01-01"); // ignored
  let updated = entries::update_daily_entry(&s, owner, entry).await.unwrap();

  assert_eq!(updated.accomplished, "revised");
  assert_eq!(updated.entry_date, d);
}

// ─── Project-limit guard ─────────────────────────────────────────────────────

#[tokio::test]
async fn seventh_project_fails_validation() {
  let s = store().await;
  let user = Uuid::new_v4();

  for i in 0..PROJECT_LIMIT {
    projects::create_project(&s, NewProject::new(user, format!("p{i}")))
      .await
      .unwrap();
  }

  let err = projects::create_project(&s, NewProject::new(user, "one too many"))
    .await
    .unwrap_err();
  assert!(matches!(err, Error::Validation(_)));

  // Deleting one frees a slot.
  let existing = projects::list_projects(&s, user).await.unwrap();
  projects::delete_project(&s, user, existing[0].project_id)
    .await
    .unwrap();
  projects::create_project(&s, NewProject::new(user, "fits again"))
    .await
    .unwrap();
}

#[tokio::test]
async fn limit_is_per_user() {
  let s = store().await;
  let alice = Uuid::new_v4();
  let bob = Uuid::new_v4();

  for i in 0..PROJECT_LIMIT {
    projects::create_project(&s, NewProject::new(alice, format!("a{i}")))
      .await
      .unwrap();
  }

  // Bob is unaffected by Alice's count.
  projects::create_project(&s, NewProject::new(bob, "b0"))
    .await
    .unwrap();
}

#[tokio::test]
async fn project_ownership_checks() {
  let s = store().await;
  let owner = Uuid::new_v4();
  let stranger = Uuid::new_v4();

  let created = projects::create_project(&s, NewProject::new(owner, "mine"))
    .await
    .unwrap();

  // Owner gets the record back unchanged.
  let fetched = projects::get_project(&s, owner, created.project_id)
    .await
    .unwrap();
  assert_eq!(fetched.project_id, created.project_id);
  assert_eq!(fetched.name, "mine");

  let err = projects::get_project(&s, stranger, created.project_id)
    .await
    .unwrap_err();
  assert!(matches!(err, Error::Forbidden(_)));

  let err = projects::get_project(&s, owner, Uuid::new_v4())
    .await
    .unwrap_err();
  assert!(matches!(err, Error::NotFound(_)));
}

#[tokio::test]
async fn project_update_does_not_transfer_ownership() {
  let s = store().await;
  let owner = Uuid::new_v4();
  let other = Uuid::new_v4();

  let mut project = projects::create_project(&s, NewProject::new(owner, "p"))
    .await
    .unwrap();
  project.user_id = other; // ignored
  project.name = "renamed".into();

  let updated = projects::update_project(&s, owner, project).await.unwrap();
  assert_eq!(updated.user_id, owner);
  assert_eq!(updated.name, "renamed");
}

// ─── Reward-ownership resolution ─────────────────────────────────────────────

#[tokio::test]
async fn unreferenced_reward_is_forbidden() {
  let s = store().await;
  let user = Uuid::new_v4();

  projects::create_project(&s, NewProject::new(user, "no reward"))
    .await
    .unwrap();
  let reward = s.create_reward(NewReward::new("not yours")).await.unwrap();

  let err = rewards::get_reward(&s, user, reward.reward_id)
    .await
    .unwrap_err();
  assert!(matches!(err, Error::Forbidden(_)));
}

#[tokio::test]
async fn referenced_but_missing_reward_is_not_found() {
  let s = store().await;
  let user = Uuid::new_v4();
  let dangling = Uuid::new_v4();

  let mut input = NewProject::new(user, "points at nothing");
  input.reward_id = Some(dangling);
  projects::create_project(&s, input).await.unwrap();

  let err = rewards::get_reward(&s, user, dangling).await.unwrap_err();
  assert!(matches!(err, Error::NotFound(_)));
}

#[tokio::test]
async fn reward_referenced_by_project_is_returned() {
  let s = store().await;
  let user = Uuid::new_v4();

  let reward = s.create_reward(NewReward::new("spa day")).await.unwrap();
  let mut input = NewProject::new(user, "earn it");
  input.reward_id = Some(reward.reward_id);
  projects::create_project(&s, input).await.unwrap();

  let fetched = rewards::get_reward(&s, user, reward.reward_id)
    .await
    .unwrap();
  assert_eq!(fetched.reward_id, reward.reward_id);
  assert_eq!(fetched.name, "spa day");
}

#[tokio::test]
async fn reward_referenced_by_milestone_is_returned() {
  let s = store().await;
  let user = Uuid::new_v4();

  let reward = s.create_reward(NewReward::new("nice dinner")).await.unwrap();
  let project = projects::create_project(&s, NewProject::new(user, "p"))
    .await
    .unwrap();
  seed_milestone(&s, project.project_id, Some(reward.reward_id)).await;

  let fetched = rewards::get_reward(&s, user, reward.reward_id)
    .await
    .unwrap();
  assert_eq!(fetched.reward_id, reward.reward_id);
}

#[tokio::test]
async fn list_rewards_empty_is_ok() {
  let s = store().await;
  let user = Uuid::new_v4();

  // No projects at all.
  assert!(rewards::list_rewards(&s, user).await.unwrap().is_empty());

  // A project with no reward references.
  let project = projects::create_project(&s, NewProject::new(user, "plain"))
    .await
    .unwrap();
  seed_milestone(&s, project.project_id, None).await;
  assert!(rewards::list_rewards(&s, user).await.unwrap().is_empty());
}

#[tokio::test]
async fn list_rewards_deduplicates_across_project_and_milestone() {
  let s = store().await;
  let user = Uuid::new_v4();

  let shared = s.create_reward(NewReward::new("shared")).await.unwrap();
  let solo = s.create_reward(NewReward::new("solo")).await.unwrap();
  // A reward someone else references never shows up.
  s.create_reward(NewReward::new("unrelated")).await.unwrap();

  // `shared` referenced by the project AND one of its milestones.
  let mut input = NewProject::new(user, "double ref");
  input.reward_id = Some(shared.reward_id);
  let project = projects::create_project(&s, input).await.unwrap();
  seed_milestone(&s, project.project_id, Some(shared.reward_id)).await;
  seed_milestone(&s, project.project_id, Some(solo.reward_id)).await;

  let mut listed = rewards::list_rewards(&s, user).await.unwrap();
  listed.sort_by(|a, b| a.name.cmp(&b.name));

  let names: Vec<_> = listed.iter().map(|r| r.name.as_str()).collect();
  assert_eq!(names, vec!["shared", "solo"]);
}

// ─── Badges ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn awarding_twice_conflicts() {
  let s = store().await;
  let user = Uuid::new_v4();

  let badge = s
    .create_badge(NewBadge {
      name:        "early riser".into(),
      description: None,
      icon:        None,
    })
    .await
    .unwrap();

  badges::award_badge(&s, user, badge.badge_id).await.unwrap();
  let err = badges::award_badge(&s, user, badge.badge_id)
    .await
    .unwrap_err();
  assert!(matches!(err, Error::Conflict(_)));

  let err = badges::award_badge(&s, user, Uuid::new_v4())
    .await
    .unwrap_err();
  assert!(matches!(err, Error::NotFound(_)));

  assert_eq!(badges::list_user_badges(&s, user).await.unwrap().len(), 1);
}
