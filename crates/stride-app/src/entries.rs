//! Daily-entry use cases: create (uniqueness guard), get/list (ownership),
//! update, delete.

use chrono::{Local, NaiveDate};
use stride_core::{
  entry::{DailyEntry, NewDailyEntry},
  store::DailyEntryStore,
};
use uuid::Uuid;

use crate::error::{Error, Result};

/// Create today's entry for the sprint named in `input`.
///
/// "Today" is the local calendar day (midnight-to-midnight), not a
/// timestamp comparison.
pub async fn create_daily_entry<S>(
  store: &S,
  input: NewDailyEntry,
) -> Result<DailyEntry>
where
  S: DailyEntryStore,
{
  create_daily_entry_for_day(store, Local::now().date_naive(), input).await
}

/// Create an entry for an explicit calendar day.
///
/// At most one entry may exist per (user, day, sprint); a second create for
/// the same triple fails with `Conflict`. The schema carries a UNIQUE index
/// on the same triple, so a racing create that slips past this check still
/// cannot produce a duplicate row.
pub async fn create_daily_entry_for_day<S>(
  store: &S,
  day: NaiveDate,
  input: NewDailyEntry,
) -> Result<DailyEntry>
where
  S: DailyEntryStore,
{
  let existing = store
    .find_entry_for_day(input.user_id, day, input.sprint_id)
    .await
    .map_err(|e| Error::Store(Box::new(e)))?;

  if existing.is_some() {
    return Err(Error::Conflict("one entry per day per sprint".into()));
  }

  let entry = store
    .create_entry(day, input)
    .await
    .map_err(|e| Error::Store(Box::new(e)))?;

  tracing::info!(
    entry_id = %entry.entry_id,
    user_id = %entry.user_id,
    sprint_id = %entry.sprint_id,
    day = %entry.entry_date,
    "daily entry created"
  );
  Ok(entry)
}

/// Fetch an entry by id with an ownership check.
pub async fn get_daily_entry<S>(
  store: &S,
  user_id: Uuid,
  entry_id: Uuid,
) -> Result<DailyEntry>
where
  S: DailyEntryStore,
{
  let entry = store
    .get_entry(entry_id)
    .await
    .map_err(|e| Error::Store(Box::new(e)))?
    .ok_or_else(|| Error::NotFound(format!("entry {entry_id} not found")))?;

  if entry.user_id != user_id {
    return Err(Error::Forbidden(format!(
      "entry {entry_id} does not belong to user {user_id}"
    )));
  }
  Ok(entry)
}

/// All entries by `user_id`, most recent first.
pub async fn list_daily_entries<S>(
  store: &S,
  user_id: Uuid,
) -> Result<Vec<DailyEntry>>
where
  S: DailyEntryStore,
{
  store
    .list_entries(user_id)
    .await
    .map_err(|e| Error::Store(Box::new(e)))
}

/// Replace an entry wholesale after an ownership check against the stored
/// record. The owner, covered day, and creation timestamp are pinned to the
/// stored values.
pub async fn update_daily_entry<S>(
  store: &S,
  user_id: Uuid,
  mut updated: DailyEntry,
) -> Result<DailyEntry>
where
  S: DailyEntryStore,
{
  let existing = get_daily_entry(store, user_id, updated.entry_id).await?;

  updated.user_id = existing.user_id;
  updated.entry_date = existing.entry_date;
  updated.created_at = existing.created_at;

  store
    .update_entry(updated.clone())
    .await
    .map_err(|e| Error::Store(Box::new(e)))?;
  Ok(updated)
}

/// Hard-delete an entry after an ownership check.
pub async fn delete_daily_entry<S>(
  store: &S,
  user_id: Uuid,
  entry_id: Uuid,
) -> Result<()>
where
  S: DailyEntryStore,
{
  get_daily_entry(store, user_id, entry_id).await?;

  store
    .delete_entry(entry_id)
    .await
    .map_err(|e| Error::Store(Box::new(e)))?;

  tracing::info!(%entry_id, %user_id, "daily entry deleted");
  Ok(())
}
