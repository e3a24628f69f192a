//! Project use cases: create (limit guard), get/list (ownership), update,
//! delete.

use stride_core::{
  project::{NewProject, PROJECT_LIMIT, Project},
  store::ProjectStore,
};
use uuid::Uuid;

use crate::error::{Error, Result};

/// Create a project after checking the per-user project limit.
///
/// This is a pre-condition check, not a transaction-guarded invariant: two
/// racing creates can both pass the count. See the schema notes in
/// `stride-store-sqlite` for where the daily-entry equivalent is closed.
pub async fn create_project<S>(store: &S, input: NewProject) -> Result<Project>
where
  S: ProjectStore,
{
  let count = store
    .count_projects(input.user_id)
    .await
    .map_err(|e| Error::Store(Box::new(e)))?;

  if count >= PROJECT_LIMIT {
    return Err(Error::Validation(format!(
      "user {} already has {PROJECT_LIMIT} projects",
      input.user_id
    )));
  }

  let project = store
    .create_project(input)
    .await
    .map_err(|e| Error::Store(Box::new(e)))?;

  tracing::info!(
    project_id = %project.project_id,
    user_id = %project.user_id,
    "project created"
  );
  Ok(project)
}

/// Fetch a project by id with an ownership check.
///
/// Absence is `NotFound`; an owner mismatch is `Forbidden`.
pub async fn get_project<S>(
  store: &S,
  user_id: Uuid,
  project_id: Uuid,
) -> Result<Project>
where
  S: ProjectStore,
{
  let project = store
    .get_project(project_id)
    .await
    .map_err(|e| Error::Store(Box::new(e)))?
    .ok_or_else(|| Error::NotFound(format!("project {project_id} not found")))?;

  if project.user_id != user_id {
    return Err(Error::Forbidden(format!(
      "project {project_id} does not belong to user {user_id}"
    )));
  }
  Ok(project)
}

/// All projects owned by `user_id`, most recent first.
pub async fn list_projects<S>(store: &S, user_id: Uuid) -> Result<Vec<Project>>
where
  S: ProjectStore,
{
  store
    .list_projects(user_id)
    .await
    .map_err(|e| Error::Store(Box::new(e)))
}

/// Replace a project wholesale after an ownership check against the stored
/// record. The owning user id and creation timestamp are not transferable;
/// whatever the caller put there is overwritten from the stored record.
pub async fn update_project<S>(
  store: &S,
  user_id: Uuid,
  mut updated: Project,
) -> Result<Project>
where
  S: ProjectStore,
{
  let existing = get_project(store, user_id, updated.project_id).await?;

  updated.user_id = existing.user_id;
  updated.created_at = existing.created_at;

  store
    .update_project(updated.clone())
    .await
    .map_err(|e| Error::Store(Box::new(e)))?;
  Ok(updated)
}

/// Hard-delete a project after an ownership check.
pub async fn delete_project<S>(
  store: &S,
  user_id: Uuid,
  project_id: Uuid,
) -> Result<()>
where
  S: ProjectStore,
{
  get_project(store, user_id, project_id).await?;

  store
    .delete_project(project_id)
    .await
    .map_err(|e| Error::Store(Box::new(e)))?;

  tracing::info!(%project_id, %user_id, "project deleted");
  Ok(())
}
