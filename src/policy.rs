//! Ownership policy.
//!
//! A project belongs to the user in its `owner_id`. A task has no owner of
//! its own: access is decided by the project it references. Callers fetch
//! the target first and only consult the policy once it is known to exist,
//! so a missing resource reports NOT_FOUND and never a denial.

use crate::database::models::{Project, Task};
use crate::middleware::AuthUser;
use crate::services::ServiceError;
use crate::types::Action;

pub fn can_access_project(user: &AuthUser, project: &Project) -> bool {
    project.owner_id == user.user_id
}

/// `project` must be the task's resolved parent; a missing or mismatched
/// parent denies.
pub fn can_access_task(user: &AuthUser, task: &Task, project: Option<&Project>) -> bool {
    match project {
        Some(project) => project.id == task.project_id && can_access_project(user, project),
        None => false,
    }
}

pub fn require_project_access(user: &AuthUser, project: &Project, action: Action) -> Result<(), ServiceError> {
    if can_access_project(user, project) {
        return Ok(());
    }
    tracing::warn!(
        user_id = %user.user_id,
        project_id = %project.id,
        action = %action,
        "Denied project access"
    );
    Err(ServiceError::Forbidden(format!("Unauthorized to {} this project.", action)))
}

/// Task creation and listing are authorized against the parent project but
/// reported in terms of its tasks.
pub fn require_project_tasks_access(user: &AuthUser, project: &Project, action: Action) -> Result<(), ServiceError> {
    if can_access_project(user, project) {
        return Ok(());
    }
    tracing::warn!(
        user_id = %user.user_id,
        project_id = %project.id,
        action = %action,
        "Denied access to project tasks"
    );
    let message = match action {
        Action::Create => "Unauthorized to add task to this project.".to_string(),
        Action::View => "Unauthorized to view tasks for this project.".to_string(),
        other => format!("Unauthorized to {} tasks for this project.", other),
    };
    Err(ServiceError::Forbidden(message))
}

pub fn require_task_access(
    user: &AuthUser,
    task: &Task,
    project: Option<&Project>,
    action: Action,
) -> Result<(), ServiceError> {
    if can_access_task(user, task, project) {
        return Ok(());
    }
    tracing::warn!(
        user_id = %user.user_id,
        task_id = %task.id,
        project_id = %task.project_id,
        parent_resolved = project.is_some(),
        action = %action,
        "Denied task access"
    );
    Err(ServiceError::Forbidden(format!("Unauthorized to {} this task.", action)))
}
