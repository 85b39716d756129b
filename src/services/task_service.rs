use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use super::{optional_text, required_text, ServiceError};
use crate::database::models::{
    non_blank, CreateTask, DeleteConfirmation, NewTask, Project, Task, TaskPatch, TaskStatus, UpdateTask,
};
use crate::database::{ProjectStore, Store, TaskStore};
use crate::middleware::AuthUser;
use crate::policy;
use crate::types::Action;

const PROJECT_NOT_FOUND: &str = "Project not found.";
const TASK_NOT_FOUND: &str = "Task not found.";

/// Task operations. Access always goes through the parent project's owner.
#[derive(Clone)]
pub struct TaskService {
    store: Arc<dyn Store>,
}

impl TaskService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    pub async fn create(&self, user: &AuthUser, project_id: Uuid, input: CreateTask) -> Result<Task, ServiceError> {
        let project = self.fetch_project(project_id).await?;
        policy::require_project_tasks_access(user, &project, Action::Create)?;

        let new = NewTask {
            title: required_text("title", input.title.as_deref())?,
            description: optional_text(input.description.as_deref()),
            status: parse_status(input.status.as_deref())?.unwrap_or_default(),
            project_id: project.id,
        };

        let task = self
            .store
            .create_task(new)
            .await?
            .ok_or_else(|| ServiceError::NotFound(PROJECT_NOT_FOUND.to_string()))?;
        info!(user_id = %user.user_id, project_id = %project.id, task_id = %task.id, "Created task");
        Ok(task)
    }

    pub async fn list_by_project(&self, user: &AuthUser, project_id: Uuid) -> Result<Vec<Task>, ServiceError> {
        let project = self.fetch_project(project_id).await?;
        policy::require_project_tasks_access(user, &project, Action::View)?;
        Ok(self.store.list_tasks_by_project(project.id).await?)
    }

    pub async fn get_by_id(&self, user: &AuthUser, task_id: Uuid) -> Result<Task, ServiceError> {
        let (task, project) = self.fetch_with_project(task_id).await?;
        policy::require_task_access(user, &task, project.as_ref(), Action::View)?;
        Ok(task)
    }

    /// Blank or omitted fields keep their stored value; a supplied status
    /// must be one of the known states.
    pub async fn update(&self, user: &AuthUser, task_id: Uuid, input: UpdateTask) -> Result<Task, ServiceError> {
        let (task, project) = self.fetch_with_project(task_id).await?;
        policy::require_task_access(user, &task, project.as_ref(), Action::Update)?;

        let patch = TaskPatch {
            title: optional_text(input.title.as_deref()),
            description: optional_text(input.description.as_deref()),
            status: parse_status(input.status.as_deref())?,
        };

        let updated = self
            .store
            .update_task(task.id, patch)
            .await?
            .ok_or_else(|| ServiceError::NotFound(TASK_NOT_FOUND.to_string()))?;
        info!(user_id = %user.user_id, task_id = %updated.id, status = %updated.status, "Updated task");
        Ok(updated)
    }

    pub async fn delete(&self, user: &AuthUser, task_id: Uuid) -> Result<DeleteConfirmation, ServiceError> {
        let (task, project) = self.fetch_with_project(task_id).await?;
        policy::require_task_access(user, &task, project.as_ref(), Action::Delete)?;

        let deleted = self
            .store
            .delete_task(task.id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(TASK_NOT_FOUND.to_string()))?;
        info!(user_id = %user.user_id, task_id = %deleted.id, "Deleted task");
        Ok(DeleteConfirmation::new(deleted.id, "Task deleted successfully."))
    }

    async fn fetch_project(&self, project_id: Uuid) -> Result<Project, ServiceError> {
        self.store
            .get_project(project_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(PROJECT_NOT_FOUND.to_string()))
    }

    /// The task plus its parent project, which may no longer exist.
    async fn fetch_with_project(&self, task_id: Uuid) -> Result<(Task, Option<Project>), ServiceError> {
        let task = self
            .store
            .get_task(task_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(TASK_NOT_FOUND.to_string()))?;
        let project = self.store.get_project(task.project_id).await?;
        Ok((task, project))
    }
}

/// `None` for a blank or omitted status
fn parse_status(value: Option<&str>) -> Result<Option<TaskStatus>, ServiceError> {
    non_blank(value)
        .map(|raw| {
            raw.parse::<TaskStatus>()
                .map_err(|e| ServiceError::validation("status", e.to_string()))
        })
        .transpose()
}
