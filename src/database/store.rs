use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use super::models::{NewProject, NewTask, Project, ProjectPatch, Task, TaskPatch};

/// Errors surfaced by a store backend
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Corrupt record {id}: {reason}")]
    Corrupt { id: Uuid, reason: String },

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Persistence for project documents. Every call touches a single document.
#[async_trait]
pub trait ProjectStore: Send + Sync {
    async fn create_project(&self, new: NewProject) -> Result<Project, StoreError>;

    async fn get_project(&self, id: Uuid) -> Result<Option<Project>, StoreError>;

    async fn list_projects(&self, owner_id: Uuid) -> Result<Vec<Project>, StoreError>;

    async fn update_project(&self, id: Uuid, patch: ProjectPatch) -> Result<Option<Project>, StoreError>;

    /// Removes the project together with every task that references it.
    async fn delete_project(&self, id: Uuid) -> Result<Option<Project>, StoreError>;
}

/// Persistence for task documents.
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// `None` when the parent project no longer exists; nothing is inserted.
    async fn create_task(&self, new: NewTask) -> Result<Option<Task>, StoreError>;

    async fn get_task(&self, id: Uuid) -> Result<Option<Task>, StoreError>;

    async fn list_tasks_by_project(&self, project_id: Uuid) -> Result<Vec<Task>, StoreError>;

    async fn update_task(&self, id: Uuid, patch: TaskPatch) -> Result<Option<Task>, StoreError>;

    async fn delete_task(&self, id: Uuid) -> Result<Option<Task>, StoreError>;
}

#[async_trait]
pub trait Store: ProjectStore + TaskStore {
    /// Cheap liveness probe used by GET /health
    async fn health_check(&self) -> Result<(), StoreError>;

    fn backend_name(&self) -> &'static str;
}
