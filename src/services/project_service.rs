use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use super::{optional_text, required_text, ServiceError};
use crate::database::models::{CreateProject, DeleteConfirmation, NewProject, Project, ProjectPatch, UpdateProject};
use crate::database::{ProjectStore, Store};
use crate::middleware::AuthUser;
use crate::policy;
use crate::types::Action;

const PROJECT_NOT_FOUND: &str = "Project not found.";

/// Project operations on behalf of an authenticated user
#[derive(Clone)]
pub struct ProjectService {
    store: Arc<dyn Store>,
}

impl ProjectService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// The caller becomes the owner
    pub async fn create(&self, user: &AuthUser, input: CreateProject) -> Result<Project, ServiceError> {
        let new = NewProject {
            name: required_text("name", input.name.as_deref())?,
            description: optional_text(input.description.as_deref()),
            owner_id: user.user_id,
        };

        let project = self.store.create_project(new).await?;
        info!(user_id = %user.user_id, project_id = %project.id, "Created project");
        Ok(project)
    }

    /// Projects owned by the caller; the query itself is scoped to the owner.
    pub async fn list(&self, user: &AuthUser) -> Result<Vec<Project>, ServiceError> {
        Ok(self.store.list_projects(user.user_id).await?)
    }

    pub async fn get_by_id(&self, user: &AuthUser, project_id: Uuid) -> Result<Project, ServiceError> {
        let project = self.fetch(project_id).await?;
        policy::require_project_access(user, &project, Action::View)?;
        Ok(project)
    }

    /// Blank or omitted fields keep their stored value.
    pub async fn update(
        &self,
        user: &AuthUser,
        project_id: Uuid,
        input: UpdateProject,
    ) -> Result<Project, ServiceError> {
        let project = self.fetch(project_id).await?;
        policy::require_project_access(user, &project, Action::Update)?;

        let patch = ProjectPatch {
            name: optional_text(input.name.as_deref()),
            description: optional_text(input.description.as_deref()),
        };

        let updated = self
            .store
            .update_project(project.id, patch)
            .await?
            .ok_or_else(|| ServiceError::NotFound(PROJECT_NOT_FOUND.to_string()))?;
        info!(user_id = %user.user_id, project_id = %updated.id, "Updated project");
        Ok(updated)
    }

    /// Ownership is checked before anything is removed. The project's tasks
    /// are removed with it.
    pub async fn delete(&self, user: &AuthUser, project_id: Uuid) -> Result<DeleteConfirmation, ServiceError> {
        let project = self.fetch(project_id).await?;
        policy::require_project_access(user, &project, Action::Delete)?;

        let deleted = self
            .store
            .delete_project(project.id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(PROJECT_NOT_FOUND.to_string()))?;
        info!(user_id = %user.user_id, project_id = %deleted.id, "Deleted project");
        Ok(DeleteConfirmation::new(deleted.id, "Project deleted successfully."))
    }

    async fn fetch(&self, project_id: Uuid) -> Result<Project, ServiceError> {
        self.store
            .get_project(project_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(PROJECT_NOT_FOUND.to_string()))
    }
}
