use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::models::{NewProject, NewTask, Project, ProjectPatch, Task, TaskPatch};
use super::store::{ProjectStore, Store, StoreError, TaskStore};

#[derive(Default)]
struct Collections {
    projects: HashMap<Uuid, Project>,
    tasks: HashMap<Uuid, Task>,
}

/// In-process store for development and tests.
///
/// Both collections share one lock so a project delete and the removal of
/// its tasks are observed together.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Collections>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProjectStore for MemoryStore {
    async fn create_project(&self, new: NewProject) -> Result<Project, StoreError> {
        let project = new.into_project(Uuid::new_v4());
        let mut inner = self.inner.write().await;
        inner.projects.insert(project.id, project.clone());
        Ok(project)
    }

    async fn get_project(&self, id: Uuid) -> Result<Option<Project>, StoreError> {
        Ok(self.inner.read().await.projects.get(&id).cloned())
    }

    async fn list_projects(&self, owner_id: Uuid) -> Result<Vec<Project>, StoreError> {
        let inner = self.inner.read().await;
        let mut projects: Vec<Project> = inner
            .projects
            .values()
            .filter(|p| p.owner_id == owner_id)
            .cloned()
            .collect();
        projects.sort_by_key(|p| p.id);
        Ok(projects)
    }

    async fn update_project(&self, id: Uuid, patch: ProjectPatch) -> Result<Option<Project>, StoreError> {
        let mut inner = self.inner.write().await;
        Ok(inner.projects.get_mut(&id).map(|project| {
            patch.apply(project);
            project.clone()
        }))
    }

    async fn delete_project(&self, id: Uuid) -> Result<Option<Project>, StoreError> {
        let mut inner = self.inner.write().await;
        let removed = inner.projects.remove(&id);
        if removed.is_some() {
            inner.tasks.retain(|_, task| task.project_id != id);
        }
        Ok(removed)
    }
}

#[async_trait]
impl TaskStore for MemoryStore {
    async fn create_task(&self, new: NewTask) -> Result<Option<Task>, StoreError> {
        let mut inner = self.inner.write().await;
        if !inner.projects.contains_key(&new.project_id) {
            return Ok(None);
        }
        let task = new.into_task(Uuid::new_v4());
        inner.tasks.insert(task.id, task.clone());
        Ok(Some(task))
    }

    async fn get_task(&self, id: Uuid) -> Result<Option<Task>, StoreError> {
        Ok(self.inner.read().await.tasks.get(&id).cloned())
    }

    async fn list_tasks_by_project(&self, project_id: Uuid) -> Result<Vec<Task>, StoreError> {
        let inner = self.inner.read().await;
        let mut tasks: Vec<Task> = inner
            .tasks
            .values()
            .filter(|t| t.project_id == project_id)
            .cloned()
            .collect();
        tasks.sort_by_key(|t| t.id);
        Ok(tasks)
    }

    async fn update_task(&self, id: Uuid, patch: TaskPatch) -> Result<Option<Task>, StoreError> {
        let mut inner = self.inner.write().await;
        Ok(inner.tasks.get_mut(&id).map(|task| {
            patch.apply(task);
            task.clone()
        }))
    }

    async fn delete_task(&self, id: Uuid) -> Result<Option<Task>, StoreError> {
        Ok(self.inner.write().await.tasks.remove(&id))
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
