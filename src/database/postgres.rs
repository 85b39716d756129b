use std::time::Duration;

use async_trait::async_trait;
use sqlx::{postgres::PgPoolOptions, FromRow, PgPool};
use tracing::info;
use uuid::Uuid;

use super::models::{NewProject, NewTask, Project, ProjectPatch, Task, TaskPatch, TaskStatus};
use super::store::{ProjectStore, Store, StoreError, TaskStore};
use crate::config::DatabaseConfig;

const CREATE_PROJECTS: &str = r#"
    CREATE TABLE IF NOT EXISTS projects (
        id          UUID PRIMARY KEY,
        name        TEXT NOT NULL,
        description TEXT,
        owner_id    UUID NOT NULL
    )
"#;

const CREATE_PROJECTS_OWNER_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS projects_owner_id_idx ON projects (owner_id)";

const CREATE_TASKS: &str = r#"
    CREATE TABLE IF NOT EXISTS tasks (
        id          UUID PRIMARY KEY,
        title       TEXT NOT NULL,
        description TEXT,
        status      TEXT NOT NULL DEFAULT 'ToDo',
        project_id  UUID NOT NULL REFERENCES projects (id) ON DELETE CASCADE
    )
"#;

const CREATE_TASKS_PROJECT_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS tasks_project_id_idx ON tasks (project_id)";

/// Row shape of `tasks`; status is stored as text and parsed on the way out.
#[derive(Debug, FromRow)]
struct TaskRow {
    id: Uuid,
    title: String,
    description: Option<String>,
    status: String,
    project_id: Uuid,
}

impl TryFrom<TaskRow> for Task {
    type Error = StoreError;

    fn try_from(row: TaskRow) -> Result<Self, Self::Error> {
        let status: TaskStatus = row.status.parse().map_err(|e| StoreError::Corrupt {
            id: row.id,
            reason: format!("{}", e),
        })?;
        Ok(Task {
            id: row.id,
            title: row.title,
            description: row.description,
            status,
            project_id: row.project_id,
        })
    }
}

/// SQLSTATE 23503
fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .and_then(|db| db.code())
        .is_some_and(|code| code == "23503")
}

/// PostgreSQL-backed store
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub async fn connect(url: &str, config: &DatabaseConfig) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout))
            .connect(url)
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        info!(max_connections = config.max_connections, "Connected to PostgreSQL");
        Ok(Self { pool })
    }

    /// Creates the tables when they do not exist yet
    pub async fn init(&self) -> Result<(), StoreError> {
        for statement in [
            CREATE_PROJECTS,
            CREATE_PROJECTS_OWNER_INDEX,
            CREATE_TASKS,
            CREATE_TASKS_PROJECT_INDEX,
        ] {
            sqlx::query(statement).execute(&self.pool).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl ProjectStore for PgStore {
    async fn create_project(&self, new: NewProject) -> Result<Project, StoreError> {
        let project = sqlx::query_as::<_, Project>(
            "INSERT INTO projects (id, name, description, owner_id)
             VALUES ($1, $2, $3, $4)
             RETURNING id, name, description, owner_id",
        )
        .bind(Uuid::new_v4())
        .bind(&new.name)
        .bind(&new.description)
        .bind(new.owner_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(project)
    }

    async fn get_project(&self, id: Uuid) -> Result<Option<Project>, StoreError> {
        let project = sqlx::query_as::<_, Project>(
            "SELECT id, name, description, owner_id FROM projects WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(project)
    }

    async fn list_projects(&self, owner_id: Uuid) -> Result<Vec<Project>, StoreError> {
        let projects = sqlx::query_as::<_, Project>(
            "SELECT id, name, description, owner_id FROM projects
             WHERE owner_id = $1 ORDER BY id",
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(projects)
    }

    async fn update_project(&self, id: Uuid, patch: ProjectPatch) -> Result<Option<Project>, StoreError> {
        let project = sqlx::query_as::<_, Project>(
            "UPDATE projects
             SET name = COALESCE($2, name), description = COALESCE($3, description)
             WHERE id = $1
             RETURNING id, name, description, owner_id",
        )
        .bind(id)
        .bind(patch.name)
        .bind(patch.description)
        .fetch_optional(&self.pool)
        .await?;
        Ok(project)
    }

    async fn delete_project(&self, id: Uuid) -> Result<Option<Project>, StoreError> {
        // tasks go with it through ON DELETE CASCADE
        let project = sqlx::query_as::<_, Project>(
            "DELETE FROM projects WHERE id = $1 RETURNING id, name, description, owner_id",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(project)
    }
}

#[async_trait]
impl TaskStore for PgStore {
    async fn create_task(&self, new: NewTask) -> Result<Option<Task>, StoreError> {
        let inserted = sqlx::query_as::<_, TaskRow>(
            "INSERT INTO tasks (id, title, description, status, project_id)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING id, title, description, status, project_id",
        )
        .bind(Uuid::new_v4())
        .bind(&new.title)
        .bind(&new.description)
        .bind(new.status.as_str())
        .bind(new.project_id)
        .fetch_one(&self.pool)
        .await;

        match inserted {
            Ok(row) => row.try_into().map(Some),
            // project deleted since the caller looked it up
            Err(e) if is_foreign_key_violation(&e) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn get_task(&self, id: Uuid) -> Result<Option<Task>, StoreError> {
        sqlx::query_as::<_, TaskRow>(
            "SELECT id, title, description, status, project_id FROM tasks WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .map(Task::try_from)
        .transpose()
    }

    async fn list_tasks_by_project(&self, project_id: Uuid) -> Result<Vec<Task>, StoreError> {
        sqlx::query_as::<_, TaskRow>(
            "SELECT id, title, description, status, project_id FROM tasks
             WHERE project_id = $1 ORDER BY id",
        )
        .bind(project_id)
        .fetch_all(&self.pool)
        .await?
        .into_iter()
        .map(Task::try_from)
        .collect()
    }

    async fn update_task(&self, id: Uuid, patch: TaskPatch) -> Result<Option<Task>, StoreError> {
        sqlx::query_as::<_, TaskRow>(
            "UPDATE tasks
             SET title = COALESCE($2, title),
                 description = COALESCE($3, description),
                 status = COALESCE($4, status)
             WHERE id = $1
             RETURNING id, title, description, status, project_id",
        )
        .bind(id)
        .bind(patch.title)
        .bind(patch.description)
        .bind(patch.status.map(|s| s.as_str()))
        .fetch_optional(&self.pool)
        .await?
        .map(Task::try_from)
        .transpose()
    }

    async fn delete_task(&self, id: Uuid) -> Result<Option<Task>, StoreError> {
        sqlx::query_as::<_, TaskRow>(
            "DELETE FROM tasks WHERE id = $1
             RETURNING id, title, description, status, project_id",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .map(Task::try_from)
        .transpose()
    }
}

#[async_trait]
impl Store for PgStore {
    async fn health_check(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "postgres"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn task_row_with_unknown_status_is_corrupt() {
        let row = TaskRow {
            id: Uuid::nil(),
            title: "t".to_string(),
            description: None,
            status: "Blocked".to_string(),
            project_id: Uuid::nil(),
        };
        let err = Task::try_from(row).unwrap_err();
        assert!(matches!(err, StoreError::Corrupt { .. }));
    }

    #[test]
    fn non_database_errors_are_not_foreign_key_violations() {
        assert!(!is_foreign_key_violation(&sqlx::Error::RowNotFound));
    }

    #[test]
    fn task_row_accepts_legacy_status_spelling() {
        let row = TaskRow {
            id: Uuid::nil(),
            title: "t".to_string(),
            description: None,
            status: "In Progress".to_string(),
            project_id: Uuid::nil(),
        };
        assert_eq!(Task::try_from(row).unwrap().status, TaskStatus::InProgress);
    }
}
