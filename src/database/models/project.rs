use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A project owned by exactly one user. `owner_id` never changes after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub owner_id: Uuid,
}

/// POST /api/projects body
#[derive(Debug, Default, Clone, Deserialize)]
pub struct CreateProject {
    pub name: Option<String>,
    pub description: Option<String>,
}

/// PUT /api/projects/:id body
#[derive(Debug, Default, Clone, Deserialize)]
pub struct UpdateProject {
    pub name: Option<String>,
    pub description: Option<String>,
}

/// Validated input for a project insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProject {
    pub name: String,
    pub description: Option<String>,
    pub owner_id: Uuid,
}

impl NewProject {
    pub fn into_project(self, id: Uuid) -> Project {
        Project {
            id,
            name: self.name,
            description: self.description,
            owner_id: self.owner_id,
        }
    }
}

/// Fields to overwrite on a stored project; `None` keeps the stored value.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ProjectPatch {
    pub name: Option<String>,
    pub description: Option<String>,
}

impl ProjectPatch {
    pub fn apply(self, project: &mut Project) {
        if let Some(name) = self.name {
            project.name = name;
        }
        if let Some(description) = self.description {
            project.description = Some(description);
        }
    }
}

/// Body returned by successful deletes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteConfirmation {
    pub id: Uuid,
    pub message: String,
}

impl DeleteConfirmation {
    pub fn new(id: Uuid, message: impl Into<String>) -> Self {
        Self {
            id,
            message: message.into(),
        }
    }
}
