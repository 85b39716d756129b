use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    Json,
};
use uuid::Uuid;

use crate::database::models::{CreateTask, DeleteConfirmation, Task, UpdateTask};
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::routes::AppState;

/// POST /api/projects/:id/tasks
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    path: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<CreateTask>, JsonRejection>,
) -> ApiResult<Task> {
    let Path(project_id) = path?;
    let Json(input) = payload?;
    let task = state.tasks.create(&user, project_id, input).await?;
    Ok(ApiResponse::created(task))
}

/// GET /api/projects/:id/tasks
pub async fn list_by_project(
    State(state): State<AppState>,
    user: AuthUser,
    path: Result<Path<Uuid>, PathRejection>,
) -> ApiResult<Vec<Task>> {
    let Path(project_id) = path?;
    let tasks = state.tasks.list_by_project(&user, project_id).await?;
    Ok(ApiResponse::success(tasks))
}

/// GET /api/tasks/:id
pub async fn get(
    State(state): State<AppState>,
    user: AuthUser,
    path: Result<Path<Uuid>, PathRejection>,
) -> ApiResult<Task> {
    let Path(id) = path?;
    let task = state.tasks.get_by_id(&user, id).await?;
    Ok(ApiResponse::success(task))
}

/// PUT /api/tasks/:id
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    path: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<UpdateTask>, JsonRejection>,
) -> ApiResult<Task> {
    let Path(id) = path?;
    let Json(input) = payload?;
    let task = state.tasks.update(&user, id, input).await?;
    Ok(ApiResponse::success(task))
}

/// DELETE /api/tasks/:id
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    path: Result<Path<Uuid>, PathRejection>,
) -> ApiResult<DeleteConfirmation> {
    let Path(id) = path?;
    let confirmation = state.tasks.delete(&user, id).await?;
    Ok(ApiResponse::success(confirmation))
}
