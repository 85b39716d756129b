use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    Json,
};
use uuid::Uuid;

use crate::database::models::{CreateProject, DeleteConfirmation, Project, UpdateProject};
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::routes::AppState;

/// POST /api/projects
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    payload: Result<Json<CreateProject>, JsonRejection>,
) -> ApiResult<Project> {
    let Json(input) = payload?;
    let project = state.projects.create(&user, input).await?;
    Ok(ApiResponse::created(project))
}

/// GET /api/projects
pub async fn list(State(state): State<AppState>, user: AuthUser) -> ApiResult<Vec<Project>> {
    let projects = state.projects.list(&user).await?;
    Ok(ApiResponse::success(projects))
}

/// GET /api/projects/:id
pub async fn get(
    State(state): State<AppState>,
    user: AuthUser,
    path: Result<Path<Uuid>, PathRejection>,
) -> ApiResult<Project> {
    let Path(id) = path?;
    let project = state.projects.get_by_id(&user, id).await?;
    Ok(ApiResponse::success(project))
}

/// PUT /api/projects/:id
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    path: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<UpdateProject>, JsonRejection>,
) -> ApiResult<Project> {
    let Path(id) = path?;
    let Json(input) = payload?;
    let project = state.projects.update(&user, id, input).await?;
    Ok(ApiResponse::success(project))
}

/// DELETE /api/projects/:id
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    path: Result<Path<Uuid>, PathRejection>,
) -> ApiResult<DeleteConfirmation> {
    let Path(id) = path?;
    let confirmation = state.projects.delete(&user, id).await?;
    Ok(ApiResponse::success(confirmation))
}
