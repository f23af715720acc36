use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use contracts::domain::a001_project::aggregate::{Project, ProjectDto, ProjectId, ProjectPatch};

use crate::system::state::SharedState;

/// GET /api/projects
pub async fn list_all(State(state): State<SharedState>) -> Json<Vec<Project>> {
    let app = state.app.lock().await;
    Json(app.projects().list_projects().to_vec())
}

/// GET /api/projects/:id
pub async fn get_by_id(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<Project>, StatusCode> {
    let app = state.app.lock().await;
    match app.projects().get_project(&ProjectId::new(id)) {
        Some(project) => Ok(Json(project.clone())),
        None => Err(StatusCode::NOT_FOUND),
    }
}

/// POST /api/projects
pub async fn create(
    State(state): State<SharedState>,
    Json(dto): Json<ProjectDto>,
) -> Result<Json<Project>, StatusCode> {
    if dto.name.trim().is_empty() {
        return Err(StatusCode::BAD_REQUEST);
    }
    let mut app = state.app.lock().await;
    Ok(Json(app.add_project(dto)))
}

/// PATCH /api/projects/:id
pub async fn update(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    Json(patch): Json<ProjectPatch>,
) -> Result<Json<Project>, StatusCode> {
    let mut app = state.app.lock().await;
    app.update_project(&ProjectId::new(id), &patch)
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

/// DELETE /api/projects/:id
pub async fn delete(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<(), StatusCode> {
    let mut app = state.app.lock().await;
    match app.delete_project(&ProjectId::new(id)) {
        Some(_) => Ok(()),
        None => Err(StatusCode::NOT_FOUND),
    }
}
