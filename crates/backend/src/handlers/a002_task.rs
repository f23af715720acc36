use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use contracts::domain::a001_project::aggregate::ProjectId;
use contracts::domain::a002_task::aggregate::{Task, TaskDto, TaskId, TaskPatch};
use contracts::domain::a003_member::aggregate::MemberId;
use contracts::domain::a004_activity::aggregate::Activity;
use contracts::enums::TaskStatus;
use serde::Deserialize;

use crate::system::state::SharedState;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskListParams {
    pub project_id: Option<String>,
    pub status: Option<String>,
    pub assignee: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignRequest {
    pub member_id: String,
}

#[derive(Debug, Deserialize)]
pub struct CommentRequest {
    pub text: String,
}

/// GET /api/tasks?projectId=&status=&assignee=
pub async fn list_all(
    State(state): State<SharedState>,
    Query(params): Query<TaskListParams>,
) -> Result<Json<Vec<Task>>, StatusCode> {
    let status = match params.status.as_deref() {
        Some(code) => Some(TaskStatus::from_code(code).ok_or(StatusCode::BAD_REQUEST)?),
        None => None,
    };
    let project_id = params.project_id.map(ProjectId::new);
    let assignee = params.assignee.map(MemberId::new);

    let app = state.app.lock().await;
    let store = app.tasks();
    let tasks: Vec<&Task> = match (&project_id, status) {
        (Some(project_id), Some(status)) => store.get_tasks_by_status(project_id, status),
        (Some(project_id), None) => store.get_tasks_by_project(project_id),
        (None, status) => store
            .list_tasks()
            .iter()
            .filter(|t| status.map_or(true, |s| t.status == s))
            .collect(),
    };

    Ok(Json(
        tasks
            .into_iter()
            .filter(|t| assignee.is_none() || t.assignee == assignee)
            .cloned()
            .collect(),
    ))
}

/// GET /api/tasks/:id
pub async fn get_by_id(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<Task>, StatusCode> {
    let app = state.app.lock().await;
    match app.tasks().get_task(&TaskId::new(id)) {
        Some(task) => Ok(Json(task.clone())),
        None => Err(StatusCode::NOT_FOUND),
    }
}

/// POST /api/tasks
pub async fn create(
    State(state): State<SharedState>,
    Json(dto): Json<TaskDto>,
) -> Result<Json<Task>, StatusCode> {
    if dto.title.trim().is_empty() {
        return Err(StatusCode::BAD_REQUEST);
    }
    let mut app = state.app.lock().await;
    Ok(Json(app.add_task(dto)))
}

/// PATCH /api/tasks/:id
pub async fn update(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    Json(patch): Json<TaskPatch>,
) -> Result<Json<Task>, StatusCode> {
    let mut app = state.app.lock().await;
    app.update_task(&TaskId::new(id), &patch)
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

/// DELETE /api/tasks/:id
pub async fn delete(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<(), StatusCode> {
    let mut app = state.app.lock().await;
    match app.delete_task(&TaskId::new(id)) {
        Some(_) => Ok(()),
        None => Err(StatusCode::NOT_FOUND),
    }
}

/// POST /api/tasks/:id/assign
pub async fn assign(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    Json(request): Json<AssignRequest>,
) -> Result<Json<Task>, StatusCode> {
    let mut app = state.app.lock().await;
    app.assign_task(&TaskId::new(id), &MemberId::new(request.member_id))
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

/// POST /api/tasks/:id/comments
pub async fn comment(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    Json(request): Json<CommentRequest>,
) -> Result<Json<Activity>, StatusCode> {
    if request.text.trim().is_empty() {
        return Err(StatusCode::BAD_REQUEST);
    }
    let mut app = state.app.lock().await;
    app.comment_on_task(&TaskId::new(id), &request.text)
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::MemoryStorage;
    use crate::system::state::AppState;
    use std::sync::Arc;

    fn shared() -> SharedState {
        let app = AppState::load(Arc::new(MemoryStorage::new()), None);
        SharedState::new(app, std::env::temp_dir())
    }

    #[tokio::test]
    async fn test_unknown_task_is_not_found() {
        let state = shared();
        let result = update(
            State(state.clone()),
            Path("task-404".into()),
            Json(TaskPatch::status(TaskStatus::Done)),
        )
        .await;
        assert_eq!(result.unwrap_err(), StatusCode::NOT_FOUND);
        assert_eq!(
            delete(State(state), Path("task-404".into())).await.unwrap_err(),
            StatusCode::NOT_FOUND
        );
    }

    #[tokio::test]
    async fn test_list_filters() {
        let state = shared();
        for (project, status) in [
            ("project-1", TaskStatus::Todo),
            ("project-1", TaskStatus::Done),
            ("project-2", TaskStatus::Done),
        ] {
            let dto = TaskDto {
                project_id: ProjectId::new(project),
                title: "t".into(),
                status,
                ..Default::default()
            };
            create(State(state.clone()), Json(dto)).await.unwrap();
        }

        let params = TaskListParams {
            status: Some("DONE".into()),
            ..Default::default()
        };
        let Json(done) = list_all(State(state.clone()), Query(params)).await.unwrap();
        assert_eq!(done.len(), 2);

        let params = TaskListParams {
            project_id: Some("project-1".into()),
            status: Some("DONE".into()),
            ..Default::default()
        };
        let Json(done) = list_all(State(state.clone()), Query(params)).await.unwrap();
        assert_eq!(done.len(), 1);

        let params = TaskListParams {
            status: Some("BOGUS".into()),
            ..Default::default()
        };
        assert_eq!(
            list_all(State(state), Query(params)).await.unwrap_err(),
            StatusCode::BAD_REQUEST
        );
    }
}
