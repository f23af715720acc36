use axum::{
    extract::{Query, State},
    Json,
};
use contracts::domain::a001_project::aggregate::ProjectId;
use contracts::domain::a003_member::aggregate::MemberId;
use contracts::domain::a004_activity::presentation::ActivityView;
use serde::Deserialize;

use crate::system::state::SharedState;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityListParams {
    pub limit: Option<usize>,
    pub project_id: Option<String>,
    pub member_id: Option<String>,
}

/// GET /api/activities?limit=&projectId=&memberId=
///
/// Без фильтров возвращает последние `limit` записей (по умолчанию 50).
pub async fn list(
    State(state): State<SharedState>,
    Query(params): Query<ActivityListParams>,
) -> Json<Vec<ActivityView>> {
    let app = state.app.lock().await;
    let store = app.activities();
    let activities = match (params.project_id, params.member_id) {
        (Some(project_id), _) => store.get_activities_by_project(&ProjectId::new(project_id)),
        (None, Some(member_id)) => store.get_activities_by_member(&MemberId::new(member_id)),
        (None, None) => store.get_recent_activities(params.limit),
    };

    let limit = params.limit.unwrap_or(usize::MAX);
    Json(
        activities
            .into_iter()
            .take(limit)
            .map(ActivityView::from)
            .collect(),
    )
}

/// DELETE /api/activities
pub async fn clear(State(state): State<SharedState>) {
    let mut app = state.app.lock().await;
    app.clear_activities();
}
