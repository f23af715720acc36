use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use contracts::domain::a003_member::aggregate::{Member, MemberDto, MemberId, MemberPatch};

use crate::system::state::SharedState;

/// GET /api/members
pub async fn list_all(State(state): State<SharedState>) -> Json<Vec<Member>> {
    let app = state.app.lock().await;
    Json(app.members().list_members().to_vec())
}

/// GET /api/members/:id
pub async fn get_by_id(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<Member>, StatusCode> {
    let app = state.app.lock().await;
    app.members()
        .get_member(&MemberId::new(id))
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

/// POST /api/members
pub async fn create(
    State(state): State<SharedState>,
    Json(dto): Json<MemberDto>,
) -> Result<Json<Member>, StatusCode> {
    if dto.name.trim().is_empty() {
        return Err(StatusCode::BAD_REQUEST);
    }
    let mut app = state.app.lock().await;
    Ok(Json(app.add_member(dto)))
}

/// PATCH /api/members/:id
pub async fn update(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    Json(patch): Json<MemberPatch>,
) -> Result<Json<Member>, StatusCode> {
    let mut app = state.app.lock().await;
    app.update_member(&MemberId::new(id), &patch)
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

/// DELETE /api/members/:id
pub async fn delete(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<(), StatusCode> {
    let mut app = state.app.lock().await;
    match app.remove_member(&MemberId::new(id)) {
        Some(_) => Ok(()),
        None => Err(StatusCode::NOT_FOUND),
    }
}
