use axum::{extract::State, Json};
use contracts::shared::settings::{AppSettings, AppSettingsPatch};

use crate::system::state::SharedState;

/// GET /api/settings
pub async fn get(State(state): State<SharedState>) -> Json<AppSettings> {
    let app = state.app.lock().await;
    Json(app.settings().clone())
}

/// PATCH /api/settings
pub async fn update(
    State(state): State<SharedState>,
    Json(patch): Json<AppSettingsPatch>,
) -> Json<AppSettings> {
    let mut app = state.app.lock().await;
    Json(app.update_settings(&patch).clone())
}

/// POST /api/settings/reset
pub async fn reset(State(state): State<SharedState>) -> Json<AppSettings> {
    let mut app = state.app.lock().await;
    Json(app.reset_settings().clone())
}
