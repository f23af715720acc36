use axum::{extract::State, http::StatusCode, Json};
use contracts::shared::backup::{BackupDocument, BackupImportResult};

use crate::system::backup::service::BackupError;
use crate::system::state::SharedState;

/// GET /api/backup/export
pub async fn export(State(state): State<SharedState>) -> Json<BackupDocument> {
    let app = state.app.lock().await;
    Json(app.export_backup())
}

/// POST /api/backup/import
///
/// Тело запроса: документ, полученный из export.
pub async fn import(
    State(state): State<SharedState>,
    body: String,
) -> Result<Json<BackupImportResult>, StatusCode> {
    let mut app = state.app.lock().await;
    match app.import_backup(&body) {
        Ok(result) => Ok(Json(result)),
        Err(BackupError::Parse(e)) => {
            tracing::warn!("Rejected backup import: {}", e);
            Err(StatusCode::BAD_REQUEST)
        }
        Err(e) => {
            tracing::error!("Backup import failed: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
