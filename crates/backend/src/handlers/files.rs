use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};
use contracts::shared::upload::UploadedFile;
use serde_json::{json, Value};

use crate::shared::files::service::{self, UploadError};
use crate::system::state::SharedState;

/// Имя поля формы с файлом
const FILE_FIELD: &str = "file";

/// POST /upload
pub async fn upload(
    State(state): State<SharedState>,
    mut multipart: Multipart,
) -> Result<Json<UploadedFile>, StatusCode> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| StatusCode::BAD_REQUEST)?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let original_name = field.file_name().unwrap_or("file").to_string();
        let mimetype = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let bytes = field.bytes().await.map_err(|e| {
            tracing::warn!("Failed to read upload body: {}", e);
            StatusCode::BAD_REQUEST
        })?;

        return match service::save_upload(&state.upload_dir, &original_name, &mimetype, &bytes)
            .await
        {
            Ok(uploaded) => Ok(Json(uploaded)),
            Err(e) => {
                tracing::error!("Failed to store upload: {}", e);
                Err(StatusCode::INTERNAL_SERVER_ERROR)
            }
        };
    }
    Err(StatusCode::BAD_REQUEST)
}

/// DELETE /files/:filename
pub async fn delete(
    State(state): State<SharedState>,
    Path(filename): Path<String>,
) -> Result<Json<Value>, StatusCode> {
    match service::delete_file(&state.upload_dir, &filename).await {
        Ok(()) => Ok(Json(json!({ "success": true }))),
        Err(UploadError::InvalidName(_)) => Err(StatusCode::BAD_REQUEST),
        Err(UploadError::NotFound(_)) => Err(StatusCode::NOT_FOUND),
        Err(e) => {
            tracing::error!("Failed to delete {}: {}", filename, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
