use serde::{Deserialize, Serialize};

/// Ответ на загрузку файла
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedFile {
    /// Имя на диске: `<millis>-<original name>`
    pub filename: String,
    pub original_name: String,
    /// URL для скачивания: `/files/<filename>`
    pub path: String,
    pub size: u64,
    pub mimetype: String,
}
