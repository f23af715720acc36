use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Версия формата резервной копии
pub const BACKUP_VERSION: &str = "1.0";

/// Документ резервной копии
///
/// Каждое поле содержит сохранённое состояние хранилища как есть
/// (без проверки схемы). Отсутствующее поле при импорте означает
/// "не трогать это хранилище". Заголовок (`version`, `exportedAt`)
/// принимается в любом JSON-виде.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exported_at: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tasks: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub projects: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activities: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub members: Option<Value>,
}

impl BackupDocument {
    /// Версия формата, если она записана строкой
    pub fn version_str(&self) -> Option<&str> {
        self.version.as_ref().and_then(Value::as_str)
    }
}

/// Результат импорта резервной копии
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupImportResult {
    /// Ключи хранилища, которые были перезаписаны
    pub restored_keys: Vec<String>,
}
