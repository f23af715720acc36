//! Экспорт и импорт резервной копии.
//!
//! Экспорт собирает сохранённые значения ключей как есть. Импорт сначала
//! разбирает весь документ и только потом перезаписывает ключи, которые в
//! нём присутствуют; остальные ключи не трогаются. Если запись в хранилище
//! обрывается на середине, уже перезаписанные ключи возвращаются к прежним
//! значениям.

use chrono::Utc;
use contracts::domain::a001_project::aggregate::Project;
use contracts::domain::a002_task::aggregate::Task;
use contracts::domain::a003_member::aggregate::Member;
use contracts::domain::a004_activity::aggregate::ACTIVITY_STORAGE_KEY;
use contracts::domain::common::AggregateRoot;
use contracts::shared::backup::{BackupDocument, BackupImportResult, BACKUP_VERSION};
use serde_json::Value;
use thiserror::Error;

use crate::domain::a005_settings::repository::SETTINGS_STORAGE_KEY;
use crate::shared::data::persisted;
use crate::shared::data::{KeyValueStorage, StorageError};

#[derive(Debug, Error)]
pub enum BackupError {
    #[error("invalid backup document: {0}")]
    Parse(#[from] serde_json::Error),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Собрать документ резервной копии из хранилища
pub fn export_backup(storage: &dyn KeyValueStorage) -> BackupDocument {
    BackupDocument {
        version: Some(Value::String(BACKUP_VERSION.to_string())),
        exported_at: Some(Value::String(Utc::now().to_rfc3339())),
        tasks: persisted::load_raw(storage, &Task::storage_key()),
        projects: persisted::load_raw(storage, &Project::storage_key()),
        activities: persisted::load_raw(storage, ACTIVITY_STORAGE_KEY),
        settings: persisted::load_raw(storage, SETTINGS_STORAGE_KEY),
        members: persisted::load_raw(storage, &Member::storage_key()),
    }
}

/// Восстановить хранилище из JSON-документа.
///
/// Содержимое ключей не проверяется: битое значение превратится в
/// состояние по умолчанию при следующей загрузке.
pub fn import_backup(
    storage: &dyn KeyValueStorage,
    raw: &str,
) -> Result<BackupImportResult, BackupError> {
    let document: BackupDocument = serde_json::from_str(raw)?;
    if document.version_str() != Some(BACKUP_VERSION) {
        tracing::warn!(
            "Backup version {:?} differs from {}, importing anyway",
            document.version,
            BACKUP_VERSION
        );
    }

    let entries: [(String, Option<Value>); 5] = [
        (Task::storage_key(), document.tasks),
        (Project::storage_key(), document.projects),
        (ACTIVITY_STORAGE_KEY.to_string(), document.activities),
        (SETTINGS_STORAGE_KEY.to_string(), document.settings),
        (Member::storage_key(), document.members),
    ];

    // serialize everything before the first write
    let mut pending = Vec::with_capacity(entries.len());
    for (key, value) in entries {
        let serialized = match value {
            None => continue,
            Some(Value::String(blob)) => blob,
            Some(value) => serde_json::to_string(&value)?,
        };
        let previous = storage.get_item(&key)?;
        pending.push((key, serialized, previous));
    }

    let mut written: Vec<(String, Option<String>)> = Vec::with_capacity(pending.len());
    for (key, serialized, previous) in pending {
        if let Err(e) = storage.set_item(&key, &serialized) {
            tracing::error!("Backup import failed on {}: {}, rolling back", key, e);
            rollback(storage, &written);
            return Err(e.into());
        }
        written.push((key, previous));
    }

    let restored_keys: Vec<String> = written.into_iter().map(|(key, _)| key).collect();
    tracing::info!("Backup imported: {}", restored_keys.join(", "));
    Ok(BackupImportResult { restored_keys })
}

fn rollback(storage: &dyn KeyValueStorage, written: &[(String, Option<String>)]) {
    for (key, previous) in written.iter().rev() {
        let result = match previous {
            Some(value) => storage.set_item(key, value),
            None => storage.remove_item(key),
        };
        if let Err(e) = result {
            tracing::error!("Cannot restore {} after failed import: {}", key, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::MemoryStorage;
    use contracts::shared::settings::AppSettings;

    #[test]
    fn test_export_omits_missing_keys() {
        let storage = MemoryStorage::new();
        storage
            .set_item("task-storage", r#"{"state":{"tasks":[]},"version":0}"#)
            .unwrap();

        let document = export_backup(&storage);
        assert_eq!(document.version_str(), Some("1.0"));
        assert!(document.exported_at.is_some());
        assert!(document.tasks.is_some());
        assert!(document.projects.is_none());

        let json = serde_json::to_value(&document).unwrap();
        assert!(json.get("projects").is_none());
        assert!(json.get("exportedAt").is_some());
    }

    #[test]
    fn test_import_without_settings_keeps_settings() {
        let storage = MemoryStorage::new();
        let mut settings = AppSettings::default();
        settings.theme = "dark".into();
        persisted::save(&storage, SETTINGS_STORAGE_KEY, &settings).unwrap();

        let raw = r#"{
            "version": "1.0",
            "exportedAt": "2024-05-01T00:00:00Z",
            "tasks": {"state": {"tasks": []}, "version": 0}
        }"#;
        let result = import_backup(&storage, raw).unwrap();

        assert_eq!(result.restored_keys, vec!["task-storage".to_string()]);
        let restored: AppSettings = persisted::load_or_default(&storage, SETTINGS_STORAGE_KEY);
        assert_eq!(restored.theme, "dark");
    }

    #[test]
    fn test_malformed_document_writes_nothing() {
        let storage = MemoryStorage::new();
        storage.set_item("task-storage", "original").unwrap();

        let err = import_backup(&storage, r#"{"tasks": {"state": "#).unwrap_err();
        assert!(matches!(err, BackupError::Parse(_)));
        assert_eq!(
            storage.get_item("task-storage").unwrap().as_deref(),
            Some("original")
        );
    }

    #[test]
    fn test_export_then_import_restores_blobs() {
        let source = MemoryStorage::new();
        source
            .set_item("project-storage", r#"{"state":{"projects":[]},"version":0}"#)
            .unwrap();
        source
            .set_item("member-storage", r#"{"state":{"members":[]},"version":0}"#)
            .unwrap();
        let exported = serde_json::to_string(&export_backup(&source)).unwrap();

        let target = MemoryStorage::new();
        let result = import_backup(&target, &exported).unwrap();
        assert_eq!(result.restored_keys.len(), 2);
        assert_eq!(
            target.get_item("project-storage").unwrap(),
            source.get_item("project-storage").unwrap()
        );
    }

    #[test]
    fn test_import_accepts_loose_header() {
        let storage = MemoryStorage::new();
        let raw = r#"{
            "version": "1.0",
            "exportedAt": "2024. 5. 1. 오전 9:00:00",
            "tasks": {"state": {"tasks": []}, "version": 0}
        }"#;
        let result = import_backup(&storage, raw).unwrap();
        assert_eq!(result.restored_keys, vec!["task-storage".to_string()]);

        let raw = r#"{"version": 1.0, "projects": {"state": {"projects": []}, "version": 0}}"#;
        let result = import_backup(&storage, raw).unwrap();
        assert_eq!(result.restored_keys, vec!["project-storage".to_string()]);
    }

    #[test]
    fn test_string_blob_is_stored_verbatim() {
        let storage = MemoryStorage::new();
        let blob = r#"{"state":{"tasks":[]},"version":0}"#;
        let raw = serde_json::json!({ "version": "1.0", "tasks": blob }).to_string();

        import_backup(&storage, &raw).unwrap();
        assert_eq!(
            storage.get_item("task-storage").unwrap().as_deref(),
            Some(blob)
        );
    }

    /// Хранилище, которое отказывает в записи одного ключа
    struct FailingStorage {
        inner: MemoryStorage,
        fail_key: &'static str,
    }

    impl KeyValueStorage for FailingStorage {
        fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
            self.inner.get_item(key)
        }

        fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
            if key == self.fail_key {
                return Err(StorageError::Io {
                    key: key.to_string(),
                    source: std::io::Error::new(std::io::ErrorKind::Other, "disk full"),
                });
            }
            self.inner.set_item(key, value)
        }

        fn remove_item(&self, key: &str) -> Result<(), StorageError> {
            self.inner.remove_item(key)
        }
    }

    #[test]
    fn test_failed_write_restores_previous_values() {
        let storage = FailingStorage {
            inner: MemoryStorage::new(),
            fail_key: "activity-storage",
        };
        storage.inner.set_item("task-storage", "old-tasks").unwrap();

        let raw = r#"{
            "tasks": {"state": {"tasks": []}, "version": 0},
            "projects": {"state": {"projects": []}, "version": 0},
            "activities": {"state": {"activities": []}, "version": 0}
        }"#;
        let err = import_backup(&storage, raw).unwrap_err();

        assert!(matches!(err, BackupError::Storage(_)));
        assert_eq!(
            storage.get_item("task-storage").unwrap().as_deref(),
            Some("old-tasks")
        );
        assert_eq!(storage.get_item("project-storage").unwrap(), None);
    }
}
