use contracts::shared::settings::AppSettings;

use crate::shared::data::persisted;
use crate::shared::data::{KeyValueStorage, StorageError};

pub const SETTINGS_STORAGE_KEY: &str = "app-settings";

pub fn load(storage: &dyn KeyValueStorage) -> AppSettings {
    persisted::load_or_default(storage, SETTINGS_STORAGE_KEY)
}

pub fn persist(storage: &dyn KeyValueStorage, settings: &AppSettings) -> Result<(), StorageError> {
    persisted::save(storage, SETTINGS_STORAGE_KEY, settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::MemoryStorage;

    #[test]
    fn test_settings_survive_reload() {
        let storage = MemoryStorage::new();
        assert_eq!(load(&storage), AppSettings::default());

        let mut settings = AppSettings::default();
        settings.theme = "dark".into();
        persist(&storage, &settings).unwrap();
        assert_eq!(load(&storage).theme, "dark");
    }
}
