//! Persisted state envelope: `{"state": <store state>, "version": 0}`.
//!
//! Loading never fails: a missing key or an unparsable value yields the
//! default state (logged at `warn`).

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;

use super::storage::{KeyValueStorage, StorageError};

/// Current version of the persisted state format
pub const STATE_VERSION: u32 = 0;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersistedState<T> {
    pub state: T,
    #[serde(default)]
    pub version: u32,
}

/// Load the state stored under `key`, falling back to `T::default()`
pub fn load_or_default<T>(storage: &dyn KeyValueStorage, key: &str) -> T
where
    T: DeserializeOwned + Default,
{
    let raw = match storage.get_item(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            tracing::debug!("No persisted state for {}, using default", key);
            return T::default();
        }
        Err(e) => {
            tracing::warn!("Cannot read {}: {}, using default", key, e);
            return T::default();
        }
    };

    match serde_json::from_str::<PersistedState<T>>(&raw) {
        Ok(persisted) => persisted.state,
        Err(e) => {
            tracing::warn!("Corrupted state under {}: {}, using default", key, e);
            T::default()
        }
    }
}

/// Store `state` under `key`
pub fn save<T: Serialize>(
    storage: &dyn KeyValueStorage,
    key: &str,
    state: &T,
) -> Result<(), StorageError> {
    let persisted = PersistedState {
        state,
        version: STATE_VERSION,
    };
    let raw = serde_json::to_string(&persisted).map_err(|source| StorageError::Serialize {
        key: key.to_string(),
        source,
    })?;
    storage.set_item(key, &raw)
}

/// Raw parsed value under `key` (used by backup export); `None` if missing or not JSON
pub fn load_raw(storage: &dyn KeyValueStorage, key: &str) -> Option<Value> {
    let raw = storage.get_item(key).ok().flatten()?;
    match serde_json::from_str::<Value>(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!("Skipping unparsable {} in export: {}", key, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::storage::MemoryStorage;

    #[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
    struct Counter {
        value: u32,
    }

    #[test]
    fn test_save_then_load() {
        let storage = MemoryStorage::new();
        save(&storage, "counter", &Counter { value: 7 }).unwrap();
        let raw = storage.get_item("counter").unwrap().unwrap();
        assert_eq!(raw, r#"{"state":{"value":7},"version":0}"#);
        let loaded: Counter = load_or_default(&storage, "counter");
        assert_eq!(loaded, Counter { value: 7 });
    }

    #[test]
    fn test_missing_and_corrupted_fall_back_to_default() {
        let storage = MemoryStorage::new();
        let missing: Counter = load_or_default(&storage, "counter");
        assert_eq!(missing, Counter::default());

        storage.set_item("counter", "{not json").unwrap();
        let corrupted: Counter = load_or_default(&storage, "counter");
        assert_eq!(corrupted, Counter::default());
        assert!(load_raw(&storage, "counter").is_none());
    }
}
