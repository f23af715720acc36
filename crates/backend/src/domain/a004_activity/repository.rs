use contracts::domain::a004_activity::aggregate::ACTIVITY_STORAGE_KEY;

use super::store::ActivityStore;
use crate::shared::data::persisted;
use crate::shared::data::{KeyValueStorage, StorageError};

pub fn load(storage: &dyn KeyValueStorage) -> ActivityStore {
    let store: ActivityStore = persisted::load_or_default(storage, ACTIVITY_STORAGE_KEY);
    // persisted data may predate the cap
    let store = ActivityStore::from_activities(store.iter().cloned().collect::<Vec<_>>());
    tracing::info!("Loaded {} activity records", store.len());
    store
}

pub fn persist(storage: &dyn KeyValueStorage, store: &ActivityStore) -> Result<(), StorageError> {
    persisted::save(storage, ACTIVITY_STORAGE_KEY, store)
}
