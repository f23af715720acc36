use contracts::domain::a002_task::aggregate::Task;
use contracts::domain::common::AggregateRoot;

use super::store::TaskStore;
use crate::shared::data::persisted;
use crate::shared::data::{KeyValueStorage, StorageError};

pub fn load(storage: &dyn KeyValueStorage) -> TaskStore {
    let store: TaskStore = persisted::load_or_default(storage, &Task::storage_key());
    tracing::info!(
        "Loaded {}: {} records",
        Task::full_name(),
        store.list_tasks().len()
    );
    store
}

pub fn persist(storage: &dyn KeyValueStorage, store: &TaskStore) -> Result<(), StorageError> {
    persisted::save(storage, &Task::storage_key(), store)
}
