use contracts::domain::a001_project::aggregate::Project;
use contracts::domain::common::AggregateRoot;

use super::store::ProjectStore;
use crate::shared::data::persisted;
use crate::shared::data::{KeyValueStorage, StorageError};

pub fn load(storage: &dyn KeyValueStorage) -> ProjectStore {
    let store: ProjectStore = persisted::load_or_default(storage, &Project::storage_key());
    tracing::info!(
        "Loaded {}: {} records",
        Project::full_name(),
        store.list_projects().len()
    );
    store
}

pub fn persist(storage: &dyn KeyValueStorage, store: &ProjectStore) -> Result<(), StorageError> {
    persisted::save(storage, &Project::storage_key(), store)
}
