use contracts::domain::a003_member::aggregate::Member;
use contracts::domain::common::AggregateRoot;

use super::store::MemberStore;
use crate::shared::data::persisted;
use crate::shared::data::{KeyValueStorage, StorageError};

pub fn load(storage: &dyn KeyValueStorage) -> MemberStore {
    let store: MemberStore = persisted::load_or_default(storage, &Member::storage_key());
    tracing::info!(
        "Loaded {}: {} records",
        Member::full_name(),
        store.list_members().len()
    );
    store
}

pub fn persist(storage: &dyn KeyValueStorage, store: &MemberStore) -> Result<(), StorageError> {
    persisted::save(storage, &Member::storage_key(), store)
}
