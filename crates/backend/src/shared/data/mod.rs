pub mod persisted;
pub mod storage;

pub use storage::{FileStorage, KeyValueStorage, MemoryStorage, StorageError};
