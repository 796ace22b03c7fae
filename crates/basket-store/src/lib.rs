#![deny(unsafe_code)]

pub mod error;
pub mod seed;
pub mod storage;
pub mod store;

pub use crate::error::{LoadError, StorageError, StoreError};
pub use crate::seed::bundled_items;
pub use crate::storage::{DEFAULT_STORAGE_KEY, FileStorage, KeyValueStorage, MemoryStorage};
pub use crate::store::{ItemStore, Listener, LoadSource, SubscriptionId};
