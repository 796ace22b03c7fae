//! The canonical item collection.
//!
//! [`ItemStore`] owns the ordered list of items and is the only place it
//! changes. Each mutation builds a new list (the previous [`Snapshot`] stays
//! valid for whoever holds it), bumps the version, writes the list to the
//! storage backend, and then notifies subscribers.
//!
//! # Startup
//!
//! [`ItemStore::open`] reads the stored payload. When nothing is stored, or
//! the payload cannot be read or parsed, the supplied seed items are used
//! instead and written back. A bad payload is logged, never fatal.

use std::fmt;

use basket_model::{Item, Snapshot};
use tracing::{debug, info, warn};

use crate::error::{LoadError, StoreError};
use crate::storage::KeyValueStorage;

/// Callback invoked with the new snapshot after every mutation.
pub type Listener = Box<dyn FnMut(&Snapshot)>;

/// Handle returned by [`ItemStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Where the initial collection came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadSource {
    /// Parsed from storage.
    Stored,
    /// Nothing was stored; seed items were used.
    Seed,
    /// The stored payload was unusable; seed items were used.
    Recovered { reason: String },
}

pub struct ItemStore<S> {
    storage: S,
    key: String,
    snapshot: Snapshot,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
    persist_failures: usize,
    load_source: LoadSource,
}

impl<S: KeyValueStorage> ItemStore<S> {
    /// Load the collection stored under `key`, falling back to `seed`.
    pub fn open(storage: S, key: impl Into<String>, seed: Vec<Item>) -> Self {
        let key = key.into();
        let (items, load_source) = match load_items(&storage, &key) {
            Ok(Some(items)) => {
                info!(key = %key, items = items.len(), "loaded stored item list");
                (items, LoadSource::Stored)
            }
            Ok(None) => {
                info!(key = %key, items = seed.len(), "no stored item list, using seed data");
                (seed, LoadSource::Seed)
            }
            Err(error) => {
                warn!(key = %key, %error, "stored item list unusable, using seed data");
                (
                    seed,
                    LoadSource::Recovered {
                        reason: error.to_string(),
                    },
                )
            }
        };
        let mut store = Self {
            storage,
            key,
            snapshot: Snapshot::new(0, items),
            listeners: Vec::new(),
            next_subscription: 0,
            persist_failures: 0,
            load_source,
        };
        if store.load_source != LoadSource::Stored {
            store.persist();
        }
        store
    }

    /// Prepend a validated item.
    pub fn add(&mut self, item: Item) {
        let mut items = Vec::with_capacity(self.snapshot.len() + 1);
        items.push(item);
        items.extend(self.snapshot.iter().cloned());
        self.commit(items, "add");
    }

    /// Remove and return the item at `index`.
    pub fn remove(&mut self, index: usize) -> Result<Item, StoreError> {
        self.check_index(index)?;
        let mut items = self.snapshot.to_vec();
        let removed = items.remove(index);
        self.commit(items, "remove");
        Ok(removed)
    }

    /// Replace the item at `index`, returning the previous one.
    pub fn update(&mut self, index: usize, item: Item) -> Result<Item, StoreError> {
        self.check_index(index)?;
        let mut items = self.snapshot.to_vec();
        let previous = std::mem::replace(&mut items[index], item);
        self.commit(items, "update");
        Ok(previous)
    }

    /// Remove every item.
    pub fn clear(&mut self) {
        self.commit(Vec::new(), "clear");
    }

    /// The current collection. Later mutations do not affect it.
    pub fn snapshot(&self) -> Snapshot {
        self.snapshot.clone()
    }

    pub fn items(&self) -> &[Item] {
        self.snapshot.items()
    }

    pub fn len(&self) -> usize {
        self.snapshot.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshot.is_empty()
    }

    pub fn version(&self) -> u64 {
        self.snapshot.version()
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn load_source(&self) -> &LoadSource {
        &self.load_source
    }

    /// Number of writes that failed since the store was opened.
    pub fn persist_failures(&self) -> usize {
        self.persist_failures
    }

    /// Register a listener called with every new snapshot.
    pub fn subscribe(&mut self, listener: impl FnMut(&Snapshot) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Drop a listener. Returns false when `id` was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    fn check_index(&self, index: usize) -> Result<(), StoreError> {
        let len = self.snapshot.len();
        if index >= len {
            return Err(StoreError::IndexOutOfBounds { index, len });
        }
        Ok(())
    }

    fn commit(&mut self, items: Vec<Item>, operation: &'static str) {
        let version = self.snapshot.version() + 1;
        self.snapshot = Snapshot::new(version, items);
        debug!(operation, version, items = self.snapshot.len(), "item list changed");
        self.persist();
        for (_, listener) in &mut self.listeners {
            listener(&self.snapshot);
        }
    }

    fn persist(&mut self) {
        let payload = match serde_json::to_string(self.snapshot.items()) {
            Ok(payload) => payload,
            Err(error) => {
                self.persist_failures += 1;
                warn!(key = %self.key, %error, "failed to encode item list");
                return;
            }
        };
        if let Err(error) = self.storage.write(&self.key, &payload) {
            self.persist_failures += 1;
            warn!(key = %self.key, %error, "failed to save item list");
        }
    }
}

impl<S> fmt::Debug for ItemStore<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ItemStore")
            .field("key", &self.key)
            .field("version", &self.snapshot.version())
            .field("items", &self.snapshot.len())
            .field("listeners", &self.listeners.len())
            .field("load_source", &self.load_source)
            .finish_non_exhaustive()
    }
}

fn load_items<S: KeyValueStorage>(storage: &S, key: &str) -> Result<Option<Vec<Item>>, LoadError> {
    let Some(payload) = storage.read(key)? else {
        return Ok(None);
    };
    let items: Vec<Item> = serde_json::from_str(&payload)?;
    Ok(Some(items))
}
