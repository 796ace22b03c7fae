//! Immutable views of the item collection.

use std::ops::Deref;
use std::sync::Arc;

use crate::item::Item;

/// The item collection at one instant.
///
/// Cloning is cheap; the items are shared. `version` increases with every
/// mutation of the owning store, so two snapshots with the same version hold
/// the same items.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    version: u64,
    items: Arc<[Item]>,
}

impl Snapshot {
    pub fn new(version: u64, items: impl Into<Arc<[Item]>>) -> Self {
        Self {
            version,
            items: items.into(),
        }
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }
}

impl Deref for Snapshot {
    type Target = [Item];

    fn deref(&self) -> &Self::Target {
        &self.items
    }
}
