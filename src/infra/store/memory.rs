//! In-memory store for loaded resource bytes.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::core::ResourceItem;
use crate::util::clock::now_ms;

/// A saved resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredResource {
    /// Resource type tag copied from the item.
    pub kind: String,
    /// Location the bytes came from.
    pub url: String,
    /// Raw content.
    pub bytes: Arc<[u8]>,
    /// Timestamp milliseconds.
    pub saved_at_ms: u128,
}

/// Shared name → resource map backends save into.
///
/// Clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct ResourceStore {
    entries: Arc<RwLock<HashMap<String, StoredResource>>>,
}

impl ResourceStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Save `bytes` under the item's name, replacing any previous entry.
    pub fn insert(&self, item: &ResourceItem, bytes: Vec<u8>) {
        let entry = StoredResource {
            kind: item.kind.clone(),
            url: item.url.clone(),
            bytes: bytes.into(),
            saved_at_ms: now_ms(),
        };
        self.entries.write().insert(item.name.clone(), entry);
    }

    /// Saved resource for `name`.
    pub fn get(&self, name: &str) -> Option<StoredResource> {
        self.entries.read().get(name).cloned()
    }

    /// Whether `name` has been saved.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.read().contains_key(name)
    }

    /// Drop the entry for `name`.
    pub fn remove(&self, name: &str) -> Option<StoredResource> {
        self.entries.write().remove(name)
    }

    /// Saved resource names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.entries.read().keys().cloned().collect();
        names.sort();
        names
    }

    /// Number of saved resources.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Whether nothing has been saved.
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}
