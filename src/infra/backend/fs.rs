//! Filesystem backend reading resources relative to a root directory.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::core::{LoadBackend, LoadError, ResourceItem};
use crate::infra::store::ResourceStore;

/// Backend that reads `root/<item.url>` with `tokio::fs`.
#[derive(Debug, Clone)]
pub struct FileSystemBackend {
    root: PathBuf,
    store: ResourceStore,
}

impl FileSystemBackend {
    /// Create a backend rooted at `root` with its own store.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::with_store(root, ResourceStore::new())
    }

    /// Create a backend rooted at `root` saving into `store`.
    pub fn with_store(root: impl Into<PathBuf>, store: ResourceStore) -> Self {
        Self {
            root: root.into(),
            store,
        }
    }

    /// Root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Store that successful loads are saved into.
    pub const fn store(&self) -> &ResourceStore {
        &self.store
    }
}

#[async_trait]
impl LoadBackend for FileSystemBackend {
    type Payload = Vec<u8>;

    async fn load(&self, item: &ResourceItem) -> Result<Vec<u8>, LoadError> {
        let path = self.root.join(&item.url);
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(LoadError::NotFound(item.url.clone())),
            Err(e) => Err(LoadError::Io(e)),
        }
    }

    fn save(&self, item: &ResourceItem, payload: Vec<u8>) {
        self.store.insert(item, payload);
    }
}
