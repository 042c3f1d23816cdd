//! In-memory backend with scripted failures, for development and testing.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::{Mutex, RwLock};

use crate::core::{LoadBackend, LoadError, ResourceItem};
use crate::infra::store::ResourceStore;

/// Backend serving bytes from a url → content map.
///
/// Failures can be injected per item name with [`fail_times`](Self::fail_times);
/// each injected failure is consumed by one load attempt.
#[derive(Debug, Clone, Default)]
pub struct InMemoryBackend {
    sources: Arc<RwLock<HashMap<String, Vec<u8>>>>,
    failures: Arc<Mutex<HashMap<String, u32>>>,
    latency: Option<Duration>,
    store: ResourceStore,
}

impl InMemoryBackend {
    /// Create an empty backend with its own store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty backend saving into `store`.
    pub fn with_store(store: ResourceStore) -> Self {
        Self {
            store,
            ..Self::default()
        }
    }

    /// Delay every load by `latency`.
    #[must_use]
    pub const fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Serve `bytes` for `url`.
    pub fn insert(&self, url: impl Into<String>, bytes: impl Into<Vec<u8>>) {
        self.sources.write().insert(url.into(), bytes.into());
    }

    /// Make the next `times` loads of item `name` fail.
    pub fn fail_times(&self, name: impl Into<String>, times: u32) {
        self.failures.lock().insert(name.into(), times);
    }

    /// Store that successful loads are saved into.
    pub const fn store(&self) -> &ResourceStore {
        &self.store
    }

    #[cfg(feature = "tokio-runtime")]
    async fn delay(&self) {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
    }

    #[cfg(not(feature = "tokio-runtime"))]
    #[allow(clippy::unused_async)]
    async fn delay(&self) {}

    fn take_failure(&self, name: &str) -> bool {
        let mut failures = self.failures.lock();
        match failures.get_mut(name) {
            Some(remaining) if *remaining > 0 => {
                *remaining -= 1;
                true
            }
            _ => false,
        }
    }
}

#[async_trait]
impl LoadBackend for InMemoryBackend {
    type Payload = Vec<u8>;

    async fn load(&self, item: &ResourceItem) -> Result<Vec<u8>, LoadError> {
        self.delay().await;
        if self.take_failure(&item.name) {
            return Err(LoadError::Backend(format!("injected failure for `{}`", item.name)));
        }
        self.sources
            .read()
            .get(&item.url)
            .cloned()
            .ok_or_else(|| LoadError::NotFound(item.url.clone()))
    }

    fn save(&self, item: &ResourceItem, payload: Vec<u8>) {
        self.store.insert(item, payload);
    }
}
