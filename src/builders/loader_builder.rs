//! Builder to construct a [`ResourceLoader`] from configuration.

use crate::config::LoaderConfig;
use anyhow::Context;

use crate::core::{
    AppResult, EventSink, LoadBackend, LoaderError, NoopEventSink, ResourceLoader, Spawn,
};
#[cfg(feature = "tokio-runtime")]
use crate::runtime::TokioSpawner;

/// Fluent builder for [`ResourceLoader`].
///
/// ```rust,ignore
/// use group_loader::builders::LoaderBuilder;
/// use group_loader::infra::InMemoryBackend;
///
/// let loader = LoaderBuilder::new(InMemoryBackend::new())
///     .concurrency_limit(4)
///     .max_retry_times(1)
///     .build()?;
/// ```
pub struct LoaderBuilder<B> {
    backend: B,
    config: LoaderConfig,
    sink: Box<dyn EventSink>,
}

impl<B: LoadBackend> LoaderBuilder<B> {
    /// Start a builder with default configuration.
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            config: LoaderConfig::default(),
            sink: Box::new(NoopEventSink),
        }
    }

    /// Start a builder configured from `GROUP_LOADER_*` environment variables.
    pub fn from_env(backend: B) -> AppResult<Self> {
        let config = LoaderConfig::from_env()
            .map_err(anyhow::Error::msg)
            .context("loading loader configuration from environment")?;
        Ok(Self::new(backend).config(config))
    }

    /// Replace the whole configuration.
    #[must_use]
    pub fn config(mut self, config: LoaderConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the concurrency limit.
    #[must_use]
    pub fn concurrency_limit(mut self, limit: usize) -> Self {
        self.config.concurrency_limit = limit;
        self
    }

    /// Set the retry budget.
    #[must_use]
    pub fn max_retry_times(mut self, times: u32) -> Self {
        self.config.max_retry_times = times;
        self
    }

    /// Route events into `sink`.
    #[must_use]
    pub fn event_sink(mut self, sink: impl EventSink + 'static) -> Self {
        self.sink = Box::new(sink);
        self
    }

    /// Configuration the loader will be built with.
    pub const fn current_config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Validate the configuration and build a loader on `spawner`.
    pub fn build_with<S>(self, spawner: S) -> Result<ResourceLoader<B, S>, LoaderError>
    where
        S: Spawn + Send + Sync + 'static,
    {
        self.config.validate().map_err(LoaderError::InvalidConfig)?;
        tracing::debug!(
            concurrency_limit = self.config.concurrency_limit,
            max_retry_times = self.config.max_retry_times,
            "building resource loader"
        );
        Ok(ResourceLoader::with_event_sink(
            self.config,
            self.backend,
            spawner,
            self.sink,
        ))
    }

    /// Build a loader on the current tokio runtime.
    #[cfg(feature = "tokio-runtime")]
    pub fn build(self) -> Result<ResourceLoader<B, TokioSpawner>, LoaderError> {
        let spawner = TokioSpawner::try_current()
            .ok_or_else(|| LoaderError::Runtime("not inside a tokio runtime".into()))?;
        self.build_with(spawner)
    }
}
