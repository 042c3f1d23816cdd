//! Async resource loader driving a [`Coordinator`] against a [`LoadBackend`].

use std::future::Future;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::config::{DispatchPolicy, LoaderConfig};
use crate::core::events::Outbox;
use crate::core::{
    Coordinator, EventSink, LoadBackend, LoaderStats, NoopEventSink, ResourceItem, SubmitStatus,
};

/// Abstraction for spawning load attempts on a runtime.
pub trait Spawn {
    /// Spawn an async task that returns a future.
    fn spawn<F>(&self, fut: F)
    where
        F: Future<Output = ()> + Send + 'static;
}

struct LoaderInner<B, S> {
    coordinator: Mutex<Coordinator>,
    outbox: Outbox,
    backend: B,
    spawner: S,
}

/// Group-aware resource loader with bounded concurrency and retries.
///
/// All bookkeeping sits in one [`Coordinator`] behind a `parking_lot::Mutex`.
/// Submissions and completions each run to the end under that lock, including
/// the dispatch pass that follows them, and the lock is never held across a
/// backend `.await`. Events are delivered to the sink after the lock is
/// released, so a sink may call back into the loader. Cloning the loader
/// yields another handle to the same state.
pub struct ResourceLoader<B, S> {
    inner: Arc<LoaderInner<B, S>>,
}

impl<B, S> Clone for ResourceLoader<B, S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<B, S> ResourceLoader<B, S>
where
    B: LoadBackend,
    S: Spawn + Send + Sync + 'static,
{
    /// Create a loader whose events are discarded.
    pub fn new(config: LoaderConfig, backend: B, spawner: S) -> Self {
        Self::with_event_sink(config, backend, spawner, Box::new(NoopEventSink))
    }

    /// Create a loader emitting into `sink`.
    pub fn with_event_sink(
        config: LoaderConfig,
        backend: B,
        spawner: S,
        sink: Box<dyn EventSink>,
    ) -> Self {
        Self {
            inner: Arc::new(LoaderInner {
                coordinator: Mutex::new(Coordinator::new(config)),
                outbox: Outbox::new(sink),
                backend,
                spawner,
            }),
        }
    }

    /// Submit `items` as group `group_name` and start dispatching.
    ///
    /// Rejections are also reported as a group load error event; duplicate
    /// submissions of an active group are ignored.
    pub fn load_group(&self, items: Vec<ResourceItem>, group_name: &str) -> SubmitStatus {
        let (status, ready) = self.inner.with_coordinator(|coordinator| {
            let status = coordinator.submit_group(items, group_name);
            let ready = if status.is_started() {
                coordinator.next()
            } else {
                Vec::new()
            };
            (status, ready)
        });
        LoaderInner::launch(&self.inner, ready);
        status
    }

    /// Load a single item outside any group.
    pub fn load_item(&self, item: ResourceItem) {
        let ready = self.inner.with_coordinator(|coordinator| {
            coordinator.submit_item(item);
            coordinator.next()
        });
        LoaderInner::launch(&self.inner, ready);
    }

    /// Whether `group_name` is still loading.
    pub fn is_group_in_loading(&self, group_name: &str) -> bool {
        self.inner.coordinator.lock().is_group_in_loading(group_name)
    }

    /// Change the concurrency limit and dispatch into any newly freed slots.
    pub fn set_concurrency_limit(&self, limit: usize) {
        let ready = self.inner.with_coordinator(|coordinator| {
            coordinator.set_concurrency_limit(limit);
            coordinator.next()
        });
        LoaderInner::launch(&self.inner, ready);
    }

    /// Change the retry budget for subsequent failures.
    pub fn set_max_retry_times(&self, times: u32) {
        self.inner.coordinator.lock().set_max_retry_times(times);
    }

    /// Change the group selection policy.
    pub fn set_dispatch_policy(&self, policy: DispatchPolicy) {
        self.inner.coordinator.lock().set_dispatch_policy(policy);
    }

    /// Replace the event sink. Events not yet delivered go to the new sink.
    pub fn set_event_sink(&self, sink: Box<dyn EventSink>) {
        self.inner.outbox.replace_sink(sink);
    }

    /// Finished and total item counts for an active group.
    pub fn group_progress(&self, group_name: &str) -> Option<(usize, usize)> {
        self.inner.coordinator.lock().group_progress(group_name)
    }

    /// Active group names in dispatch order.
    pub fn active_groups(&self) -> Vec<String> {
        self.inner.coordinator.lock().active_groups()
    }

    /// Snapshot of loader state and counters.
    pub fn stats(&self) -> LoaderStats {
        self.inner.coordinator.lock().stats()
    }

    /// Current configuration.
    pub fn config(&self) -> LoaderConfig {
        self.inner.coordinator.lock().config().clone()
    }

    /// Shared reference to the backend.
    pub fn backend(&self) -> &B {
        &self.inner.backend
    }
}

impl<B, S> LoaderInner<B, S>
where
    B: LoadBackend,
    S: Spawn + Send + Sync + 'static,
{
    /// Run `f` under the coordinator lock, then deliver what it emitted.
    fn with_coordinator<R>(&self, f: impl FnOnce(&mut Coordinator) -> R) -> R {
        let result = {
            let mut coordinator = self.coordinator.lock();
            let result = f(&mut coordinator);
            self.outbox.enqueue(coordinator.take_events());
            result
        };
        self.outbox.deliver();
        result
    }

    /// Hand each item to the backend on its own task.
    fn launch(inner: &Arc<Self>, items: Vec<ResourceItem>) {
        for item in items {
            let task_inner = Arc::clone(inner);
            inner.spawner.spawn(async move {
                Attempt {
                    inner: task_inner,
                    item: Some(item),
                }
                .run()
                .await;
            });
        }
    }

    fn settle(inner: &Arc<Self>, item: ResourceItem) {
        let ready = inner.with_coordinator(|coordinator| coordinator.finish(item));
        Self::launch(inner, ready);
    }
}

/// One in-flight load attempt.
///
/// If the attempt is dropped before it reports back (the backend panicked or
/// the task was cancelled), the item is settled as a failed attempt so its
/// concurrency slot is released.
struct Attempt<B, S>
where
    B: LoadBackend,
    S: Spawn + Send + Sync + 'static,
{
    inner: Arc<LoaderInner<B, S>>,
    item: Option<ResourceItem>,
}

impl<B, S> Attempt<B, S>
where
    B: LoadBackend,
    S: Spawn + Send + Sync + 'static,
{
    async fn run(mut self) {
        let Some(item) = self.item.as_ref() else {
            return;
        };
        let loaded = match self.inner.backend.load(item).await {
            Ok(payload) => {
                self.inner.backend.save(item, payload);
                tracing::debug!(item = %item.name, "item loaded");
                true
            }
            Err(e) => {
                tracing::warn!(item = %item.name, url = %item.url, error = %e, "load attempt failed");
                false
            }
        };
        if let Some(mut item) = self.item.take() {
            item.loaded = loaded;
            LoaderInner::settle(&self.inner, item);
        }
    }
}

impl<B, S> Drop for Attempt<B, S>
where
    B: LoadBackend,
    S: Spawn + Send + Sync + 'static,
{
    fn drop(&mut self) {
        if let Some(item) = self.item.take() {
            tracing::error!(item = %item.name, "load attempt aborted; counting it as failed");
            LoaderInner::settle(&self.inner, item);
        }
    }
}
