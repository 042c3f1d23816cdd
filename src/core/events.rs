//! Outbound loader signals and sinks that receive them.
//!
//! Signals are queued while the loader state is locked and delivered after the
//! lock is released, one delivery at a time. A sink observes them in the exact
//! order bookkeeping happened and may call back into the loader from `emit`.

use std::collections::VecDeque;
use std::sync::Arc;

use parking_lot::Mutex;
use serde::Serialize;

use crate::core::item::ResourceItem;

/// A notification produced by the loader.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LoaderEvent {
    /// An item exhausted its retry budget.
    ItemLoadError {
        /// Owning group, `None` for ungrouped loads.
        group_name: Option<String>,
        /// The failed item.
        item: ResourceItem,
    },
    /// An ungrouped item loaded.
    ItemLoaded {
        /// The loaded item.
        item: ResourceItem,
    },
    /// One more item of a group finished (loaded or permanently failed).
    GroupProgress {
        /// Group name.
        group_name: String,
        /// The finished item.
        item: ResourceItem,
        /// Finished items so far.
        loaded_count: usize,
        /// Group size.
        total: usize,
    },
    /// A group settled with every item loaded.
    GroupComplete {
        /// Group name.
        group_name: String,
    },
    /// A group settled with at least one permanent failure, or was rejected
    /// at submission.
    GroupLoadError {
        /// Group name.
        group_name: String,
    },
}

impl LoaderEvent {
    /// Group this event refers to, if any.
    pub fn group_name(&self) -> Option<&str> {
        match self {
            Self::ItemLoadError { group_name, .. } => group_name.as_deref(),
            Self::ItemLoaded { .. } => None,
            Self::GroupProgress { group_name, .. }
            | Self::GroupComplete { group_name }
            | Self::GroupLoadError { group_name } => Some(group_name),
        }
    }

    /// Whether this event settles a group.
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::GroupComplete { .. } | Self::GroupLoadError { .. })
    }
}

/// Receiver of loader signals.
///
/// `emit` runs outside the loader's state lock, so it may submit more work to
/// the same loader. Signals produced by such a nested call are delivered after
/// the current `emit` returns.
pub trait EventSink: Send {
    /// Deliver one event. Must not block or panic.
    fn emit(&mut self, event: LoaderEvent);
}

/// Ordered hand-off between the coordinator and the installed sink.
///
/// Whoever finds the sink parked takes it and drains the queue; everyone else
/// only enqueues. Enqueueing happens under the coordinator lock, which fixes
/// the global order.
pub(crate) struct Outbox {
    state: Mutex<OutboxState>,
}

struct OutboxState {
    queue: VecDeque<LoaderEvent>,
    // `None` while a delivery pass holds the sink.
    sink: Option<Box<dyn EventSink>>,
    replacement: Option<Box<dyn EventSink>>,
}

impl Outbox {
    pub(crate) fn new(sink: Box<dyn EventSink>) -> Self {
        Self {
            state: Mutex::new(OutboxState {
                queue: VecDeque::new(),
                sink: Some(sink),
                replacement: None,
            }),
        }
    }

    pub(crate) fn enqueue(&self, events: Vec<LoaderEvent>) {
        if events.is_empty() {
            return;
        }
        self.state.lock().queue.extend(events);
    }

    /// Install `sink` for every event not yet delivered.
    pub(crate) fn replace_sink(&self, sink: Box<dyn EventSink>) {
        let mut state = self.state.lock();
        if state.sink.is_some() {
            state.sink = Some(sink);
        } else {
            state.replacement = Some(sink);
        }
    }

    /// Deliver queued events unless another pass is already running.
    pub(crate) fn deliver(&self) {
        let Some(mut sink) = self.state.lock().sink.take() else {
            return;
        };
        loop {
            let event = {
                let mut state = self.state.lock();
                if let Some(replacement) = state.replacement.take() {
                    sink = replacement;
                }
                match state.queue.pop_front() {
                    Some(event) => event,
                    None => {
                        state.sink = Some(sink);
                        return;
                    }
                }
            };
            sink.emit(event);
        }
    }
}

/// Sink that drops every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopEventSink;

impl EventSink for NoopEventSink {
    fn emit(&mut self, _event: LoaderEvent) {}
}

/// Bounded in-memory sink for tests and dev.
///
/// Clones share the same buffer, so a clone kept by the caller can inspect
/// what the loader recorded.
#[derive(Debug, Clone)]
pub struct InMemoryEventSink {
    events: Arc<Mutex<VecDeque<LoaderEvent>>>,
    max_events: usize,
}

impl InMemoryEventSink {
    /// Create a sink that keeps at most `max_events`, dropping the oldest.
    pub fn new(max_events: usize) -> Self {
        Self {
            events: Arc::new(Mutex::new(VecDeque::with_capacity(max_events.min(1024)))),
            max_events,
        }
    }

    /// Snapshot of recorded events, oldest first.
    pub fn events(&self) -> Vec<LoaderEvent> {
        self.events.lock().iter().cloned().collect()
    }

    /// Snapshot of events for one group.
    pub fn events_for(&self, group_name: &str) -> Vec<LoaderEvent> {
        self.events
            .lock()
            .iter()
            .filter(|e| e.group_name() == Some(group_name))
            .cloned()
            .collect()
    }

    /// Drop every recorded event.
    pub fn clear(&self) {
        self.events.lock().clear();
    }
}

impl EventSink for InMemoryEventSink {
    fn emit(&mut self, event: LoaderEvent) {
        if self.max_events == 0 {
            return;
        }
        let mut events = self.events.lock();
        if events.len() >= self.max_events {
            events.pop_front();
        }
        events.push_back(event);
    }
}

/// Sink forwarding events into an unbounded tokio channel.
#[cfg(feature = "tokio-runtime")]
#[derive(Debug, Clone)]
pub struct ChannelEventSink {
    tx: tokio::sync::mpsc::UnboundedSender<LoaderEvent>,
}

#[cfg(feature = "tokio-runtime")]
impl ChannelEventSink {
    /// Create a sink and the receiver that observes it.
    pub fn channel() -> (Self, tokio::sync::mpsc::UnboundedReceiver<LoaderEvent>) {
        let (tx, rx) = tokio::sync::mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

#[cfg(feature = "tokio-runtime")]
impl EventSink for ChannelEventSink {
    fn emit(&mut self, event: LoaderEvent) {
        if self.tx.send(event).is_err() {
            tracing::debug!("event receiver dropped; discarding loader event");
        }
    }
}
