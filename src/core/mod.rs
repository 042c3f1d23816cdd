//! Core scheduling abstractions: items, groups, retries and the loader.

pub mod backend;
pub mod coordinator;
pub mod dispatch;
pub mod error;
pub mod events;
pub mod item;
pub mod loader;
pub mod registry;
pub mod retry;

pub use backend::LoadBackend;
pub use coordinator::{Coordinator, LoaderStats, SubmitStatus};
pub use dispatch::FairQueue;
pub use error::{AppResult, LoadError, LoaderError};
#[cfg(feature = "tokio-runtime")]
pub use events::ChannelEventSink;
pub use events::{EventSink, InMemoryEventSink, LoaderEvent, NoopEventSink};
pub use item::ResourceItem;
pub use loader::{ResourceLoader, Spawn};
pub use registry::{GroupOutcome, GroupProgress, GroupRecord, GroupRegistry};
pub use retry::{RetryDecision, RetryTracker};
