//! Infrastructure adapters for load backends and result stores.

pub mod backend;
pub mod store;
#[cfg(feature = "tokio-runtime")]
pub use backend::FileSystemBackend;
pub use backend::InMemoryBackend;
pub use store::ResourceStore;
