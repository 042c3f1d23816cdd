//! Load backends.

#[cfg(feature = "tokio-runtime")]
pub mod fs;
pub mod memory;

#[cfg(feature = "tokio-runtime")]
pub use fs::FileSystemBackend;
pub use memory::InMemoryBackend;
