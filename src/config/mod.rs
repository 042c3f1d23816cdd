//! Configuration models for the loader.

pub mod loader;

pub use loader::{DispatchPolicy, LoaderConfig};
