//! Error types for loader operations.

use thiserror::Error;

/// Errors produced while admitting work or configuring the loader.
///
/// Item and group failures are never returned through this type; they are
/// reported as [`LoaderEvent`](crate::core::LoaderEvent)s.
#[derive(Debug, Error)]
pub enum LoaderError {
    /// A group was submitted without any items.
    #[error("group `{0}` has no items")]
    EmptyGroup(String),
    /// A group was submitted with an empty name.
    #[error("group name is empty")]
    MissingGroupName,
    /// Configuration failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    /// No async runtime was available to run backend loads on.
    #[error("runtime unavailable: {0}")]
    Runtime(String),
}

/// Failure of a single backend load attempt.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The backend has no resource at the item's url.
    #[error("resource not found: {0}")]
    NotFound(String),
    /// I/O failure while reading the resource.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    /// Backend-specific failure with context.
    #[error("backend error: {0}")]
    Backend(String),
}

/// Application-facing result using anyhow for higher-level contexts.
pub type AppResult<T> = Result<T, anyhow::Error>;
