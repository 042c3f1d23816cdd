//! Backend abstraction that performs the actual resource fetch.

use async_trait::async_trait;

use super::{LoadError, ResourceItem};

/// Collaborator that fetches and registers resources.
///
/// The loader calls [`load`](LoadBackend::load) for every attempt, up to the
/// configured concurrency limit at once, and calls
/// [`save`](LoadBackend::save) exactly once after each successful attempt.
/// Expected failures are reported through the returned `Err`; a backend
/// should not panic on them. A panic inside `load` or `save` is logged and
/// counted as a failed attempt, so the item goes through the normal retry path.
///
/// # Example
///
/// ```rust,ignore
/// use async_trait::async_trait;
/// use group_loader::core::{LoadBackend, LoadError, ResourceItem};
///
/// struct HttpBackend {
///     client: reqwest::Client,
/// }
///
/// #[async_trait]
/// impl LoadBackend for HttpBackend {
///     type Payload = Vec<u8>;
///
///     async fn load(&self, item: &ResourceItem) -> Result<Vec<u8>, LoadError> {
///         let resp = self.client.get(&item.url).send().await
///             .map_err(|e| LoadError::Backend(e.to_string()))?;
///         let bytes = resp.bytes().await.map_err(|e| LoadError::Backend(e.to_string()))?;
///         Ok(bytes.to_vec())
///     }
///
///     fn save(&self, item: &ResourceItem, payload: Vec<u8>) {
///         // register decoded content under item.name
///     }
/// }
/// ```
#[async_trait]
pub trait LoadBackend: Send + Sync + 'static {
    /// Raw result of a successful load.
    type Payload: Send + 'static;

    /// Fetch the resource described by `item`.
    async fn load(&self, item: &ResourceItem) -> Result<Self::Payload, LoadError>;

    /// Persist a successful result under the item's identity.
    fn save(&self, item: &ResourceItem, payload: Self::Payload);
}
