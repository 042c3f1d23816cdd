//! Resource item model.

use serde::{Deserialize, Serialize};

/// A single schedulable unit of load work.
///
/// Items are built by the caller with their identity already resolved. The
/// loader stamps `group_name` on admission and flips `loaded` once the backend
/// reports success; nothing else is touched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceItem {
    /// Unique item name, used as the retry identity.
    pub name: String,
    /// Location handed to the backend.
    pub url: String,
    /// Resource type tag (e.g. `image`, `json`), opaque to the loader.
    pub kind: String,
    /// Owning group, set when the item is submitted as part of a group.
    #[serde(default)]
    pub group_name: Option<String>,
    /// Whether a load of this item has succeeded.
    #[serde(default)]
    pub loaded: bool,
}

impl ResourceItem {
    /// Create a new, not-yet-loaded item with no group.
    pub fn new(name: impl Into<String>, url: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            kind: kind.into(),
            group_name: None,
            loaded: false,
        }
    }

    /// Owning group name, if any.
    pub fn group(&self) -> Option<&str> {
        self.group_name.as_deref()
    }
}
