//! API-facing request/response models.

use serde::{Deserialize, Serialize};

use crate::core::{LoadBackend, LoaderStats, ResourceItem, ResourceLoader, Spawn, SubmitStatus};

/// Group submission payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupSubmission {
    /// Group name.
    pub group_name: String,
    /// Items to load.
    pub items: Vec<ResourceItem>,
}

/// Coarse group state as seen by an API client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupState {
    /// Registered and not yet settled.
    Loading,
    /// Not registered: settled, rejected or never submitted.
    Idle,
}

/// Group status response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupStatusResponse {
    /// Group name.
    pub group_name: String,
    /// Current state.
    pub state: GroupState,
    /// Finished items, when loading.
    pub loaded_count: Option<usize>,
    /// Group size, when loading.
    pub total: Option<usize>,
    /// Rejection reason for a submission, if any.
    pub reason: Option<String>,
}

/// Loader snapshot for listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoaderSnapshot {
    /// Active group names in dispatch order.
    pub active_groups: Vec<String>,
    /// Counters and limits.
    pub stats: LoaderStats,
}

/// Health response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Health {
    /// Healthy flag.
    pub ok: bool,
}

/// Submit a group and report its status right after admission.
pub fn submit_group<B, S>(loader: &ResourceLoader<B, S>, req: GroupSubmission) -> GroupStatusResponse
where
    B: LoadBackend,
    S: Spawn + Send + Sync + 'static,
{
    let reason = match loader.load_group(req.items, &req.group_name) {
        SubmitStatus::Rejected(e) => Some(e.to_string()),
        SubmitStatus::Started | SubmitStatus::AlreadyLoading => None,
    };
    let mut resp = group_status(loader, &req.group_name);
    resp.reason = reason;
    resp
}

/// Report the status of one group.
pub fn group_status<B, S>(loader: &ResourceLoader<B, S>, group_name: &str) -> GroupStatusResponse
where
    B: LoadBackend,
    S: Spawn + Send + Sync + 'static,
{
    let progress = loader.group_progress(group_name);
    GroupStatusResponse {
        group_name: group_name.to_owned(),
        state: if progress.is_some() {
            GroupState::Loading
        } else {
            GroupState::Idle
        },
        loaded_count: progress.map(|(loaded, _)| loaded),
        total: progress.map(|(_, total)| total),
        reason: None,
    }
}

/// Build a loader snapshot.
pub fn snapshot<B, S>(loader: &ResourceLoader<B, S>) -> LoaderSnapshot
where
    B: LoadBackend,
    S: Spawn + Send + Sync + 'static,
{
    LoaderSnapshot {
        active_groups: loader.active_groups(),
        stats: loader.stats(),
    }
}

/// Return a health payload.
pub const fn health() -> Health {
    Health { ok: true }
}
