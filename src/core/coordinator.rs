//! Single-owner scheduling state: admission, selection and completion handling.
//!
//! The coordinator never awaits. [`Coordinator::next`] hands back the items that
//! should be sent to the backend; the caller launches them and feeds each one
//! back through [`Coordinator::finish`] once its load attempt settles.
//!
//! Signals are buffered in bookkeeping order and handed out by
//! [`Coordinator::take_events`], so the caller can deliver them after it lets
//! go of whatever lock guards the coordinator.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::config::{DispatchPolicy, LoaderConfig};
use crate::core::error::LoaderError;
use crate::core::events::LoaderEvent;
use crate::core::item::ResourceItem;
use crate::core::registry::{GroupOutcome, GroupRegistry};
use crate::core::retry::{RetryDecision, RetryTracker};

/// Outcome of a group submission.
#[derive(Debug)]
pub enum SubmitStatus {
    /// The group was registered and dispatch started.
    Started,
    /// A group with this name is still loading; nothing changed.
    AlreadyLoading,
    /// The submission was rejected and a group load error was emitted.
    Rejected(LoaderError),
}

impl SubmitStatus {
    /// Whether the group was registered by this call.
    pub const fn is_started(&self) -> bool {
        matches!(self, Self::Started)
    }
}

/// Snapshot of loader state and lifetime counters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoaderStats {
    /// Loads currently handed to the backend.
    pub in_flight: usize,
    /// Registered groups.
    pub active_groups: usize,
    /// Items waiting in group queues.
    pub pending_items: usize,
    /// Failed items waiting to be retried.
    pub queued_retries: usize,
    /// Ungrouped items waiting to be dispatched.
    pub queued_ungrouped: usize,
    /// Configured concurrency limit.
    pub concurrency_limit: usize,
    /// Configured retry budget.
    pub max_retry_times: u32,
    /// Items that loaded successfully.
    pub items_loaded: u64,
    /// Items that failed permanently.
    pub items_failed: u64,
    /// Failed attempts that were requeued.
    pub retries_scheduled: u64,
    /// Groups that settled without errors.
    pub groups_completed: u64,
    /// Groups that settled with errors or were rejected.
    pub groups_failed: u64,
}

#[derive(Debug, Default)]
struct Counters {
    items_loaded: u64,
    items_failed: u64,
    retries_scheduled: u64,
    groups_completed: u64,
    groups_failed: u64,
}

/// Owner of every piece of scheduling bookkeeping.
pub struct Coordinator {
    config: LoaderConfig,
    registry: GroupRegistry,
    retries: RetryTracker,
    failed: VecDeque<ResourceItem>,
    ungrouped: VecDeque<ResourceItem>,
    in_flight: usize,
    counters: Counters,
    outbox: Vec<LoaderEvent>,
}

impl std::fmt::Debug for Coordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Coordinator")
            .field("config", &self.config)
            .field("registry", &self.registry)
            .field("retries", &self.retries)
            .field("failed", &self.failed.len())
            .field("ungrouped", &self.ungrouped.len())
            .field("in_flight", &self.in_flight)
            .field("buffered_events", &self.outbox.len())
            .finish_non_exhaustive()
    }
}

impl Coordinator {
    /// Create an idle coordinator.
    pub fn new(config: LoaderConfig) -> Self {
        Self {
            registry: GroupRegistry::new(config.dispatch_policy),
            config,
            retries: RetryTracker::new(),
            failed: VecDeque::new(),
            ungrouped: VecDeque::new(),
            in_flight: 0,
            counters: Counters::default(),
            outbox: Vec::new(),
        }
    }

    /// Drain the signals produced since the last call, oldest first.
    pub fn take_events(&mut self) -> Vec<LoaderEvent> {
        std::mem::take(&mut self.outbox)
    }

    /// Admit a group.
    ///
    /// Empty names and empty item lists are rejected with a group load error.
    /// Re-submitting a name that is still loading changes nothing.
    pub fn submit_group(&mut self, items: Vec<ResourceItem>, group_name: &str) -> SubmitStatus {
        if group_name.is_empty() {
            tracing::warn!("rejected group submission without a name");
            return self.reject(group_name, LoaderError::MissingGroupName);
        }
        if self.registry.contains(group_name) {
            tracing::debug!(group = group_name, "group already loading; ignoring submission");
            return SubmitStatus::AlreadyLoading;
        }
        if items.is_empty() {
            tracing::warn!(group = group_name, "rejected empty group");
            return self.reject(group_name, LoaderError::EmptyGroup(group_name.to_owned()));
        }

        let items: Vec<ResourceItem> = items
            .into_iter()
            .map(|mut item| {
                item.group_name = Some(group_name.to_owned());
                item
            })
            .collect();
        tracing::info!(group = group_name, total = items.len(), "group admitted");
        self.registry.register(group_name, items);
        SubmitStatus::Started
    }

    /// Queue one item outside any group.
    pub fn submit_item(&mut self, mut item: ResourceItem) {
        item.group_name = None;
        tracing::debug!(item = %item.name, "ungrouped item queued");
        self.ungrouped.push_back(item);
    }

    /// Whether `group_name` is registered and not yet settled.
    pub fn is_group_in_loading(&self, group_name: &str) -> bool {
        self.registry.contains(group_name)
    }

    /// Fill free concurrency slots and return the items to hand to the backend.
    ///
    /// Items that are already marked loaded complete inline without a backend
    /// call.
    pub fn next(&mut self) -> Vec<ResourceItem> {
        let mut ready = Vec::new();
        while self.in_flight < self.config.concurrency_limit {
            let Some(item) = self.select() else {
                break;
            };
            self.in_flight += 1;
            if item.loaded {
                tracing::debug!(item = %item.name, "item already loaded; completing inline");
                self.complete(item);
            } else {
                tracing::debug!(item = %item.name, in_flight = self.in_flight, "dispatching item");
                ready.push(item);
            }
        }
        ready
    }

    /// Pick the next item: retries first, then ungrouped items, then the
    /// fair queue.
    fn select(&mut self) -> Option<ResourceItem> {
        if let Some(item) = self.failed.pop_front() {
            return Some(item);
        }
        if let Some(item) = self.ungrouped.pop_front() {
            return Some(item);
        }
        self.registry.pop_next()
    }

    /// Fold a finished attempt into bookkeeping and refill the pipeline.
    pub fn finish(&mut self, item: ResourceItem) -> Vec<ResourceItem> {
        self.complete(item);
        self.next()
    }

    fn complete(&mut self, item: ResourceItem) {
        self.in_flight = self.in_flight.saturating_sub(1);

        if item.loaded {
            self.retries.clear(&item.name);
            self.counters.items_loaded += 1;
        } else {
            match self.retries.record_failure(&item.name, self.config.max_retry_times) {
                RetryDecision::Retry { attempt } => {
                    tracing::debug!(item = %item.name, attempt, "requeueing failed item");
                    self.counters.retries_scheduled += 1;
                    self.failed.push_back(item);
                    return;
                }
                RetryDecision::Exhausted { attempts } => {
                    tracing::warn!(item = %item.name, attempts, "item failed permanently");
                    self.counters.items_failed += 1;
                    self.outbox.push(LoaderEvent::ItemLoadError {
                        group_name: item.group_name.clone(),
                        item: item.clone(),
                    });
                }
            }
        }

        let Some(group_name) = item.group_name.clone() else {
            if item.loaded {
                self.outbox.push(LoaderEvent::ItemLoaded { item });
            }
            return;
        };

        let Some(progress) = self.registry.record_completion(&group_name, !item.loaded) else {
            tracing::warn!(group = %group_name, item = %item.name, "completion for unknown group");
            return;
        };

        self.outbox.push(LoaderEvent::GroupProgress {
            group_name: group_name.clone(),
            item,
            loaded_count: progress.loaded_count,
            total: progress.total,
        });

        match progress.outcome {
            Some(GroupOutcome::Complete) => {
                tracing::info!(group = %group_name, total = progress.total, "group complete");
                self.counters.groups_completed += 1;
                self.outbox.push(LoaderEvent::GroupComplete { group_name });
            }
            Some(GroupOutcome::LoadError) => {
                tracing::warn!(group = %group_name, total = progress.total, "group settled with errors");
                self.counters.groups_failed += 1;
                self.outbox.push(LoaderEvent::GroupLoadError { group_name });
            }
            None => {}
        }
    }

    fn reject(&mut self, group_name: &str, err: LoaderError) -> SubmitStatus {
        self.counters.groups_failed += 1;
        self.outbox.push(LoaderEvent::GroupLoadError {
            group_name: group_name.to_owned(),
        });
        SubmitStatus::Rejected(err)
    }

    /// Change the concurrency limit. Loads already in flight are unaffected.
    pub fn set_concurrency_limit(&mut self, limit: usize) {
        self.config.concurrency_limit = limit;
    }

    /// Change the retry budget for subsequent failures.
    pub fn set_max_retry_times(&mut self, times: u32) {
        self.config.max_retry_times = times;
    }

    /// Change the group selection policy.
    pub fn set_dispatch_policy(&mut self, policy: DispatchPolicy) {
        self.config.dispatch_policy = policy;
        self.registry.set_policy(policy);
    }

    /// Current configuration.
    pub const fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Loads currently outstanding.
    pub const fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Active group names in dispatch order.
    pub fn active_groups(&self) -> Vec<String> {
        self.registry.active_groups().to_vec()
    }

    /// Finished and total item counts for an active group.
    pub fn group_progress(&self, group_name: &str) -> Option<(usize, usize)> {
        self.registry
            .get(group_name)
            .map(|g| (g.loaded_count, g.total))
    }

    /// Snapshot of state and counters.
    pub fn stats(&self) -> LoaderStats {
        LoaderStats {
            in_flight: self.in_flight,
            active_groups: self.registry.len(),
            pending_items: self.registry.pending_items(),
            queued_retries: self.failed.len(),
            queued_ungrouped: self.ungrouped.len(),
            concurrency_limit: self.config.concurrency_limit,
            max_retry_times: self.config.max_retry_times,
            items_loaded: self.counters.items_loaded,
            items_failed: self.counters.items_failed,
            retries_scheduled: self.counters.retries_scheduled,
            groups_completed: self.counters.groups_completed,
            groups_failed: self.counters.groups_failed,
        }
    }
}
