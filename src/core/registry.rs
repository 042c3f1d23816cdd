//! Group registry: one owned record per in-flight group.

use std::collections::{HashMap, VecDeque};

use crate::config::DispatchPolicy;
use crate::core::dispatch::FairQueue;
use crate::core::item::ResourceItem;

/// Bookkeeping for one registered group.
#[derive(Debug)]
pub struct GroupRecord {
    /// Item count at submission.
    pub total: usize,
    /// Items that have finished (loaded or permanently failed).
    pub loaded_count: usize,
    /// Set once any member item fails permanently.
    pub has_error: bool,
    /// Items not yet dispatched, in submission order.
    pub pending: VecDeque<ResourceItem>,
}

/// How a group settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupOutcome {
    /// Every item loaded.
    Complete,
    /// At least one item failed permanently.
    LoadError,
}

/// Result of folding one finished item into its group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupProgress {
    /// Finished items so far, including this one.
    pub loaded_count: usize,
    /// Group size.
    pub total: usize,
    /// Set when this completion settled the group.
    pub outcome: Option<GroupOutcome>,
}

/// Registry of active groups plus the fair queue used to pick between them.
///
/// A group's record and its queue entry are created together and purged
/// together when it settles.
#[derive(Debug, Default)]
pub struct GroupRegistry {
    groups: HashMap<String, GroupRecord>,
    queue: FairQueue,
}

impl GroupRegistry {
    /// Create an empty registry.
    pub fn new(policy: DispatchPolicy) -> Self {
        Self {
            groups: HashMap::new(),
            queue: FairQueue::new(policy),
        }
    }

    /// Register a group. Returns false if the name is already active.
    pub fn register(&mut self, name: &str, items: Vec<ResourceItem>) -> bool {
        if self.groups.contains_key(name) {
            return false;
        }
        let record = GroupRecord {
            total: items.len(),
            loaded_count: 0,
            has_error: false,
            pending: items.into(),
        };
        self.groups.insert(name.to_owned(), record);
        self.queue.push(name);
        true
    }

    /// Whether `name` is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.groups.contains_key(name)
    }

    /// Record for `name`, if registered.
    pub fn get(&self, name: &str) -> Option<&GroupRecord> {
        self.groups.get(name)
    }

    /// Take the next pending item according to the fair queue.
    pub fn pop_next(&mut self) -> Option<ResourceItem> {
        let groups = &mut self.groups;
        let name = self
            .queue
            .pick(|n| groups.get(n).is_some_and(|g| !g.pending.is_empty()))?;
        groups.get_mut(name)?.pending.pop_front()
    }

    /// Count one finished item against `name`.
    ///
    /// When the group settles its record and queue entry are removed before
    /// returning. Returns `None` for an unknown group.
    pub fn record_completion(&mut self, name: &str, failed: bool) -> Option<GroupProgress> {
        let record = self.groups.get_mut(name)?;
        record.loaded_count = (record.loaded_count + 1).min(record.total);
        if failed {
            record.has_error = true;
        }
        let mut progress = GroupProgress {
            loaded_count: record.loaded_count,
            total: record.total,
            outcome: None,
        };
        if record.loaded_count == record.total {
            let has_error = record.has_error;
            self.groups.remove(name);
            self.queue.remove(name);
            progress.outcome = Some(if has_error {
                GroupOutcome::LoadError
            } else {
                GroupOutcome::Complete
            });
        }
        Some(progress)
    }

    /// Change the dispatch policy for subsequent picks.
    pub fn set_policy(&mut self, policy: DispatchPolicy) {
        self.queue.set_policy(policy);
    }

    /// Active group names in dispatch order.
    pub fn active_groups(&self) -> &[String] {
        self.queue.names()
    }

    /// Number of active groups.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Whether no group is active.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Total items waiting across all groups.
    pub fn pending_items(&self) -> usize {
        self.groups.values().map(|g| g.pending.len()).sum()
    }
}
