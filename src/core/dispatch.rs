//! Fair dispatch queue: round-robin selection across active groups.

use crate::config::DispatchPolicy;

/// Ordered set of active group names with an explicit selection cursor.
///
/// The cursor is an index into `names`. A value equal to `names.len()` means
/// "start of the next sweep" and wraps to 0 on the next pick.
#[derive(Debug, Default)]
pub struct FairQueue {
    names: Vec<String>,
    cursor: usize,
    policy: DispatchPolicy,
}

impl FairQueue {
    /// Create an empty queue using `policy`.
    pub fn new(policy: DispatchPolicy) -> Self {
        Self {
            names: Vec::new(),
            cursor: 0,
            policy,
        }
    }

    /// Append a group name. Names already present are ignored.
    pub fn push(&mut self, name: &str) {
        if !self.contains(name) {
            self.names.push(name.to_owned());
        }
    }

    /// Remove a group name, keeping the relative order of the others.
    ///
    /// The cursor keeps pointing at the same logical group: removals before it
    /// shift it left, and removing the group under it hands the turn to its
    /// successor.
    pub fn remove(&mut self, name: &str) -> bool {
        let Some(index) = self.names.iter().position(|n| n == name) else {
            return false;
        };
        self.names.remove(index);
        if index < self.cursor {
            self.cursor -= 1;
        }
        if self.cursor >= self.names.len() {
            self.cursor = 0;
        }
        true
    }

    /// Pick the next group that has pending work.
    ///
    /// Scans at most one full sweep from the cursor, skipping groups for which
    /// `has_pending` is false. Under [`DispatchPolicy::RoundRobin`] the cursor
    /// moves past the chosen group; under [`DispatchPolicy::Sticky`] it stays
    /// on it until that group runs dry.
    pub fn pick(&mut self, mut has_pending: impl FnMut(&str) -> bool) -> Option<&str> {
        let len = self.names.len();
        for _ in 0..len {
            if self.cursor >= len {
                self.cursor = 0;
            }
            if has_pending(&self.names[self.cursor]) {
                let chosen = self.cursor;
                if self.policy == DispatchPolicy::RoundRobin {
                    self.cursor += 1;
                }
                return Some(&self.names[chosen]);
            }
            self.cursor += 1;
        }
        None
    }

    /// Whether `name` is queued.
    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    /// Change the selection policy. Applies from the next pick.
    pub fn set_policy(&mut self, policy: DispatchPolicy) {
        self.policy = policy;
    }

    /// Current selection policy.
    pub const fn policy(&self) -> DispatchPolicy {
        self.policy
    }

    /// Current cursor position.
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// Queued group names in order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Number of queued groups.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether no group is queued.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
