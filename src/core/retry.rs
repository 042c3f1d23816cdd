//! Per-item retry accounting.

use std::collections::HashMap;

/// What to do with an item whose load attempt just failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
    /// Requeue the item. `attempt` is the counter value now stored for it.
    Retry {
        /// Stored attempt counter after this failure.
        attempt: u32,
    },
    /// Retry budget exhausted; the item has failed permanently.
    Exhausted {
        /// Counter value that exceeded the budget.
        attempts: u32,
    },
}

/// Attempt counters keyed by item name.
///
/// A name is present only while its item has failed at least once and still
/// has budget left. The first failure is read as count 1; an item is abandoned
/// once the stored count exceeds `max_retry_times`, so it gets
/// `max_retry_times + 1` failed attempts before giving up.
#[derive(Debug, Default)]
pub struct RetryTracker {
    attempts: HashMap<String, u32>,
}

impl RetryTracker {
    /// Create an empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a failed attempt for `name` and decide whether to retry it.
    pub fn record_failure(&mut self, name: &str, max_retry_times: u32) -> RetryDecision {
        let times = self.attempts.get(name).copied().unwrap_or(1);
        if times > max_retry_times {
            self.attempts.remove(name);
            return RetryDecision::Exhausted { attempts: times };
        }
        let attempt = times + 1;
        self.attempts.insert(name.to_owned(), attempt);
        RetryDecision::Retry { attempt }
    }

    /// Forget `name` after it loaded successfully.
    pub fn clear(&mut self, name: &str) {
        self.attempts.remove(name);
    }

    /// Current stored counter for `name`.
    pub fn attempts(&self, name: &str) -> Option<u32> {
        self.attempts.get(name).copied()
    }

    /// Number of items currently being retried.
    pub fn len(&self) -> usize {
        self.attempts.len()
    }

    /// Whether no item is being retried.
    pub fn is_empty(&self) -> bool {
        self.attempts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exhausts_after_exceeding_budget() {
        let mut tracker = RetryTracker::new();
        assert_eq!(tracker.record_failure("a", 3), RetryDecision::Retry { attempt: 2 });
        assert_eq!(tracker.record_failure("a", 3), RetryDecision::Retry { attempt: 3 });
        assert_eq!(tracker.record_failure("a", 3), RetryDecision::Retry { attempt: 4 });
        assert_eq!(tracker.record_failure("a", 3), RetryDecision::Exhausted { attempts: 4 });
        assert!(tracker.attempts("a").is_none());
    }

    #[test]
    fn test_zero_budget_fails_immediately() {
        let mut tracker = RetryTracker::new();
        assert_eq!(tracker.record_failure("a", 0), RetryDecision::Exhausted { attempts: 1 });
        assert!(tracker.is_empty());
    }

    #[test]
    fn test_clear_on_success() {
        let mut tracker = RetryTracker::new();
        tracker.record_failure("a", 3);
        tracker.record_failure("b", 3);
        assert_eq!(tracker.len(), 2);
        tracker.clear("a");
        assert_eq!(tracker.len(), 1);
        assert_eq!(tracker.attempts("b"), Some(2));
    }
}
