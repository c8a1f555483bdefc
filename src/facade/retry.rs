//! Bounded ledger of type names whose resolution failure was already retried.
//!
//! The facade retries an unresolved-type backend error at most once per
//! distinct type name per process. The ledger is size-capped with FIFO
//! eviction so a long-lived process with a churning type population cannot
//! grow it without bound; an evicted name simply becomes eligible for one
//! more retry.

use std::collections::{HashSet, VecDeque};

pub(crate) struct RetryLedger {
    seen: HashSet<String>,
    order: VecDeque<String>,
    capacity: usize,
}

impl RetryLedger {
    pub(crate) fn new(capacity: usize) -> Self {
        Self {
            seen: HashSet::new(),
            order: VecDeque::new(),
            capacity: capacity.max(1),
        }
    }

    /// Returns `true` exactly once per name: the caller may retry on `true`
    /// and must propagate on `false`.
    pub(crate) fn mark_once(&mut self, type_name: &str) -> bool {
        if self.seen.contains(type_name) {
            return false;
        }

        if self.order.len() == self.capacity
            && let Some(evicted) = self.order.pop_front()
        {
            self.seen.remove(&evicted);
        }

        self.seen.insert(type_name.to_owned());
        self.order.push_back(type_name.to_owned());
        true
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.seen.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mark_once() {
        let mut ledger = RetryLedger::new(16);
        assert!(ledger.mark_once("App::User"));
        assert!(!ledger.mark_once("App::User"));
        assert!(ledger.mark_once("App::Order"));
        assert_eq!(ledger.len(), 2);
    }

    #[test]
    fn test_capacity_eviction() {
        let mut ledger = RetryLedger::new(2);
        assert!(ledger.mark_once("a"));
        assert!(ledger.mark_once("b"));
        assert!(ledger.mark_once("c")); // evicts "a"
        assert_eq!(ledger.len(), 2);

        // Evicted names are retry-eligible again
        assert!(ledger.mark_once("a"));
        // "c" is still remembered
        assert!(!ledger.mark_once("c"));
    }

    #[test]
    fn test_zero_capacity_is_clamped() {
        let mut ledger = RetryLedger::new(0);
        assert!(ledger.mark_once("x"));
        assert!(!ledger.mark_once("x"));
    }
}
