//! In-process single-flight locks, keyed by cache key.
//!
//! Guards the fetch miss path so that of N concurrent callers missing on the
//! same key, one runs the producer while the rest wait and then hit the
//! freshly written value on their double-check read. Slots are removed from
//! the table once the last holder is done, so the table only ever contains
//! keys with an in-flight population.

use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Default)]
pub(crate) struct KeyedLocks {
    slots: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl KeyedLocks {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Run `f` while holding the lock for `key`.
    pub(crate) fn locked<R>(&self, key: &str, f: impl FnOnce() -> R) -> R {
        let slot = {
            let mut slots = self.slots.lock();
            Arc::clone(slots.entry(key.to_owned()).or_default())
        };

        let result = {
            let _guard = slot.lock();
            f()
        };

        // Drop the table entry when no other caller holds a reference
        // (2 = the table's Arc plus ours).
        let mut slots = self.slots.lock();
        if let Some(current) = slots.get(key)
            && Arc::ptr_eq(current, &slot)
            && Arc::strong_count(current) <= 2
        {
            slots.remove(key);
        }

        result
    }

    #[cfg(test)]
    pub(crate) fn slot_count(&self) -> usize {
        self.slots.lock().len()
    }
}
