//! Test backends for facade tests: call counting and fault injection.

use super::{Backend, DeleteStatus, MemoryBackend, StoreStatus};
use crate::BackendError;
use bytes::Bytes;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};

/// A `MemoryBackend` that counts every primitive call and can be scripted to
/// fail. Queued errors are consumed in order, one per call, before the inner
/// backend is consulted.
#[derive(Default)]
pub(crate) struct ScriptedBackend {
    inner: MemoryBackend,
    calls: AtomicU64,
    failures: Mutex<VecDeque<BackendError>>,
    last_delete_delay: Mutex<Option<u64>>,
}

impl ScriptedBackend {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Total number of primitive calls that reached this backend
    pub(crate) fn calls(&self) -> u64 {
        self.calls.load(Ordering::SeqCst)
    }

    /// Queue an error to be returned by the next primitive call
    pub(crate) fn fail_next(&self, error: BackendError) {
        self.failures.lock().push_back(error);
    }

    pub(crate) fn inner(&self) -> &MemoryBackend {
        &self.inner
    }

    /// Delay argument received by the most recent `delete` call
    pub(crate) fn last_delete_delay(&self) -> Option<u64> {
        *self.last_delete_delay.lock()
    }

    fn intercept(&self) -> Result<(), BackendError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.failures.lock().pop_front() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

impl Backend for ScriptedBackend {
    fn get(&self, key: &str, raw: bool) -> Result<Option<Bytes>, BackendError> {
        self.intercept()?;
        self.inner.get(key, raw)
    }

    fn set(
        &self,
        key: &str,
        value: Bytes,
        expire: u64,
        raw: bool,
    ) -> Result<StoreStatus, BackendError> {
        self.intercept()?;
        self.inner.set(key, value, expire, raw)
    }

    fn add(
        &self,
        key: &str,
        value: Bytes,
        expire: u64,
        raw: bool,
    ) -> Result<StoreStatus, BackendError> {
        self.intercept()?;
        self.inner.add(key, value, expire, raw)
    }

    fn delete(&self, key: &str, delay: u64) -> Result<DeleteStatus, BackendError> {
        *self.last_delete_delay.lock() = Some(delay);
        self.intercept()?;
        self.inner.delete(key, delay)
    }

    fn flush_all(&self) -> Result<(), BackendError> {
        self.intercept()?;
        self.inner.flush_all()
    }
}
