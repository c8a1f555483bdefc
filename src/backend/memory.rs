//! In-process reference backend
//!
//! A `HashMap` guarded by a mutex, with memcached-compatible TTL handling:
//!
//! - 0 = never expire
//! - <= 2592000 (30 days) = relative seconds from now
//! - > 2592000 = absolute Unix timestamp
//!
//! Expired entries are removed lazily on read. This backend exists so the
//! facade is usable and testable without a network; production deployments
//! put a real client behind the [`Backend`] trait instead.

use super::{Backend, DeleteStatus, StoreStatus};
use crate::BackendError;
use bytes::Bytes;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::time::{SystemTime, UNIX_EPOCH};

/// Maximum relative TTL value (30 days in seconds)
const MAX_RELATIVE_TTL: u64 = 2_592_000;

#[derive(Debug, Clone)]
struct Entry {
    /// Expiration timestamp (0 = never expire)
    expire_at: u64,
    data: Bytes,
}

impl Entry {
    fn new(exptime: u64, data: Bytes) -> Self {
        Self {
            expire_at: calculate_expire_at(exptime),
            data,
        }
    }

    fn is_expired(&self) -> bool {
        self.expire_at != 0 && current_timestamp() >= self.expire_at
    }
}

/// Mutex-guarded in-memory backend
#[derive(Default)]
pub struct MemoryBackend {
    entries: Mutex<HashMap<String, Entry>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live (non-expired) entries
    pub fn len(&self) -> usize {
        let entries = self.entries.lock();
        entries.values().filter(|e| !e.is_expired()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether a live entry exists under the exact stored key
    /// (namespace prefix included)
    pub fn contains(&self, key: &str) -> bool {
        let entries = self.entries.lock();
        entries.get(key).is_some_and(|e| !e.is_expired())
    }
}

impl Backend for MemoryBackend {
    fn get(&self, key: &str, _raw: bool) -> Result<Option<Bytes>, BackendError> {
        let mut entries = self.entries.lock();
        match entries.get(key) {
            Some(entry) if entry.is_expired() => {
                entries.remove(key);
                Ok(None)
            }
            Some(entry) => Ok(Some(entry.data.clone())),
            None => Ok(None),
        }
    }

    fn set(
        &self,
        key: &str,
        value: Bytes,
        expire: u64,
        _raw: bool,
    ) -> Result<StoreStatus, BackendError> {
        let mut entries = self.entries.lock();
        entries.insert(key.to_owned(), Entry::new(expire, value));
        Ok(StoreStatus::Stored)
    }

    fn add(
        &self,
        key: &str,
        value: Bytes,
        expire: u64,
        _raw: bool,
    ) -> Result<StoreStatus, BackendError> {
        let mut entries = self.entries.lock();
        match entries.get(key) {
            Some(entry) if !entry.is_expired() => Ok(StoreStatus::NotStored),
            _ => {
                entries.insert(key.to_owned(), Entry::new(expire, value));
                Ok(StoreStatus::Stored)
            }
        }
    }

    fn delete(&self, key: &str, _delay: u64) -> Result<DeleteStatus, BackendError> {
        let mut entries = self.entries.lock();
        match entries.remove(key) {
            Some(entry) if !entry.is_expired() => Ok(DeleteStatus::Deleted),
            _ => Ok(DeleteStatus::NotFound),
        }
    }

    fn flush_all(&self) -> Result<(), BackendError> {
        self.entries.lock().clear();
        Ok(())
    }
}

/// Calculate the absolute expiration timestamp from memcached exptime
fn calculate_expire_at(exptime: u64) -> u64 {
    if exptime == 0 {
        0 // Never expire
    } else if exptime <= MAX_RELATIVE_TTL {
        current_timestamp() + exptime
    } else {
        exptime
    }
}

/// Get the current Unix timestamp
fn current_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
