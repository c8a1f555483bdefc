//! Backing-store seam for the facade
//!
//! The facade forwards an explicit allow-list of primitives through the
//! [`Backend`] trait rather than dispatching arbitrary calls: `get`, `set`,
//! `add`, `delete`, `flush_all`. Anything a backend offers beyond these is
//! invisible to facade callers.

mod memory;

#[cfg(test)]
pub(crate) mod testutil;

pub use memory::MemoryBackend;

use crate::BackendError;
use bytes::Bytes;

/// Outcome of a storage command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreStatus {
    Stored,
    NotStored,
}

/// Outcome of a delete command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteStatus {
    Deleted,
    NotFound,
}

/// A memcached-style backing store.
///
/// Implementations must be safe for concurrent use; the facade shares one
/// handle across all callers and adds no locking of its own. Absence of a key
/// is reported as `Ok(None)` / `NotFound`, never as an error.
pub trait Backend: Send + Sync {
    /// Look up a key. `raw` is advisory: backends that tag values with a
    /// serialization flag may use it, others ignore it.
    fn get(&self, key: &str, raw: bool) -> Result<Option<Bytes>, BackendError>;

    /// Store unconditionally. `expire` follows memcached exptime rules
    /// (0 = never, relative seconds up to 30 days, absolute timestamp above).
    fn set(&self, key: &str, value: Bytes, expire: u64, raw: bool)
    -> Result<StoreStatus, BackendError>;

    /// Store only if the key is absent.
    fn add(&self, key: &str, value: Bytes, expire: u64, raw: bool)
    -> Result<StoreStatus, BackendError>;

    /// Remove a key. `delay` mirrors the memcached delete-time parameter;
    /// backends without delayed-delete semantics may ignore it.
    fn delete(&self, key: &str, delay: u64) -> Result<DeleteStatus, BackendError>;

    /// Drop every entry. Administrative; the facade never swallows its errors.
    fn flush_all(&self) -> Result<(), BackendError>;
}
