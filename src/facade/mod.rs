//! Fetch-through caching facade
//!
//! [`CacheFacade`] is the context object the rest of an application talks to:
//! it owns the lazily created backend handle, the retry ledger, the optional
//! single-flight lock table and the metrics registry. Operations normalize
//! backend status codes to booleans and tagged [`Lookup`] values; backend
//! failures are logged and folded into per-operation fallbacks at this
//! boundary instead of reaching callers.

mod flight;
mod options;
mod retry;

pub use options::{Options, Ttl};

use crate::backend::{Backend, DeleteStatus, StoreStatus};
use crate::codec;
use crate::config::{BackendConfig, Config};
use crate::error::{BackendError, CachefrontError, Result};
use crate::metrics::Metrics;
use flight::KeyedLocks;
use parking_lot::Mutex;
use retry::RetryLedger;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info, warn};

/// Tagged outcome of a cache read.
///
/// Hit/miss is decided by the backend's found flag, never by inspecting the
/// value, so cached empty strings, zeros and `false` are genuine hits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup<T> {
    Hit(T),
    Miss,
}

impl<T> Lookup<T> {
    pub fn is_hit(&self) -> bool {
        matches!(self, Lookup::Hit(_))
    }

    pub fn is_miss(&self) -> bool {
        matches!(self, Lookup::Miss)
    }

    pub fn into_option(self) -> Option<T> {
        match self {
            Lookup::Hit(value) => Some(value),
            Lookup::Miss => None,
        }
    }
}

/// Creates the backend handle on first use
pub type BackendFactory =
    Box<dyn Fn(&BackendConfig) -> std::result::Result<Arc<dyn Backend>, BackendError> + Send + Sync>;

/// Fetch-through caching facade over a memcached-style backend.
///
/// Shared by value behind an `Arc`; all operations take `&self` and perform
/// at most one backend round trip (plus one retry for unresolved types and,
/// under single-flight, one double-check read).
pub struct CacheFacade {
    config: Config,
    factory: Option<BackendFactory>,
    handle: Mutex<Option<Arc<dyn Backend>>>,
    retried: Mutex<RetryLedger>,
    flight: KeyedLocks,
    metrics: Metrics,
}

impl CacheFacade {
    /// Create a facade whose backend handle is built lazily by `factory` on
    /// the first operation.
    pub fn new(config: Config, factory: BackendFactory) -> Self {
        let capacity = config.facade.retry_ledger_capacity;
        Self {
            config,
            factory: Some(factory),
            handle: Mutex::new(None),
            retried: Mutex::new(RetryLedger::new(capacity)),
            flight: KeyedLocks::new(),
            metrics: Metrics::new(),
        }
    }

    /// Create a facade over an already constructed backend.
    pub fn with_backend(config: Config, backend: Arc<dyn Backend>) -> Self {
        let capacity = config.facade.retry_ledger_capacity;
        Self {
            config,
            factory: None,
            handle: Mutex::new(Some(backend)),
            retried: Mutex::new(RetryLedger::new(capacity)),
            flight: KeyedLocks::new(),
            metrics: Metrics::new(),
        }
    }

    /// Read a value.
    ///
    /// Absence, backend errors (logged) and undecodable payloads (logged)
    /// all come back as `Ok(Miss)`; only configuration problems and
    /// persistent unresolved-type failures error out.
    pub fn read<T: DeserializeOwned>(&self, key: &str, opts: &Options) -> Result<Lookup<T>> {
        self.metrics.op_read.inc();
        let stored_key = self.namespaced(key)?;
        let raw = opts.raw;

        let found =
            self.operation("read", opts.quiet, None, |backend| backend.get(&stored_key, raw))?;

        match found {
            Some(data) => match codec::decode(&data, raw) {
                Ok(value) => Ok(Lookup::Hit(value)),
                Err(e) => {
                    self.metrics.backend_errors.inc();
                    error!(key, error = %e, "failed to decode cached value");
                    Ok(Lookup::Miss)
                }
            },
            None => Ok(Lookup::Miss),
        }
    }

    /// Write a value. `Ok(true)` iff the backend stored it; `unless_exist`
    /// over a live key and logged backend errors both yield `Ok(false)`.
    pub fn write<T: Serialize>(&self, key: &str, value: &T, opts: &Options) -> Result<bool> {
        self.metrics.op_write.inc();
        let stored_key = self.namespaced(key)?;
        let expire = self.expiration(opts);
        let payload = codec::encode(value, opts.raw)?;

        let status =
            self.operation("write", opts.quiet, StoreStatus::NotStored, |backend| {
                if opts.unless_exist {
                    backend.add(&stored_key, payload.clone(), expire, opts.raw)
                } else {
                    backend.set(&stored_key, payload.clone(), expire, opts.raw)
                }
            })?;

        Ok(status == StoreStatus::Stored)
    }

    /// Fetch-through: return the cached value, or compute it with `producer`,
    /// store it, and return it.
    ///
    /// With `facade.single_flight` enabled, concurrent misses on the same key
    /// are serialized and latecomers hit the freshly written value on their
    /// double-check read instead of recomputing.
    pub fn fetch<T, F>(&self, key: &str, opts: &Options, producer: F) -> Result<T>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> T,
    {
        self.metrics.op_fetch.inc();

        if !opts.force
            && let Lookup::Hit(value) = self.read(key, &opts.clone().quiet())?
        {
            self.record_hit(key, opts);
            return Ok(value);
        }

        if self.config.facade.single_flight {
            self.flight.locked(key, || {
                // The key may have been populated while we waited for the lock.
                if !opts.force
                    && let Lookup::Hit(value) = self.read(key, &opts.clone().quiet())?
                {
                    self.record_hit(key, opts);
                    return Ok(value);
                }
                self.produce_and_store(key, opts, producer)
            })
        } else {
            self.produce_and_store(key, opts, producer)
        }
    }

    /// Producer-less fetch: a read with fetch-style hit/miss logging.
    /// Absence is `Ok(Miss)`, never an error.
    pub fn fetch_cached<T: DeserializeOwned>(&self, key: &str, opts: &Options) -> Result<Lookup<T>> {
        self.metrics.op_fetch.inc();

        if !opts.force
            && let Lookup::Hit(value) = self.read(key, &opts.clone().quiet())?
        {
            self.record_hit(key, opts);
            return Ok(Lookup::Hit(value));
        }

        self.metrics.fetch_misses.inc();
        if !opts.quiet {
            info!(key, "fetch miss");
        }
        Ok(Lookup::Miss)
    }

    /// Delete a key. `Ok(true)` iff the backend reported it deleted.
    ///
    /// The delete-delay parameter comes from the per-call `expires_in` only;
    /// the configured default TTL is a write concern and would otherwise turn
    /// every delete into a delayed one.
    pub fn delete(&self, key: &str, opts: &Options) -> Result<bool> {
        self.metrics.op_delete.inc();
        let stored_key = self.namespaced(key)?;
        let delay = opts.expires_in.map_or(0, Ttl::as_secs);

        let status = self.operation("delete", opts.quiet, DeleteStatus::NotFound, |backend| {
            backend.delete(&stored_key, delay)
        })?;

        Ok(status == DeleteStatus::Deleted)
    }

    /// Drop every entry in the backing store.
    ///
    /// Administrative path: no retry, and backend errors propagate instead of
    /// degrading to a fallback.
    pub fn clear(&self) -> Result<()> {
        self.metrics.op_clear.inc();
        info!("clear");
        let backend = self.connection()?;
        backend.flush_all()?;
        Ok(())
    }

    /// Seconds until expiration for an operation: per-call `expires_in`,
    /// else the configured default.
    pub fn expiration(&self, opts: &Options) -> u64 {
        opts.expires_in
            .map(Ttl::as_secs)
            .unwrap_or(self.config.facade.default_ttl_secs)
    }

    /// Tear down the backend handle. The next operation re-creates it
    /// through the factory.
    pub fn disconnect(&self) {
        *self.handle.lock() = None;
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Shared backend handle, created on first use.
    fn connection(&self) -> Result<Arc<dyn Backend>> {
        let mut handle = self.handle.lock();
        if let Some(backend) = handle.as_ref() {
            return Ok(Arc::clone(backend));
        }

        let factory = self.factory.as_ref().ok_or_else(|| {
            CachefrontError::Config("facade has no backend factory to reconnect with".to_string())
        })?;
        let backend = factory(&self.config.backend)?;
        *handle = Some(Arc::clone(&backend));
        info!(addr = %self.config.backend.addr, "backend connection established");
        Ok(backend)
    }

    /// Single-operation boundary: logs the operation, applies the
    /// once-per-type retry for unresolved-type failures, and converts every
    /// other backend error into `fallback` after logging it.
    fn operation<R>(
        &self,
        name: &'static str,
        quiet: bool,
        fallback: R,
        call: impl Fn(&dyn Backend) -> std::result::Result<R, BackendError>,
    ) -> Result<R> {
        if !quiet {
            info!(op = name, "cache operation");
        }

        let backend = self.connection()?;
        let mut outcome = call(backend.as_ref());

        while let Err(BackendError::UnresolvedType { type_name }) = &outcome {
            if self.retried.lock().mark_once(type_name) {
                self.metrics.type_retries.inc();
                warn!(op = name, type_name = %type_name, "retrying after unresolved type");
                outcome = call(backend.as_ref());
            } else {
                break;
            }
        }

        match outcome {
            Ok(value) => Ok(value),
            Err(e @ BackendError::UnresolvedType { .. }) => Err(e.into()),
            Err(e) => {
                self.metrics.backend_errors.inc();
                error!(op = name, error = %e, "backend error");
                Ok(fallback)
            }
        }
    }

    fn produce_and_store<T, F>(&self, key: &str, opts: &Options, producer: F) -> Result<T>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> T,
    {
        self.metrics.fetch_misses.inc();
        if !opts.quiet {
            info!(key, "fetch miss");
        }

        let started = Instant::now();
        let value = producer();
        let elapsed = started.elapsed();
        self.metrics.producer_seconds.observe(elapsed.as_secs_f64());

        let stored = self.write(key, &value, &opts.clone().quiet())?;
        if !opts.quiet {
            info!(
                key,
                stored,
                elapsed_ms = elapsed.as_secs_f64() * 1000.0,
                "fetch computed and stored"
            );
        }

        Ok(value)
    }

    fn record_hit(&self, key: &str, opts: &Options) {
        self.metrics.fetch_hits.inc();
        if !opts.quiet {
            info!(key, "fetch hit");
        }
    }

    /// Storage key for a caller key, with the configured namespace applied.
    /// Empty keys are rejected before any backend call.
    fn namespaced(&self, key: &str) -> Result<String> {
        if key.is_empty() {
            return Err(CachefrontError::Config("cache key must not be empty".to_string()));
        }

        Ok(match &self.config.backend.namespace {
            Some(ns) => format!("{ns}:{key}"),
            None => key.to_owned(),
        })
    }
}
