//! # cachefront
//!
//! Fetch-through caching facade for memcached-style backends with explicit
//! hit/miss semantics, stampede-safe population, and a bounded retry policy.
//!
//! ## Features
//!
//! - `read` / `write` / `fetch` / `delete` / `clear` over a pluggable
//!   [`Backend`](backend::Backend) trait
//! - Tagged [`Lookup`](facade::Lookup) results: cached falsy values
//!   (empty strings, zeros) are genuine hits, never recomputed
//! - Optional per-key single-flight locking for concurrent fetch misses
//! - Backend failures degrade to fallback values at the operation boundary;
//!   callers never handle transport errors on the per-key paths
//! - Prometheus metrics and `tracing` instrumentation
//!
//! ## Example
//!
//! ```
//! use cachefront::prelude::*;
//!
//! let facade = CacheFacade::with_backend(Config::default(), Arc::new(MemoryBackend::new()));
//!
//! let opts = Options::new().expires_in(300u64);
//! let motd: String = facade
//!     .fetch("motd", &opts, || "welcome".to_string())
//!     .unwrap();
//! assert_eq!(motd, "welcome");
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐     ┌──────────────────────────┐     ┌───────────────┐
//! │ application  │────▶│ CacheFacade              │────▶│ Backend impl  │
//! │              │     │  ├─ fetch-through        │     │ (memcached    │
//! │              │     │  ├─ retry ledger         │     │  client, in-  │
//! │              │     │  └─ single-flight locks  │     │  memory, ...) │
//! └──────────────┘     └──────────────────────────┘     └───────────────┘
//! ```

// Modules
pub mod backend;
pub mod codec;
pub mod config;
pub mod error;
pub mod facade;
pub mod logging;
pub mod metrics;
pub mod prelude;

// Re-exports for convenience
pub use backend::{Backend, DeleteStatus, MemoryBackend, StoreStatus};
pub use config::Config;
pub use error::{BackendError, CachefrontError, CodecError, Result};
pub use facade::{CacheFacade, Lookup, Options, Ttl};
