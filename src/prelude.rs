//! Prelude module for common imports.
//!
//! This module re-exports commonly used types and traits for convenience.
//!
//! # Usage
//!
//! ```ignore
//! use cachefront::prelude::*;
//! ```

// Error types
pub use crate::error::{BackendError, CachefrontError, CodecError, Result};

// Configuration
pub use crate::config::{BackendConfig, Config, FacadeConfig};

// Backend seam
pub use crate::backend::{Backend, DeleteStatus, MemoryBackend, StoreStatus};

// Facade
pub use crate::facade::{CacheFacade, Lookup, Options, Ttl};

// Metrics
pub use crate::metrics::Metrics;

// Common external crates
pub use std::sync::Arc;
pub use tracing::{debug, error, info, trace, warn};
