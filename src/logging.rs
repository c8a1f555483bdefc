//! Tracing bootstrap for embedding applications
//!
//! The facade only emits `tracing` events; hosts that have their own
//! subscriber keep it. This helper is for binaries that want the standard
//! env-filtered stdout setup with one call.

use tracing_subscriber::EnvFilter;

/// Initialize a stdout subscriber honoring `RUST_LOG`, defaulting to `info`.
///
/// Returns quietly if a global subscriber is already installed, so it is safe
/// to call from tests and from hosts that may have initialized tracing
/// themselves.
pub fn init() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .try_init();
}
