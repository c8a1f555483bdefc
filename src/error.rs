//! Error types for cachefront

use thiserror::Error;

/// Main error type for cachefront
///
/// Only configuration mistakes, encode failures, and unresolved-type errors
/// that survive their retry ever reach callers of the per-key operations.
/// Everything else is logged and folded into the operation's fallback value.
#[derive(Error, Debug)]
pub enum CachefrontError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Codec error: {0}")]
    Codec(#[from] CodecError),

    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),
}

/// Errors declared by a [`Backend`](crate::backend::Backend) implementation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Protocol error: {0}")]
    Protocol(String),

    /// Structured replacement for message-sniffing on lazy type resolution
    /// failures. The facade retries this once per distinct `type_name`.
    #[error("Unresolved value type: {type_name}")]
    UnresolvedType { type_name: String },

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Value encoding/decoding errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error("Value encoding error: {0}")]
    Encoding(String),

    #[error("Value decoding error: {0}")]
    Decoding(String),

    #[error("Raw value is not valid UTF-8")]
    NotUtf8,
}

pub type Result<T> = std::result::Result<T, CachefrontError>;
