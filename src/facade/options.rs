//! Per-operation options and TTL handling

use crate::CachefrontError;
use std::str::FromStr;
use std::time::Duration;

/// Time-to-live in whole seconds.
///
/// Construction is the validation point for the "expires_in must be numeric"
/// invariant: parsing non-numeric text fails with a configuration error
/// before any backend call can happen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Ttl(u64);

impl Ttl {
    /// Never expire (backend default)
    pub const NEVER: Ttl = Ttl(0);

    pub fn seconds(secs: u64) -> Self {
        Self(secs)
    }

    pub fn as_secs(self) -> u64 {
        self.0
    }
}

impl From<u64> for Ttl {
    fn from(secs: u64) -> Self {
        Self(secs)
    }
}

impl From<Duration> for Ttl {
    fn from(d: Duration) -> Self {
        Self(d.as_secs())
    }
}

impl FromStr for Ttl {
    type Err = CachefrontError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u64>()
            .map(Ttl)
            .map_err(|_| {
                CachefrontError::Config(format!(
                    "expires_in must be a non-negative number of seconds, got {s:?}"
                ))
            })
    }
}

/// Options recognized by the facade operations.
///
/// Unknown concerns have no catch-all: each operation reads exactly the
/// fields documented for it and ignores the rest.
#[derive(Debug, Clone, Default)]
pub struct Options {
    /// Suppress the per-operation log line
    pub quiet: bool,
    /// Bypass the JSON codec; store/read values as plain text
    pub raw: bool,
    /// On write, fail with `false` instead of overwriting an existing key
    pub unless_exist: bool,
    /// On fetch, skip the read and always recompute
    pub force: bool,
    /// Seconds until expiration; falls back to the configured default
    pub expires_in: Option<Ttl>,
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn quiet(mut self) -> Self {
        self.quiet = true;
        self
    }

    pub fn raw(mut self) -> Self {
        self.raw = true;
        self
    }

    pub fn unless_exist(mut self) -> Self {
        self.unless_exist = true;
        self
    }

    pub fn force(mut self) -> Self {
        self.force = true;
        self
    }

    pub fn expires_in(mut self, ttl: impl Into<Ttl>) -> Self {
        self.expires_in = Some(ttl.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ttl_parse() {
        assert_eq!("300".parse::<Ttl>().unwrap(), Ttl::seconds(300));
        assert_eq!(" 0 ".parse::<Ttl>().unwrap(), Ttl::NEVER);
    }

    #[test]
    fn test_ttl_parse_non_numeric() {
        let result = "soon".parse::<Ttl>();
        assert!(matches!(result, Err(CachefrontError::Config(_))));
    }

    #[test]
    fn test_ttl_parse_negative() {
        // u64 target rejects negatives at the parse boundary
        let result = "-5".parse::<Ttl>();
        assert!(matches!(result, Err(CachefrontError::Config(_))));
    }

    #[test]
    fn test_ttl_from_duration() {
        let ttl: Ttl = Duration::from_secs(90).into();
        assert_eq!(ttl.as_secs(), 90);
    }

    #[test]
    fn test_builder() {
        let opts = Options::new().quiet().raw().unless_exist().expires_in(60u64);
        assert!(opts.quiet);
        assert!(opts.raw);
        assert!(opts.unless_exist);
        assert!(!opts.force);
        assert_eq!(opts.expires_in, Some(Ttl::seconds(60)));
    }
}
