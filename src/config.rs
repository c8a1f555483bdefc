//! Configuration for cachefront

use serde::Deserialize;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub backend: BackendConfig,
    pub facade: FacadeConfig,
}

/// Backend connection configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Address of the backing store
    pub addr: String,

    /// Optional key namespace; keys are stored as `<namespace>:<key>`
    pub namespace: Option<String>,

    /// Connection timeout in seconds (0 = backend default)
    pub connect_timeout_secs: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            addr: "127.0.0.1:11211".to_string(),
            namespace: None,
            connect_timeout_secs: 0,
        }
    }
}

/// Facade behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FacadeConfig {
    /// Default TTL in seconds applied when an operation supplies none
    /// (0 = never expire / backend default)
    pub default_ttl_secs: u64,

    /// Serialize concurrent fetch misses per key through an in-process lock
    pub single_flight: bool,

    /// Maximum number of distinct type names remembered by the retry ledger
    pub retry_ledger_capacity: usize,
}

impl Default for FacadeConfig {
    fn default() -> Self {
        Self {
            default_ttl_secs: 0,
            single_flight: false,
            retry_ledger_capacity: 256,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file(path: &str) -> crate::Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            crate::CachefrontError::Config(format!("Failed to read config file: {e}"))
        })?;

        toml::from_str(&contents)
            .map_err(|e| crate::CachefrontError::Config(format!("Failed to parse config: {e}")))
    }

    /// Load configuration from environment variables, starting from defaults.
    ///
    /// Unlike most knobs, a malformed `CACHEFRONT_DEFAULT_TTL` is rejected
    /// outright rather than ignored: a silently dropped TTL would cache
    /// entries forever.
    pub fn from_env() -> crate::Result<Self> {
        let mut config = Self::default();

        if let Ok(addr) = std::env::var("CACHEFRONT_ADDR") {
            config.backend.addr = addr;
        }

        if let Ok(ns) = std::env::var("CACHEFRONT_NAMESPACE")
            && !ns.is_empty()
        {
            config.backend.namespace = Some(ns);
        }

        if let Ok(ttl) = std::env::var("CACHEFRONT_DEFAULT_TTL") {
            config.facade.default_ttl_secs = ttl.trim().parse().map_err(|_| {
                crate::CachefrontError::Config(format!(
                    "CACHEFRONT_DEFAULT_TTL must be a number of seconds, got {ttl:?}"
                ))
            })?;
        }

        if let Ok(sf) = std::env::var("CACHEFRONT_SINGLE_FLIGHT") {
            config.facade.single_flight = sf.to_lowercase() == "true" || sf == "1";
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.backend.addr, "127.0.0.1:11211");
        assert!(config.backend.namespace.is_none());
        assert_eq!(config.facade.default_ttl_secs, 0);
        assert!(!config.facade.single_flight);
        assert_eq!(config.facade.retry_ledger_capacity, 256);
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
            [backend]
            addr = "10.0.0.1:11211"
            namespace = "myapp"

            [facade]
            default_ttl_secs = 300
            single_flight = true
            "#
        )
        .unwrap();

        let config = Config::from_file(file.path().to_str().unwrap()).unwrap();
        assert_eq!(config.backend.addr, "10.0.0.1:11211");
        assert_eq!(config.backend.namespace.as_deref(), Some("myapp"));
        assert_eq!(config.facade.default_ttl_secs, 300);
        assert!(config.facade.single_flight);
        // Unspecified fields fall back to defaults
        assert_eq!(config.facade.retry_ledger_capacity, 256);
    }

    #[test]
    fn test_from_file_missing() {
        let result = Config::from_file("/nonexistent/cachefront.toml");
        assert!(matches!(
            result,
            Err(crate::CachefrontError::Config(_))
        ));
    }

    #[test]
    fn test_from_file_invalid_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "backend = not toml").unwrap();

        let result = Config::from_file(file.path().to_str().unwrap());
        assert!(matches!(
            result,
            Err(crate::CachefrontError::Config(_))
        ));
    }
}
