//! services/api/src/config.rs
//!
//! Defines the application's configuration structure and loading logic.
//!
//! All configuration is loaded from environment variables at startup. The `.env`
//! file is used for local development.

use crate::adapters::session_store::DEFAULT_IDLE_TTL;
use lexinary_core::validation::{DEFAULT_MAX_CONTRACT_WORDS, DEFAULT_MAX_UPLOAD_BYTES};
use std::net::SocketAddr;
use std::time::Duration;
use tracing::Level;

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub bind_address: SocketAddr,
    pub log_level: Level,
    pub max_upload_bytes: usize,
    pub max_contract_words: usize,
    /// Artificial pause standing in for model latency.
    pub mock_latency: Duration,
    /// Sessions unused for longer than this are discarded.
    pub session_idle_ttl: Duration,
    pub allowed_origin: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_address: SocketAddr::from(([0, 0, 0, 0], 3000)),
            log_level: Level::INFO,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            max_contract_words: DEFAULT_MAX_CONTRACT_WORDS,
            mock_latency: Duration::from_millis(1000),
            session_idle_ttl: DEFAULT_IDLE_TTL,
            allowed_origin: "http://localhost:3000".to_string(),
        }
    }
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// It will look for a `.env` file in the current directory for development,
    /// but this is skipped in test environments to ensure tests are hermetic.
    pub fn from_env() -> Result<Self, ConfigError> {
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from any key lookup; unset keys fall back to [`Config::default`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        // --- Server Settings ---
        let bind_address = match lookup("BIND_ADDRESS") {
            Some(raw) => raw.parse::<SocketAddr>().map_err(|e| {
                ConfigError::InvalidValue("BIND_ADDRESS".to_string(), e.to_string())
            })?,
            None => defaults.bind_address,
        };

        let log_level = match lookup("RUST_LOG") {
            Some(raw) => raw.parse::<Level>().map_err(|_| {
                ConfigError::InvalidValue(
                    "RUST_LOG".to_string(),
                    format!("'{}' is not a valid log level", raw),
                )
            })?,
            None => defaults.log_level,
        };

        let allowed_origin = lookup("ALLOWED_ORIGIN").unwrap_or(defaults.allowed_origin);

        // --- Input Limits & Mock Behaviour ---
        let max_upload_bytes = parse_number(&lookup, "MAX_UPLOAD_BYTES")?
            .unwrap_or(defaults.max_upload_bytes as u64) as usize;
        let max_contract_words = parse_number(&lookup, "MAX_CONTRACT_WORDS")?
            .unwrap_or(defaults.max_contract_words as u64) as usize;
        let mock_latency = parse_number(&lookup, "MOCK_LATENCY_MS")?
            .map(Duration::from_millis)
            .unwrap_or(defaults.mock_latency);
        let session_idle_ttl = match parse_number(&lookup, "SESSION_IDLE_TTL_SECS")? {
            Some(0) => {
                return Err(ConfigError::InvalidValue(
                    "SESSION_IDLE_TTL_SECS".to_string(),
                    "must be greater than zero".to_string(),
                ))
            }
            Some(secs) => Duration::from_secs(secs),
            None => defaults.session_idle_ttl,
        };

        Ok(Self {
            bind_address,
            log_level,
            max_upload_bytes,
            max_contract_words,
            mock_latency,
            session_idle_ttl,
            allowed_origin,
        })
    }
}

fn parse_number<F>(lookup: &F, key: &str) -> Result<Option<u64>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|raw| {
            raw.trim()
                .parse::<u64>()
                .map_err(|e| ConfigError::InvalidValue(key.to_string(), e.to_string()))
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn empty_environment_uses_defaults() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.bind_address.to_string(), "0.0.0.0:3000");
        assert_eq!(config.log_level, Level::INFO);
        assert_eq!(config.max_upload_bytes, 10 * 1024 * 1024);
        assert_eq!(config.max_contract_words, 5000);
        assert_eq!(config.mock_latency, Duration::from_secs(1));
        assert_eq!(config.session_idle_ttl, Duration::from_secs(30 * 60));
    }

    #[test]
    fn overrides_are_applied() {
        let config = Config::from_lookup(lookup_from(&[
            ("BIND_ADDRESS", "127.0.0.1:8080"),
            ("RUST_LOG", "debug"),
            ("MAX_UPLOAD_BYTES", "2048"),
            ("MOCK_LATENCY_MS", "0"),
            ("SESSION_IDLE_TTL_SECS", "90"),
        ]))
        .unwrap();
        assert_eq!(config.bind_address.port(), 8080);
        assert_eq!(config.log_level, Level::DEBUG);
        assert_eq!(config.max_upload_bytes, 2048);
        assert_eq!(config.mock_latency, Duration::ZERO);
        assert_eq!(config.session_idle_ttl, Duration::from_secs(90));
    }

    #[test]
    fn bad_values_name_the_variable() {
        let err = Config::from_lookup(lookup_from(&[("MAX_CONTRACT_WORDS", "lots")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(ref key, _) if key == "MAX_CONTRACT_WORDS"));

        let err = Config::from_lookup(lookup_from(&[("RUST_LOG", "chatty")])).unwrap_err();
        assert!(err.to_string().contains("RUST_LOG"));

        let err = Config::from_lookup(lookup_from(&[("SESSION_IDLE_TTL_SECS", "0")])).unwrap_err();
        assert!(err.to_string().contains("SESSION_IDLE_TTL_SECS"));
    }
}
