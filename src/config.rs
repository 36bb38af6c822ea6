//! Service configuration loaded from environment variables.
//!
//! Follows 12-factor style: all settings come from environment variables
//! (or a `.env` file via `dotenvy`).

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

/// Error raised while loading [`LedgerConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// `LISTEN_ADDR` is set but is not a socket address.
    #[error("invalid LISTEN_ADDR {value:?}: {source}")]
    InvalidListenAddr {
        /// The rejected value.
        value: String,
        /// Parse failure.
        source: std::net::AddrParseError,
    },

    /// `OPERATOR_TOKEN` is unset or blank.
    #[error("OPERATOR_TOKEN must be set to a non-empty secret")]
    MissingOperatorToken,
}

/// Output format of the tracing subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable multi-field lines.
    Pretty,
    /// One JSON object per event.
    Json,
}

/// Top-level service configuration.
///
/// Loaded once at startup via [`LedgerConfig::from_env`].
#[derive(Clone)]
pub struct LedgerConfig {
    /// Socket address to bind the HTTP server to (e.g. `0.0.0.0:3001`).
    pub listen_addr: SocketAddr,

    /// Shared operator secret for end and delete.
    pub operator_token: String,

    /// `false` keeps the ledger in memory only.
    pub persistence_enabled: bool,

    /// Path of the JSON ledger file.
    pub data_file: PathBuf,

    /// Fixed RNG seed; entropy-seeded when `None`.
    pub rng_seed: Option<u64>,

    /// Whether to take the caller address from `X-Forwarded-For`.
    pub trust_forwarded_for: bool,

    /// Per-request timeout.
    pub request_timeout: Duration,

    /// Log output format.
    pub log_format: LogFormat,
}

impl std::fmt::Debug for LedgerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LedgerConfig")
            .field("listen_addr", &self.listen_addr)
            .field("operator_token", &"<redacted>")
            .field("persistence_enabled", &self.persistence_enabled)
            .field("data_file", &self.data_file)
            .field("rng_seed", &self.rng_seed)
            .field("trust_forwarded_for", &self.trust_forwarded_for)
            .field("request_timeout", &self.request_timeout)
            .field("log_format", &self.log_format)
            .finish()
    }
}

impl LedgerConfig {
    /// Loads configuration from environment variables.
    ///
    /// Falls back to sensible defaults when a variable is not set.
    /// Calls `dotenvy::dotenv().ok()` to optionally load a `.env` file.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if `LISTEN_ADDR` cannot be parsed or
    /// `OPERATOR_TOKEN` is missing.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Same as [`LedgerConfig::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let raw_addr = lookup("LISTEN_ADDR").unwrap_or_else(|| "0.0.0.0:3001".to_string());
        let listen_addr = raw_addr
            .parse()
            .map_err(|source| ConfigError::InvalidListenAddr {
                value: raw_addr.clone(),
                source,
            })?;

        let operator_token = lookup("OPERATOR_TOKEN")
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .ok_or(ConfigError::MissingOperatorToken)?;

        let persistence_enabled = parse_bool(lookup("PERSISTENCE_ENABLED"), true);
        let data_file = lookup("LEDGER_DATA_FILE")
            .map_or_else(|| PathBuf::from("./data/ledger.json"), PathBuf::from);
        let rng_seed = lookup("RNG_SEED").and_then(|v| v.trim().parse().ok());
        let trust_forwarded_for = parse_bool(lookup("TRUST_FORWARDED_FOR"), true);
        let request_timeout =
            Duration::from_secs(parse_or(lookup("REQUEST_TIMEOUT_SECS"), 10));
        let log_format = match lookup("LOG_FORMAT").as_deref().map(str::trim) {
            Some(v) if v.eq_ignore_ascii_case("json") => LogFormat::Json,
            _ => LogFormat::Pretty,
        };

        Ok(Self {
            listen_addr,
            operator_token,
            persistence_enabled,
            data_file,
            rng_seed,
            trust_forwarded_for,
            request_timeout,
            log_format,
        })
    }
}

/// Parses `value` as `T`, returning `default` on missing or invalid values.
fn parse_or<T: std::str::FromStr>(value: Option<String>, default: T) -> T {
    value.and_then(|v| v.trim().parse().ok()).unwrap_or(default)
}

/// Parses a boolean. Accepts `"true"`, `"1"`, `"false"`, `"0"`
/// (case-insensitive). Returns `default` otherwise.
fn parse_bool(value: Option<String>, default: bool) -> bool {
    match value.as_deref().map(|v| v.trim().to_ascii_lowercase()).as_deref() {
        Some("true" | "1") => true,
        Some("false" | "0") => false,
        _ => default,
    }
}
