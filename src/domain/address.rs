//! Caller network address used for one-action-per-address deduplication.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Network address of a caller as reported by the transport layer.
///
/// Stored verbatim (IPv4, IPv6 or whatever a trusted proxy forwarded). Two
/// addresses are the same caller iff their trimmed text is equal. This is a
/// heuristic: callers behind one NAT share an address, and a forwarded header
/// can be spoofed when the proxy is not trusted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NetworkAddress(String);

impl NetworkAddress {
    /// Loopback fallback used when the transport exposes no address at all.
    pub const LOOPBACK: &'static str = "127.0.0.1";

    /// Creates an address from raw text, trimming surrounding whitespace.
    #[must_use]
    pub fn new(raw: impl AsRef<str>) -> Self {
        Self(raw.as_ref().trim().to_string())
    }

    /// Returns the loopback address.
    #[must_use]
    pub fn loopback() -> Self {
        Self(Self::LOOPBACK.to_string())
    }

    /// Returns the address text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NetworkAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<std::net::IpAddr> for NetworkAddress {
    fn from(ip: std::net::IpAddr) -> Self {
        Self(ip.to_string())
    }
}
