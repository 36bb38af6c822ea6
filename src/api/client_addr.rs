//! Extractor for the caller's network address.

use std::convert::Infallible;
use std::net::SocketAddr;

use axum::extract::{ConnectInfo, FromRequestParts};
use axum::http::HeaderMap;
use axum::http::request::Parts;

use crate::app_state::AppState;
use crate::domain::NetworkAddress;

/// Header set by reverse proxies with the original client address first.
const FORWARDED_FOR: &str = "x-forwarded-for";

/// Network address of the caller, resolved from the transport.
///
/// Resolution order: first `X-Forwarded-For` entry (only when
/// [`AppState::trust_forwarded_for`] is set), then the socket peer address,
/// then loopback.
#[derive(Debug, Clone)]
pub struct ClientAddr(pub NetworkAddress);

impl FromRequestParts<AppState> for ClientAddr {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let peer = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| *addr);
        Ok(Self(resolve(&parts.headers, peer, state.trust_forwarded_for)))
    }
}

/// Picks the caller address from headers and the peer socket.
#[must_use]
pub fn resolve(
    headers: &HeaderMap,
    peer: Option<SocketAddr>,
    trust_forwarded_for: bool,
) -> NetworkAddress {
    let forwarded = trust_forwarded_for
        .then(|| headers.get(FORWARDED_FOR))
        .flatten()
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty());

    match (forwarded, peer) {
        (Some(addr), _) => NetworkAddress::new(addr),
        (None, Some(peer)) => NetworkAddress::from(peer.ip()),
        (None, None) => NetworkAddress::loopback(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(forwarded: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(FORWARDED_FOR, HeaderValue::from_static(forwarded));
        headers
    }

    fn peer() -> Option<SocketAddr> {
        Some(SocketAddr::from(([192, 168, 0, 7], 54321)))
    }

    #[test]
    fn first_forwarded_entry_wins_when_trusted() {
        let addr = resolve(&headers("203.0.113.5, 10.0.0.1"), peer(), true);
        assert_eq!(addr.as_str(), "203.0.113.5");
    }

    #[test]
    fn forwarded_header_ignored_when_untrusted() {
        let addr = resolve(&headers("203.0.113.5"), peer(), false);
        assert_eq!(addr.as_str(), "192.168.0.7");
    }

    #[test]
    fn blank_forwarded_header_falls_back_to_peer() {
        let addr = resolve(&headers("  "), peer(), true);
        assert_eq!(addr.as_str(), "192.168.0.7");
    }

    #[test]
    fn no_information_yields_loopback() {
        let addr = resolve(&HeaderMap::new(), None, true);
        assert_eq!(addr, NetworkAddress::loopback());
    }
}
