//! Client identity used as the rate-limit key

use axum::{
    async_trait,
    extract::{ConnectInfo, FromRequestParts},
    http::{request::Parts, HeaderMap},
};
use std::convert::Infallible;
use std::fmt;
use std::net::SocketAddr;

use crate::state::AppState;

const UNKNOWN_CLIENT: &str = "unknown";

/// Address a request is attributed to.
///
/// Behind a trusted proxy this is the first `X-Forwarded-For` hop, otherwise
/// the peer address of the connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientIdentity(pub String);

impl ClientIdentity {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn resolve(parts: &Parts, trust_proxy: bool) -> Self {
        if trust_proxy {
            if let Some(ip) = forwarded_for(&parts.headers) {
                return Self(ip);
            }
        }

        parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map_or_else(
                || Self(UNKNOWN_CLIENT.to_string()),
                |ConnectInfo(addr)| Self(addr.ip().to_string()),
            )
    }
}

impl fmt::Display for ClientIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn forwarded_for(headers: &HeaderMap) -> Option<String> {
    headers
        .get("x-forwarded-for")
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.split(',').next())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
}

#[async_trait]
impl FromRequestParts<AppState> for ClientIdentity {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(Self::resolve(parts, state.config().api.trust_proxy))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn parts(forwarded: Option<&str>, peer: Option<SocketAddr>) -> Parts {
        let mut builder = Request::builder().uri("/api/reviews");
        if let Some(value) = forwarded {
            builder = builder.header("x-forwarded-for", value);
        }
        let (mut parts, ()) = builder.body(()).unwrap().into_parts();
        if let Some(addr) = peer {
            parts.extensions.insert(ConnectInfo(addr));
        }
        parts
    }

    #[test]
    fn test_forwarded_for_only_when_trusted() {
        let peer: SocketAddr = "10.0.0.5:4000".parse().unwrap();
        let parts = parts(Some("203.0.113.7, 10.0.0.1"), Some(peer));

        assert_eq!(ClientIdentity::resolve(&parts, true).as_str(), "203.0.113.7");
        assert_eq!(ClientIdentity::resolve(&parts, false).as_str(), "10.0.0.5");
    }

    #[test]
    fn test_unknown_without_peer() {
        let parts = parts(None, None);
        assert_eq!(ClientIdentity::resolve(&parts, true).as_str(), "unknown");
    }
}
