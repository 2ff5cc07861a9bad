//! Client identity for abuse throttling.
//!
//! Submissions are throttled per client+game. The identifier is the
//! leftmost address in `X-Forwarded-For` when the network boundary supplies
//! one, falling back to the peer address.
//!
//! Usage: add `ClientId` as an extractor parameter.
//!
//! ```ignore
//! async fn my_handler(client: ClientId, ...) -> ... {
//!     // client.0 is the throttling identifier
//! }
//! ```

use std::convert::Infallible;
use std::net::SocketAddr;

use axum::{
    extract::{ConnectInfo, FromRequestParts},
    http::request::Parts,
};

/// Client identifier used as the rate-limit key's first component.
pub struct ClientId(pub String);

impl<S> FromRequestParts<S> for ClientId
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let forwarded = parts
            .headers
            .get("x-forwarded-for")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty());

        if let Some(addr) = forwarded {
            return Ok(ClientId(addr));
        }

        let peer = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| addr.ip().to_string())
            .unwrap_or_else(|| "unknown".to_string());

        Ok(ClientId(peer))
    }
}
