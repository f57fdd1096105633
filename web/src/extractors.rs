//! Custom Axum extractors.
//!
//! - `ClientIp`: best-effort visitor address for request logs
//!
//! # Examples
//!
//! ```ignore
//! use contact_relay_web::extractors::ClientIp;
//!
//! async fn handler(client_ip: ClientIp) -> String {
//!     tracing::info!(client_ip = %client_ip, "Processing submission");
//!     "ok".to_string()
//! }
//! ```

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{HeaderMap, request::Parts},
};
use std::fmt;
use std::net::IpAddr;

/// Client IP address, if a proxy in front of the relay reported one.
///
/// # Priority
///
/// 1. `CF-Connecting-IP` (Cloudflare)
/// 2. `X-Forwarded-For` (first IP in the list)
/// 3. `X-Real-IP`
///
/// Only used for logging. Nothing in the relay trusts it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientIp(pub Option<IpAddr>);

impl fmt::Display for ClientIp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(ip) => write!(f, "{ip}"),
            None => f.write_str("unknown"),
        }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for ClientIp
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(extract_client_ip(&parts.headers)))
    }
}

/// Extract client IP from proxy headers.
fn extract_client_ip(headers: &HeaderMap) -> Option<IpAddr> {
    let header_ip = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.split(',').next())
            .and_then(|s| s.trim().parse::<IpAddr>().ok())
    };

    header_ip("CF-Connecting-IP")
        .or_else(|| header_ip("X-Forwarded-For"))
        .or_else(|| header_ip("X-Real-IP"))
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;
    use axum::http::Request;

    async fn client_ip(req: Request<()>) -> ClientIp {
        let (mut parts, _) = req.into_parts();
        match ClientIp::from_request_parts(&mut parts, &()).await {
            Ok(ip) => ip,
            Err(never) => match never {},
        }
    }

    #[tokio::test]
    async fn test_cloudflare_header_wins() {
        let req = Request::builder()
            .header("CF-Connecting-IP", "203.0.113.7")
            .header("X-Forwarded-For", "198.51.100.1")
            .body(())
            .expect("Valid request");

        assert_eq!(client_ip(req).await.to_string(), "203.0.113.7");
    }

    #[tokio::test]
    async fn test_client_ip_from_x_forwarded_for() {
        let req = Request::builder()
            .header("X-Forwarded-For", "203.0.113.1, 198.51.100.1")
            .body(())
            .expect("Valid request");

        assert_eq!(client_ip(req).await.to_string(), "203.0.113.1");
    }

    #[tokio::test]
    async fn test_client_ip_from_x_real_ip() {
        let req = Request::builder()
            .header("X-Real-IP", "198.51.100.42")
            .body(())
            .expect("Valid request");

        assert_eq!(client_ip(req).await.to_string(), "198.51.100.42");
    }

    #[tokio::test]
    async fn test_client_ip_unknown() {
        let req = Request::builder()
            .header("X-Forwarded-For", "not-an-ip")
            .body(())
            .expect("Valid request");

        let ip = client_ip(req).await;
        assert_eq!(ip, ClientIp(None));
        assert_eq!(ip.to_string(), "unknown");
    }
}
