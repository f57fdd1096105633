//! CORS middleware for the relay endpoint.
//!
//! The relay is called cross-origin from a static site, so every response,
//! including errors and 405s, carries the same allow headers. A browser then
//! always sees the JSON body instead of an opaque CORS failure.
//!
//! # Example
//!
//! ```ignore
//! use axum::Router;
//! use contact_relay_web::middleware::cors_layer;
//!
//! let app = Router::new()
//!     .fallback(relay_submission)
//!     .layer(cors_layer());
//! ```

use crate::error::AppError;
use axum::{
    extract::Request,
    http::{HeaderMap, HeaderName, HeaderValue, header},
    response::{IntoResponse, Response},
};
use std::any::Any;
use std::task::{Context, Poll};
use tower::{Layer, Service};
use tower_http::catch_panic::CatchPanicLayer;

/// `Access-Control-Allow-Origin` value.
pub const ALLOW_ORIGIN: &str = "*";

/// `Access-Control-Allow-Methods` value.
pub const ALLOW_METHODS: &str = "POST, OPTIONS";

/// `Access-Control-Allow-Headers` value.
pub const ALLOW_HEADERS: &str = "Content-Type";

/// `Access-Control-Max-Age` sent on preflight responses (one day).
pub const PREFLIGHT_MAX_AGE: &str = "86400";

/// The header set attached to every response.
#[must_use]
pub fn cors_headers() -> [(HeaderName, HeaderValue); 3] {
    [
        (
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static(ALLOW_ORIGIN),
        ),
        (
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static(ALLOW_METHODS),
        ),
        (
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static(ALLOW_HEADERS),
        ),
    ]
}

fn apply_cors_headers(headers: &mut HeaderMap) {
    for (name, value) in cors_headers() {
        headers.insert(name, value);
    }
}

/// Create a layer that adds the CORS allow headers to all responses.
#[must_use]
pub const fn cors_layer() -> CorsHeadersLayer {
    CorsHeadersLayer
}

/// Layer for CORS header injection.
#[derive(Clone, Debug)]
pub struct CorsHeadersLayer;

impl<S> Layer<S> for CorsHeadersLayer {
    type Service = CorsHeadersMiddleware<S>;

    fn layer(&self, inner: S) -> Self::Service {
        CorsHeadersMiddleware { inner }
    }
}

/// Middleware service for CORS header injection.
#[derive(Clone, Debug)]
pub struct CorsHeadersMiddleware<S> {
    inner: S,
}

impl<S> Service<Request> for CorsHeadersMiddleware<S>
where
    S: Service<Request, Response = Response> + Send + 'static,
    S::Future: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>> + Send>,
    >;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request) -> Self::Future {
        let fut = self.inner.call(req);

        Box::pin(async move {
            let mut response = fut.await?;
            apply_cors_headers(response.headers_mut());
            Ok(response)
        })
    }
}

/// Payload of a caught panic.
pub type PanicPayload = Box<dyn Any + Send + 'static>;

/// Create a layer that turns a panic below it into the generic 500 body.
///
/// Install it inside [`cors_layer`] so the 500 still carries the allow headers.
#[must_use]
pub fn panic_layer() -> CatchPanicLayer<fn(PanicPayload) -> Response> {
    CatchPanicLayer::custom(panic_response as fn(PanicPayload) -> Response)
}

#[allow(clippy::needless_pass_by_value)] // signature fixed by CatchPanicLayer
fn panic_response(payload: PanicPayload) -> Response {
    let detail = payload
        .downcast_ref::<&str>()
        .map(|s| (*s).to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "non-string panic payload".to_string());

    AppError::internal()
        .with_source(anyhow::anyhow!("request handling panicked: {detail}"))
        .into_response()
}
