//! Error responses for the relay endpoint.
//!
//! Bridges [`RelayError`] and boundary-level failures to HTTP responses. The
//! body is always `{"error": "<localized text>"}`; the internal cause is
//! logged and never sent to the browser.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use contact_relay_core::{RelayError, RelayResponse, response};
use std::fmt;

/// Application error type for the relay handler.
///
/// # Examples
///
/// ```ignore
/// async fn handler(body: Bytes) -> Result<Json<RelayResponse>, AppError> {
///     relay.handle(&body).await?;
///     Ok(Json(RelayResponse::sent()))
/// }
/// ```
#[derive(Debug)]
pub struct AppError {
    /// HTTP status code
    status: StatusCode,
    /// Error message (user-facing)
    message: &'static str,
    /// Internal error (for logging, not exposed to client)
    source: Option<anyhow::Error>,
}

impl AppError {
    /// Create a new application error.
    #[must_use]
    pub const fn new(status: StatusCode, message: &'static str) -> Self {
        Self {
            status,
            message,
            source: None,
        }
    }

    /// Attach the internal cause.
    #[must_use]
    pub fn with_source(mut self, source: anyhow::Error) -> Self {
        self.source = Some(source);
        self
    }

    /// 405 for anything other than `POST` or `OPTIONS`.
    #[must_use]
    pub const fn method_not_allowed() -> Self {
        Self::new(StatusCode::METHOD_NOT_ALLOWED, response::METHOD_NOT_ALLOWED)
    }

    /// 500 with the generic localized message.
    #[must_use]
    pub const fn internal() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, response::INTERNAL_ERROR)
    }

    /// Status this error maps to.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    /// Message sent to the client.
    #[must_use]
    pub const fn message(&self) -> &'static str {
        self.message
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.status.as_u16(), self.message)
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            if let Some(source) = &self.source {
                tracing::error!(
                    status = %self.status,
                    message = self.message,
                    error = %source,
                    "Relay request failed"
                );
            } else {
                tracing::error!(
                    status = %self.status,
                    message = self.message,
                    "Relay request failed"
                );
            }
        }

        (self.status, Json(RelayResponse::failed(self.message))).into_response()
    }
}

/// Status and message come from the domain error; the error itself is kept as source.
impl From<RelayError> for AppError {
    fn from(err: RelayError) -> Self {
        Self::new(err.status(), err.public_message()).with_source(err.into())
    }
}
