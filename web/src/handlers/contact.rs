//! The relay endpoint.
//!
//! # Endpoint
//!
//! ```text
//! OPTIONS *   → 204, CORS preflight
//! POST    *   → 200 | 400 | 500, JSON
//! other   *   → 405, JSON
//! ```
//!
//! # Request
//!
//! ```json
//! {
//!   "name": "Lucía",
//!   "email": "lucia@example.com",
//!   "phone": "+52 55 1234 5678",
//!   "message": "Hola",
//!   "recaptchaResponse": "03AFcWeA..."
//! }
//! ```

use crate::error::AppError;
use crate::extractors::ClientIp;
use crate::middleware::PREFLIGHT_MAX_AGE;
use crate::state::AppState;
use axum::{
    Json,
    body::Bytes,
    extract::{State, rejection::BytesRejection},
    http::{Method, StatusCode, header},
    response::{IntoResponse, Response},
};
use contact_relay_core::{HumanVerifier, MailDispatcher, RelayResponse, unreadable_body};

/// Dispatch one request by method and relay `POST` bodies.
///
/// Registered as the router's fallback, so it answers on every path.
pub async fn relay_submission<V, M>(
    State(state): State<AppState<V, M>>,
    method: Method,
    client_ip: ClientIp,
    body: Result<Bytes, BytesRejection>,
) -> Response
where
    V: HumanVerifier + 'static,
    M: MailDispatcher + 'static,
{
    if method == Method::OPTIONS {
        return preflight();
    }

    if method != Method::POST {
        tracing::debug!(%method, %client_ip, "Method not allowed");
        return AppError::method_not_allowed().into_response();
    }

    let body = match body {
        Ok(body) => body,
        Err(rejection) => {
            return AppError::from(unreadable_body(rejection.body_text())).into_response();
        }
    };

    match state.relay.handle(&body).await {
        Ok(delivery) => {
            tracing::info!(
                %client_ip,
                recipients = delivery.email.to.len(),
                "Contact submission relayed"
            );
            (StatusCode::OK, Json(RelayResponse::sent())).into_response()
        }
        Err(e) => {
            tracing::info!(
                %client_ip,
                outcome = e.outcome_label(),
                status = e.status().as_u16(),
                "Contact submission not relayed"
            );
            AppError::from(e).into_response()
        }
    }
}

/// Empty 204 advertising how long the preflight may be cached.
fn preflight() -> Response {
    (
        StatusCode::NO_CONTENT,
        [(header::ACCESS_CONTROL_MAX_AGE, PREFLIGHT_MAX_AGE)],
    )
        .into_response()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_preflight_is_empty_204() {
        let response = preflight();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert_eq!(response.headers()[header::ACCESS_CONTROL_MAX_AGE], "86400");

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert!(bytes.is_empty());
    }
}
