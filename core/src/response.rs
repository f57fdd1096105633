//! Response bodies and the user-facing texts they carry.
//!
//! The browser-side form script shows `error` verbatim, so every text here is
//! written for the visitor and never contains internal detail.

use serde::{Deserialize, Serialize};

/// Returned when a required field is absent or blank.
pub const MISSING_FIELDS: &str = "Missing required fields";

/// Returned when the human-verification token is rejected.
pub const VERIFICATION_FAILED: &str =
    "Verificación reCAPTCHA fallida. Por favor intenta nuevamente.";

/// Returned when the mail provider does not accept the message.
pub const DISPATCH_FAILED: &str = "Error al enviar el correo. Por favor intenta más tarde.";

/// Returned for unreadable bodies and anything else unexpected.
pub const INTERNAL_ERROR: &str = "Error procesando tu solicitud.";

/// Returned with a 200 once the mail provider has accepted the message.
pub const SENT: &str = "¡Tu mensaje ha sido enviado exitosamente!";

/// Returned for any method other than `POST` and `OPTIONS`.
pub const METHOD_NOT_ALLOWED: &str = "Method not allowed";

/// JSON body of every non-preflight response.
///
/// ```json
/// {"success": true, "message": "¡Tu mensaje ha sido enviado exitosamente!"}
/// {"error": "Missing required fields"}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RelayResponse {
    /// The message was handed to the mail provider.
    Sent {
        /// Always `true`.
        success: bool,
        /// Localized confirmation text.
        message: String,
    },
    /// The submission was not relayed.
    Failed {
        /// Localized reason.
        error: String,
    },
}

impl RelayResponse {
    /// Success body with the standard confirmation text.
    #[must_use]
    pub fn sent() -> Self {
        Self::Sent {
            success: true,
            message: SENT.to_string(),
        }
    }

    /// Error body.
    #[must_use]
    pub fn failed(error: impl Into<String>) -> Self {
        Self::Failed {
            error: error.into(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_sent_shape() {
        let body = serde_json::to_value(RelayResponse::sent()).unwrap();
        assert_eq!(body, json!({ "success": true, "message": SENT }));
    }

    #[test]
    fn test_failed_shape_has_only_error() {
        let body = serde_json::to_value(RelayResponse::failed(MISSING_FIELDS)).unwrap();
        assert_eq!(body, json!({ "error": "Missing required fields" }));
    }

    #[test]
    fn test_untagged_deserialize_picks_variant() {
        let parsed: RelayResponse =
            serde_json::from_value(json!({ "error": METHOD_NOT_ALLOWED })).unwrap();
        assert_eq!(parsed, RelayResponse::failed(METHOD_NOT_ALLOWED));
    }
}
