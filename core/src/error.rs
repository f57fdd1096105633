//! Error taxonomy for a single relayed submission.

use crate::providers::ProviderOutcome;
use crate::response;
use http::StatusCode;
use thiserror::Error;

/// Result type alias for relay operations.
pub type Result<T> = std::result::Result<T, RelayError>;

/// Every way a submission can stop short of being sent.
///
/// The orchestrator is the only place these are produced, and [`RelayError::status`]
/// is the only place a status code is chosen. Transport problems inside the
/// provider clients never appear here directly; they arrive wrapped in the
/// [`ProviderOutcome`] of the gate that failed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RelayError {
    /// The body was not a JSON object we could read.
    #[error("Malformed request body: {0}")]
    MalformedRequest(String),

    /// One of `name`, `email`, `message` or the verification token was blank.
    #[error("Missing required fields")]
    MissingFields,

    /// The verification provider did not confirm the token.
    #[error("Verification failed: {0}")]
    VerificationFailed(ProviderOutcome),

    /// The mail provider did not accept the message.
    #[error("Dispatch failed: {0}")]
    DispatchFailed(ProviderOutcome),
}

impl RelayError {
    /// HTTP status for this failure.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::MissingFields | Self::VerificationFailed(_) => StatusCode::BAD_REQUEST,
            Self::MalformedRequest(_) | Self::DispatchFailed(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Localized text safe to show the visitor.
    #[must_use]
    pub const fn public_message(&self) -> &'static str {
        match self {
            Self::MalformedRequest(_) => response::INTERNAL_ERROR,
            Self::MissingFields => response::MISSING_FIELDS,
            Self::VerificationFailed(_) => response::VERIFICATION_FAILED,
            Self::DispatchFailed(_) => response::DISPATCH_FAILED,
        }
    }

    /// Label used for the `outcome` metric dimension.
    #[must_use]
    pub const fn outcome_label(&self) -> &'static str {
        match self {
            Self::MalformedRequest(_) => "malformed",
            Self::MissingFields => "missing_fields",
            Self::VerificationFailed(_) => "verification_failed",
            Self::DispatchFailed(_) => "dispatch_failed",
        }
    }
}
