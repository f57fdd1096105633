//! Seams for the two remote services the relay depends on.
//!
//! Implementations own their failure domain: they never return an error and
//! never panic. Everything that can go wrong on the wire is folded into a
//! [`ProviderOutcome`], which the orchestrator then reduces to pass/fail.

use crate::message::EmailDispatchRequest;
use std::fmt;
use std::future::Future;

/// Result of a single call to a remote provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderOutcome {
    /// The provider answered and said yes.
    Accepted,

    /// The provider answered and said no.
    Rejected {
        /// Provider-supplied detail (error codes, status, body).
        reason: String,
    },

    /// The provider could not be reached or did not answer in time.
    Unreachable {
        /// Transport-level detail.
        reason: String,
    },
}

impl ProviderOutcome {
    /// Build a `Rejected` outcome.
    #[must_use]
    pub fn rejected(reason: impl Into<String>) -> Self {
        Self::Rejected {
            reason: reason.into(),
        }
    }

    /// Build an `Unreachable` outcome.
    #[must_use]
    pub fn unreachable(reason: impl Into<String>) -> Self {
        Self::Unreachable {
            reason: reason.into(),
        }
    }

    /// Two-valued projection used by the orchestrator.
    #[must_use]
    pub const fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted)
    }

    /// Short label for logs and metrics.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Accepted => "accepted",
            Self::Rejected { .. } => "rejected",
            Self::Unreachable { .. } => "unreachable",
        }
    }
}

impl fmt::Display for ProviderOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Accepted => f.write_str("accepted"),
            Self::Rejected { reason } => write!(f, "rejected: {reason}"),
            Self::Unreachable { reason } => write!(f, "unreachable: {reason}"),
        }
    }
}

/// Human-verification provider (reCAPTCHA, Turnstile, hCaptcha, ...).
pub trait HumanVerifier: Send + Sync {
    /// Check a challenge token issued to the visitor's browser.
    ///
    /// # Arguments
    ///
    /// - `token`: Opaque token produced by the client-side widget
    fn verify(&self, token: &str) -> impl Future<Output = ProviderOutcome> + Send;
}

/// Transactional mail provider.
pub trait MailDispatcher: Send + Sync {
    /// Hand a composed message to the provider for delivery.
    ///
    /// Only `Accepted` means the provider took responsibility for the message.
    fn dispatch(&self, email: &EmailDispatchRequest)
    -> impl Future<Output = ProviderOutcome> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_accepted_projects_to_true() {
        assert!(ProviderOutcome::Accepted.is_accepted());
        assert!(!ProviderOutcome::rejected("invalid-input-response").is_accepted());
        assert!(!ProviderOutcome::unreachable("timed out").is_accepted());
    }

    #[test]
    fn test_display_includes_reason() {
        let outcome = ProviderOutcome::rejected("timeout-or-duplicate");
        assert_eq!(outcome.to_string(), "rejected: timeout-or-duplicate");
        assert_eq!(outcome.label(), "rejected");
    }
}
