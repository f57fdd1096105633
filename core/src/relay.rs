//! The orchestrator: parse, validate, verify, dispatch.
//!
//! # Flow
//!
//! ```text
//! body ──parse──► ContactForm ──validate──► Submission
//!                                              │
//!                              verify(token) ◄─┘   (gate 1)
//!                                   │ Accepted
//!                              compose + dispatch  (gate 2)
//!                                   │ Accepted
//!                                 Delivery
//! ```
//!
//! Each step runs to completion before the next begins. The first failure is
//! terminal; nothing is retried. The mail provider is called at most once per
//! request and only after the verification provider has accepted the token.

use crate::config::RelayConfig;
use crate::error::{RelayError, Result};
use crate::message::{EmailDispatchRequest, MessageComposer};
use crate::providers::{HumanVerifier, MailDispatcher};
use crate::submission::ContactForm;

/// Metric counting finished submissions, labelled by `outcome`.
pub const SUBMISSIONS_METRIC: &str = "contact_relay.submissions";

/// Proof that a submission was handed to the mail provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivery {
    /// The message exactly as dispatched.
    pub email: EmailDispatchRequest,
}

/// Contact-form relay over a verifier and a mailer.
#[derive(Debug)]
pub struct Relay<V, M> {
    verifier: V,
    mailer: M,
    composer: MessageComposer,
}

impl<V, M> Relay<V, M>
where
    V: HumanVerifier,
    M: MailDispatcher,
{
    /// Create a relay.
    #[must_use]
    pub fn new(config: &RelayConfig, verifier: V, mailer: M) -> Self {
        Self {
            verifier,
            mailer,
            composer: MessageComposer::new(&config.mail),
        }
    }

    /// Verification provider in use.
    #[must_use]
    pub const fn verifier(&self) -> &V {
        &self.verifier
    }

    /// Mail provider in use.
    #[must_use]
    pub const fn mailer(&self) -> &M {
        &self.mailer
    }

    /// Relay one request body.
    ///
    /// # Errors
    ///
    /// - [`RelayError::MalformedRequest`] if the body is not a JSON object
    /// - [`RelayError::MissingFields`] if a required field is blank
    /// - [`RelayError::VerificationFailed`] if the token is not confirmed
    /// - [`RelayError::DispatchFailed`] if the mail provider does not accept the message
    pub async fn handle(&self, body: &[u8]) -> Result<Delivery> {
        let result = self.process(body).await;

        let outcome = match &result {
            Ok(_) => "sent",
            Err(e) => e.outcome_label(),
        };
        record_outcome(outcome);

        result
    }

    async fn process(&self, body: &[u8]) -> Result<Delivery> {
        let submission = ContactForm::parse(body)
            .inspect_err(|e| tracing::warn!(error = %e, "Rejecting unreadable body"))?
            .validate()
            .inspect_err(|_| tracing::info!("Rejecting submission with missing fields"))?;

        tracing::debug!(?submission, "Submission validated");

        let verification = self.verifier.verify(&submission.verification_token).await;
        if !verification.is_accepted() {
            tracing::info!(
                outcome = verification.label(),
                detail = %verification,
                "Verification did not pass"
            );
            return Err(RelayError::VerificationFailed(verification));
        }

        let email = self.composer.compose(&submission);

        let dispatch = self.mailer.dispatch(&email).await;
        if !dispatch.is_accepted() {
            tracing::error!(
                outcome = dispatch.label(),
                detail = %dispatch,
                "Mail provider did not accept the message"
            );
            return Err(RelayError::DispatchFailed(dispatch));
        }

        tracing::info!(
            email_domain = submission.email_domain(),
            recipients = email.to.len(),
            "Contact message relayed"
        );

        Ok(Delivery { email })
    }
}

/// Account for a request whose body never reached [`Relay::handle`].
///
/// The transport failed to produce the bytes (too large, aborted upload).
/// The submission is counted as malformed like any other unreadable body.
#[must_use]
pub fn unreadable_body(detail: impl Into<String>) -> RelayError {
    let err = RelayError::MalformedRequest(detail.into());
    tracing::warn!(error = %err, "Rejecting unreadable body");
    record_outcome(err.outcome_label());
    err
}

fn record_outcome(outcome: &'static str) {
    metrics::counter!(SUBMISSIONS_METRIC, "outcome" => outcome).increment(1);
}
